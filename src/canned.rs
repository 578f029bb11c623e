//! Canned study-assistant replies used when the backend cannot answer.
//!
//! Each template carries one worked example and a few real-world uses.

pub const CALCULUS: &str = r#"**Derivatives & Calculus** 📊

**Concept:** a derivative is the rate of change at an instant.

**Rules:**
• Power Rule: d/dx(xⁿ) = n·xⁿ⁻¹
• Product Rule: d/dx(uv) = u'v + uv'
• Chain Rule: d/dx(f(g(x))) = f'(g(x))·g'(x)

**Worked Example:**
Find dy/dx if y = 3x³ - 5x² + 7x - 2

dy/dx = 3(3x²) - 5(2x) + 7(1) - 0
     = 9x² - 10x + 7

**Where it shows up:**
• Physics: velocity is the derivative of position
• Economics: marginal cost is the derivative of total cost
• Engineering: optimizing trajectories

Want another derivative worked through? 🚀"#;

pub const INTEGRATION: &str = r#"**Integration: Area & Accumulation** 📐

**Basic Formulas:**
• ∫xⁿ dx = xⁿ⁺¹/(n+1) + C (n ≠ -1)
• ∫sin(x) dx = -cos(x) + C
• ∫cos(x) dx = sin(x) + C
• ∫eˣ dx = eˣ + C

**Worked Example:**
Evaluate ∫(4x³ - 6x² + 2x - 5) dx

= 4(x⁴/4) - 6(x³/3) + 2(x²/2) - 5x + C
= x⁴ - 2x³ + x² - 5x + C

**Where it shows up:**
• Physics: distance is the integral of velocity
• Economics: total profit from marginal profit
• Statistics: area under a probability curve

Want a definite integral next? 🎯"#;

pub const PHYSICS: &str = r#"**Physics: Mechanics & Motion** ⚡

**Newton's Laws:**
1. Inertia: a body keeps its state of rest or motion
2. F = ma
3. Every action has an equal and opposite reaction

**Worked Example:**
A 1000 kg car goes from 0 to 60 km/h in 5 s. Find the force.

v = 60/3.6 = 16.67 m/s
a = 16.67/5 = 3.33 m/s²
F = ma = 1000 × 3.33 = 3330 N

**Where it shows up:**
• Braking systems
• Sports trajectories
• Rocket propulsion

Need kinematics, energy or projectile motion? 🚗"#;

pub const CHEMISTRY: &str = r#"**Chemistry: Reactions & Calculations** 🧪

**Basic Concepts:**
• 1 mole = 6.022 × 10²³ particles
• Molarity = moles / litres
• Mass = moles × molar mass

**Worked Example:**
How many moles are in 90 g of water (H₂O)?

Molar mass of H₂O = 2(1) + 16 = 18 g/mol
Moles = 90 / 18 = 5 mol

**Where it shows up:**
• Drug dosage calculations
• Industrial mixing ratios
• Air quality measurement

Need stoichiometry, pH or equilibrium? 🔬"#;

pub const ALGEBRA: &str = r#"**Algebra: Solving Equations** 🔢

**Quadratic Formula:** x = [-b ± √(b² - 4ac)] / 2a

**Worked Example:**
Solve 2x² + 5x - 3 = 0

a = 2, b = 5, c = -3
Discriminant = 25 + 24 = 49
x = (-5 ± 7) / 4
x₁ = 0.5, x₂ = -3

**Where it shows up:**
• Break-even points in business
• Parabolic arches
• Ball trajectories

Want linear systems or inequalities? 📈"#;

pub const STATISTICS: &str = r#"**Statistics & Probability** 📊

**Key Formulas:**
• Mean x̄ = Σx / n
• Variance σ² = Σ(x - x̄)² / n
• Standard deviation σ = √variance
• P(event) = favourable outcomes / total outcomes

**Worked Example:**
Data: 12, 15, 18, 20, 25

Mean = 90 / 5 = 18
Squared deviations: 36, 9, 0, 4, 49
Variance = 98 / 5 = 19.6
SD = √19.6 ≈ 4.43

**Where it shows up:**
• Portfolio risk
• Clinical trials
• Sports analytics

Need distributions or hypothesis testing? 📉"#;

pub const PROGRAMMING: &str = r#"**Programming: Solving Real Problems** 💻

**Worked Example:** the nth Fibonacci number (0, 1, 1, 2, 3, 5, 8 ...)

```python
def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n - 1) + fibonacci(n - 2)

fibonacci(7)  # 13
```

**Next Step:** binary search, O(log n)

```python
def binary_search(arr, target):
    left, right = 0, len(arr) - 1
    while left <= right:
        mid = (left + right) // 2
        if arr[mid] == target:
            return mid
        if arr[mid] < target:
            left = mid + 1
        else:
            right = mid - 1
    return -1
```

Need help with loops, arrays or objects? 🎮"#;

pub const ECONOMICS: &str = r#"**Economics & Business Math** 💰

**Key Concepts:**
• Profit = Revenue - Cost
• Break-even: Revenue = Cost
• ROI = (Profit / Investment) × 100%

**Worked Example:**
Price $50/unit, fixed costs $10,000, variable cost $20/unit. Break-even?

50x = 10000 + 20x
30x = 10000
x ≈ 334 units

**Where it shows up:**
• Pricing strategy
• Production planning
• Investment decisions

Need supply and demand or elasticity? 📊"#;

pub const GEOMETRY: &str = r#"**Geometry & Trigonometry** 📐

**Key Formulas:**
• sin²θ + cos²θ = 1
• Triangle area = ½ × base × height
• Pythagoras: a² + b² = c²

**Worked Example:**
A 10 m ladder leans on a wall at 60°. How high does it reach?

height = 10 × sin(60°) = 10 × 0.866 ≈ 8.66 m

**Where it shows up:**
• Roof pitches and building design
• GPS triangulation
• 3D graphics

Need circles, polygons or 3D shapes? 🏗️"#;

pub const ALGORITHMS: &str = r#"**Data Structures & Algorithms** 🔥

**Everyday Analogies:**
• Stack → browser back button (LIFO)
• Queue → print jobs (FIFO)
• Tree → file system
• Graph → road maps
• Hash table → dictionary lookup

**Worked Example:** find duplicates in [1, 2, 3, 2, 4, 3, 5]

```python
def find_duplicates(arr):
    seen, dups = set(), []
    for n in arr:
        if n in seen:
            dups.append(n)
        else:
            seen.add(n)
    return dups

find_duplicates([1, 2, 3, 2, 4, 3, 5])  # [2, 3]
```

Want sorting, searching or graph algorithms next? 🚀"#;

pub const BIOLOGY: &str = r#"**Biology: Life Sciences** 🧬

**Cell Structure:**
• Nucleus: holds the DNA
• Mitochondria: produce ATP
• Ribosomes: build proteins

**Worked Example:** crossing two Tt (tall) plants

```
    T    t
T  TT   Tt
t  Tt   tt
```
Ratio: 3 tall : 1 short

**Where it shows up:**
• Gene therapy
• Crop breeding
• DNA fingerprinting

Need photosynthesis or evolution? 🌱"#;

pub const STUDY_TIPS: &str = r#"**Study Strategies That Work** 📖✨

**Techniques:**
1. Active recall: test yourself without notes
2. Spaced repetition: review at growing intervals
3. Feynman technique: explain it simply
4. Pomodoro: 25 minutes focus, 5 minutes break
5. Practice problems every day

**Worked Plan:**
📅 Weeks 1-2: concepts and easy problems
📅 Weeks 3-4: mixed, medium problems
📅 Final week: past papers and revision

Want a plan for a specific subject? 🎯"#;

pub const GENERAL_HELP: &str = r#"**I'm here to help!** 🤝

📚 **Subjects:** maths, physics, chemistry, biology, computer science, economics
🔢 **Problem solving:** step-by-step worked solutions
💡 **Concepts:** simple analogies and real-world connections

**Example questions:**
"Solve ∫x²dx"
"Explain photosynthesis with a real example"
"How do I find time complexity?""#;

pub const DEFAULT_TEMPLATE: &str = r#"**Ask me anything!** 🎓

**Mathematics:** calculus, algebra, statistics, geometry
**Sciences:** physics, chemistry, biology
**Programming:** Python, JavaScript, data structures
**Business:** economics and finance
**Study skills:** time management and exam prep

**Try asking:**
• "Solve the derivative of x³ + 2x²"
• "Explain Newton's laws with examples"
• "Binary search with code"

What would you like to learn today? 😊"#;

/// Fallback for the landing-page chat box; `{focus}` varies on whether a quiz was mentioned.
pub const QUICK_REPLY: &str =
  "Thanks for your question! I'm here to help you learn {focus}. How else can I assist?";

/// Shown when the backend answered but carried no reply text.
pub const UNCLEAR_REPLY: &str = "I'm having trouble understanding that. Could you rephrase?";
