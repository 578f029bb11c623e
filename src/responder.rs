//! Offline study assistant: keyword-triggered canned replies.
//!
//! `RULES` is evaluated top to bottom and the first rule with any keyword
//! contained in the lowercased input wins. Keywords are not mutually
//! exclusive ("study algorithm" resolves to `Algorithms`, which is listed
//! before `StudyTips`), so the order of `RULES` is the priority.

use serde::Serialize;

use crate::canned;
use crate::util::fill_template;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
  Calculus,
  Integration,
  Physics,
  Chemistry,
  Algebra,
  Statistics,
  Programming,
  Economics,
  Geometry,
  Algorithms,
  Biology,
  StudyTips,
  GeneralHelp,
}

#[derive(Debug)]
pub struct ResponseRule {
  pub topic: Topic,
  pub keywords: &'static [&'static str],
  pub template: &'static str,
}

impl ResponseRule {
  fn matches(&self, lowered: &str) -> bool {
    self.keywords.iter().any(|k| lowered.contains(k))
  }
}

pub static RULES: &[ResponseRule] = &[
  ResponseRule {
    topic: Topic::Calculus,
    keywords: &["derivative", "differentiation", "calculus"],
    template: canned::CALCULUS,
  },
  ResponseRule {
    topic: Topic::Integration,
    keywords: &["integrat", "antiderivative"],
    template: canned::INTEGRATION,
  },
  ResponseRule {
    topic: Topic::Physics,
    keywords: &["physics", "force", "motion", "newton"],
    template: canned::PHYSICS,
  },
  ResponseRule {
    topic: Topic::Chemistry,
    keywords: &["chemistry", "chemical", "reaction", "mole"],
    template: canned::CHEMISTRY,
  },
  ResponseRule {
    topic: Topic::Algebra,
    keywords: &["algebra", "equation", "solve", "quadratic"],
    template: canned::ALGEBRA,
  },
  ResponseRule {
    topic: Topic::Statistics,
    keywords: &["statistic", "probability", "mean", "standard deviation"],
    template: canned::STATISTICS,
  },
  ResponseRule {
    topic: Topic::Programming,
    keywords: &["code", "program", "python", "javascript"],
    template: canned::PROGRAMMING,
  },
  ResponseRule {
    topic: Topic::Economics,
    keywords: &["econom", "business", "profit", "cost"],
    template: canned::ECONOMICS,
  },
  ResponseRule {
    topic: Topic::Geometry,
    keywords: &["geometry", "trigonometry", "triangle", "angle"],
    template: canned::GEOMETRY,
  },
  ResponseRule {
    topic: Topic::Algorithms,
    keywords: &["dsa", "data structure", "algorithm"],
    template: canned::ALGORITHMS,
  },
  ResponseRule {
    topic: Topic::Biology,
    keywords: &["biology", "cell", "dna", "genetics"],
    template: canned::BIOLOGY,
  },
  ResponseRule {
    topic: Topic::StudyTips,
    keywords: &["study", "tips", "learn", "prepare"],
    template: canned::STUDY_TIPS,
  },
  ResponseRule {
    topic: Topic::GeneralHelp,
    keywords: &["help", "how", "what", "explain"],
    template: canned::GENERAL_HELP,
  },
];

/// The first rule triggered by `input`, if any.
pub fn matching_rule(input: &str) -> Option<&'static ResponseRule> {
  let lowered = input.to_lowercase();
  RULES.iter().find(|r| r.matches(&lowered))
}

/// Full-page assistant reply. Same input, same output.
pub fn respond(input: &str) -> String {
  matching_rule(input)
    .map(|r| r.template)
    .unwrap_or(canned::DEFAULT_TEMPLATE)
    .to_string()
}

/// Short reply for the landing-page chat box.
pub fn quick_reply(input: &str) -> String {
  let focus = if input.to_lowercase().contains("quiz") { "with quizzes" } else { "better" };
  fill_template(canned::QUICK_REPLY, &[("focus", focus)])
}
