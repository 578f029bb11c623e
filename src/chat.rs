//! Full-page assistant transcript: entries, clearing and plain-text export.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  User,
  Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatEntry {
  pub role: Role,
  pub text: String,
  /// Local wall-clock time, `HH:MM`.
  pub time: String,
}

impl ChatEntry {
  pub fn now(role: Role, text: impl Into<String>) -> Self {
    Self { role, text: text.into(), time: Local::now().format("%H:%M").to_string() }
  }
}

/// Buttons on the assistant page that send a ready-made question.
pub const SUGGESTED_PROMPTS: &[&str] = &[
  "Explain derivatives with an example",
  "Solve a quadratic equation step by step",
  "Explain Newton's laws with examples",
  "Binary search algorithm with code",
  "Give me study tips for exams",
];

#[derive(Clone, Debug, Default, Serialize)]
pub struct ChatHistory {
  entries: Vec<ChatEntry>,
}

impl ChatHistory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, entry: ChatEntry) {
    self.entries.push(entry);
  }

  pub fn entries(&self) -> &[ChatEntry] {
    &self.entries
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn export(&self) -> String {
    let mut out = format!("EnWise AI Chat Export\n{}\n\n", "=".repeat(40));
    for e in &self.entries {
      let who = match e.role {
        Role::User => "You",
        Role::Assistant => "AI",
      };
      out.push_str(&format!("[{}] {}\n{}\n\n", who, e.time, e.text));
    }
    out
  }
}

pub fn export_file_name(date: NaiveDate) -> String {
  format!("enwise-chat-{}.txt", date.format("%Y-%m-%d"))
}
