//! The UI affordances the orchestrator drives, as a trait instead of DOM lookups.
//!
//! `RecordingView` captures every call in order. The HTTP host returns the recorded
//! events to the page, and tests assert on them.

use std::sync::Mutex;

use serde::Serialize;

use crate::chat::ChatEntry;
use crate::domain::{ChatSurface, QuizResponse, StudyPackResponse};

pub trait View: Send + Sync {
  /// Blocking error the user must acknowledge.
  fn alert(&self, message: &str);
  /// Non-blocking success message.
  fn notice(&self, message: &str);
  fn render_quiz(&self, quiz: &QuizResponse);
  fn render_chat(&self, surface: ChatSurface, entry: &ChatEntry);
  fn render_study_pack(&self, pack: &StudyPackResponse);
  fn set_upload_busy(&self, busy: bool);
  fn close_upload_modal(&self);
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewEvent {
  Alert { message: String },
  Notice { message: String },
  /// `text` is the plain-text rendering for pages without a quiz card.
  Quiz { quiz: QuizResponse, text: String },
  Chat { surface: ChatSurface, entry: ChatEntry },
  StudyPack { pack: StudyPackResponse, text: String },
  UploadBusy { busy: bool },
  CloseUploadModal,
}

#[derive(Default)]
pub struct RecordingView {
  events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
  pub fn new() -> Self {
    Self::default()
  }

  fn push(&self, ev: ViewEvent) {
    // A poisoned lock only means another recorder panicked mid-push; keep the events.
    let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
    events.push(ev);
  }

  pub fn events(&self) -> Vec<ViewEvent> {
    self.events.lock().unwrap_or_else(|p| p.into_inner()).clone()
  }

  pub fn into_events(self) -> Vec<ViewEvent> {
    self.events.into_inner().unwrap_or_else(|p| p.into_inner())
  }

  pub fn alerts(&self) -> Vec<String> {
    self
      .events()
      .into_iter()
      .filter_map(|e| match e {
        ViewEvent::Alert { message } => Some(message),
        _ => None,
      })
      .collect()
  }
}

impl View for RecordingView {
  fn alert(&self, message: &str) {
    self.push(ViewEvent::Alert { message: message.to_string() });
  }

  fn notice(&self, message: &str) {
    self.push(ViewEvent::Notice { message: message.to_string() });
  }

  fn render_quiz(&self, quiz: &QuizResponse) {
    self.push(ViewEvent::Quiz { quiz: quiz.clone(), text: quiz_to_text(quiz) });
  }

  fn render_chat(&self, surface: ChatSurface, entry: &ChatEntry) {
    self.push(ViewEvent::Chat { surface, entry: entry.clone() });
  }

  fn render_study_pack(&self, pack: &StudyPackResponse) {
    self.push(ViewEvent::StudyPack { pack: pack.clone(), text: study_pack_to_text(pack) });
  }

  fn set_upload_busy(&self, busy: bool) {
    self.push(ViewEvent::UploadBusy { busy });
  }

  fn close_upload_modal(&self) {
    self.push(ViewEvent::CloseUploadModal);
  }
}

/// Plain-text rendering of a generated quiz.
pub fn quiz_to_text(quiz: &QuizResponse) -> String {
  let mut out = String::from("Generated Quiz\n");
  for (i, q) in quiz.questions.iter().enumerate() {
    out.push_str(&format!("\nQ{}: {}\n", i + 1, q.text));
    for (j, opt) in q.options.iter().flatten().enumerate() {
      out.push_str(&format!("  ({}) {}\n", option_letter(j), opt));
    }
  }
  out
}

/// Plain-text rendering of a study pack: summary bullets then the practice quiz.
pub fn study_pack_to_text(pack: &StudyPackResponse) -> String {
  let mut out = String::from("AI Summary\n");
  for s in &pack.summary {
    out.push_str(&format!("• {}\n", s));
  }
  out.push_str("\nQuick Practice Quiz\n");
  for (i, q) in pack.quiz.iter().enumerate() {
    out.push_str(&format!("\n{}. {}\n", i + 1, q.q));
    for (j, opt) in q.options.iter().enumerate() {
      out.push_str(&format!("  ({}) {}\n", option_letter(j), opt));
    }
  }
  out
}

fn option_letter(i: usize) -> char {
  (b'a' + (i % 26) as u8) as char
}
