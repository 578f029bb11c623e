//! Request orchestration between UI actions and the remote backend.
//!
//! One network round trip per user action, then a uniform failure policy:
//!   - quiz and upload: exactly one blocking alert, nothing persisted
//!   - chat: silent fallback to the local responder, logged at `warn`
//! Blank required fields stop the action before any request is built.
//! No retries and no queueing. Each action holds an in-flight flag for the
//! duration of its call so duplicate submissions are refused.

use tracing::{error, info, instrument, warn};

use crate::backend::Backend;
use crate::canned::UNCLEAR_REPLY;
use crate::chat::{ChatEntry, Role};
use crate::config::UiConfig;
use crate::domain::{ChatRequest, ChatResponse, ChatSurface, Difficulty, QuizRequest, QuizResponse, StudyPackResponse, UploadPack};
use crate::error::{Action, ClientError, StoreError, ValidationError};
use crate::guard::InFlight;
use crate::responder;
use crate::store::{pack_key, KeyValueStore};
use crate::util::is_blank;
use crate::view::View;

pub const TOPIC_REQUIRED: &str = "Please enter a topic to generate a quiz.";
pub const QUIZ_READY: &str = "✅ Quiz generated successfully!";
pub const UPLOAD_FIELDS_REQUIRED: &str = "Please fill in title and select a file";
pub const UPLOAD_FAILED: &str = "Could not connect to the AI backend. Make sure the server is running.";
pub const UPLOAD_READY: &str = "✅ AI has analyzed your notes! You can now access the summary and quiz offline.";
pub const ANSWER_RIGHT: &str = "Correct!";
pub const ANSWER_WRONG: &str = "Try again!";

pub struct RequestOrchestrator<B, S> {
  backend: B,
  store: S,
  in_flight: InFlight,
  assistant_context: String,
}

impl<B: Backend, S: KeyValueStore> RequestOrchestrator<B, S> {
  pub fn new(backend: B, store: S, ui: &UiConfig) -> Self {
    Self { backend, store, in_flight: InFlight::new(), assistant_context: ui.assistant_context.clone() }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn in_flight(&self) -> &InFlight {
    &self.in_flight
  }

  #[instrument(level = "info", skip(self, view, topic), fields(topic_len = topic.len(), %difficulty))]
  pub async fn submit_quiz(
    &self,
    view: &dyn View,
    topic: &str,
    difficulty: Difficulty,
  ) -> Result<QuizResponse, ClientError> {
    if is_blank(topic) {
      view.alert(TOPIC_REQUIRED);
      return Err(ValidationError::EmptyTopic.into());
    }
    let _token = self.in_flight.acquire(Action::Quiz)?;

    let req = QuizRequest { topic: topic.trim().to_string(), difficulty };
    match self.backend.generate_quiz(&req).await {
      Ok(quiz) => {
        info!(target: "orchestrator", questions = quiz.questions.len(), "Quiz received");
        view.notice(QUIZ_READY);
        view.render_quiz(&quiz);
        Ok(quiz)
      }
      Err(e) => {
        error!(target: "orchestrator", target_url = %e.target, error = %e.reason, "Quiz request failed");
        view.alert(&format!("Connection Failed!\n\nReason: {}\nTarget: {}", e.reason, self.backend.origin()));
        Err(e.into())
      }
    }
  }

  /// Blank messages are ignored without any feedback, matching an empty Enter press.
  #[instrument(level = "info", skip(self, view, message), fields(?surface, message_len = message.len()))]
  pub async fn submit_chat(
    &self,
    view: &dyn View,
    surface: ChatSurface,
    message: &str,
  ) -> Result<ChatResponse, ClientError> {
    let message = message.trim();
    if message.is_empty() {
      return Err(ValidationError::EmptyMessage.into());
    }
    let _token = self.in_flight.acquire(chat_action(surface))?;

    view.render_chat(surface, &ChatEntry::now(Role::User, message));

    let req = match surface {
      ChatSurface::Widget => ChatRequest { message: message.to_string(), context: None, allow_exploration: None },
      ChatSurface::Assistant => ChatRequest {
        message: message.to_string(),
        context: Some(self.assistant_context.clone()),
        allow_exploration: Some(true),
      },
    };

    let reply = match self.backend.chat(&req).await {
      Ok(Some(text)) => ChatResponse { response: text, local: false },
      Ok(None) => {
        warn!(target: "orchestrator", ?surface, "Backend reply had no text; using local reply");
        let text = match surface {
          ChatSurface::Widget => UNCLEAR_REPLY.to_string(),
          ChatSurface::Assistant => responder::respond(message),
        };
        ChatResponse { response: text, local: true }
      }
      Err(e) => {
        warn!(target: "orchestrator", ?surface, target_url = %e.target, error = %e.reason, "Backend unavailable; using local reply");
        ChatResponse { response: local_reply(surface, message), local: true }
      }
    };

    view.render_chat(surface, &ChatEntry::now(Role::Assistant, reply.response.clone()));
    Ok(reply)
  }

  #[instrument(
    level = "info",
    skip(self, view, upload),
    fields(subject = %upload.subject, title_len = upload.title.len(), has_file = upload.file.is_some())
  )]
  pub async fn submit_offline_pack(
    &self,
    view: &dyn View,
    upload: &UploadPack,
  ) -> Result<StudyPackResponse, ClientError> {
    let file = match (&upload.file, is_blank(&upload.title)) {
      (_, true) => {
        view.alert(UPLOAD_FIELDS_REQUIRED);
        return Err(ValidationError::EmptyTitle.into());
      }
      (None, false) => {
        view.alert(UPLOAD_FIELDS_REQUIRED);
        return Err(ValidationError::MissingFile.into());
      }
      (Some(f), false) => f,
    };
    let _token = self.in_flight.acquire(Action::Upload)?;
    let _busy = UploadBusy::new(view);

    let chapter = upload.chapter_or_default();
    let raw = match self.backend.generate_offline_pack(&upload.subject, chapter, file).await {
      Ok(raw) => raw,
      Err(e) => {
        error!(target: "orchestrator", target_url = %e.target, error = %e.reason, "Study pack generation failed");
        view.alert(UPLOAD_FAILED);
        return Err(e.into());
      }
    };

    let key = pack_key(upload.subject.trim(), upload.title.trim());
    if let Err(e) = self.store.set(&key, raw.body).await {
      error!(target: "orchestrator", %key, error = %e, "Failed to save study pack");
      view.alert(UPLOAD_FAILED);
      return Err(e.into());
    }
    info!(target: "orchestrator", %key, summary = raw.pack.summary.len(), quiz = raw.pack.quiz.len(), "Study pack saved");

    view.notice(UPLOAD_READY);
    view.render_study_pack(&raw.pack);
    view.close_upload_modal();
    Ok(raw.pack)
  }

  /// Saved pack body exactly as the backend sent it.
  pub async fn saved_pack(&self, subject: &str, title: &str) -> Result<Option<String>, ClientError> {
    Ok(self.store.get(&pack_key(subject.trim(), title.trim())).await?)
  }

  pub async fn load_pack(&self, subject: &str, title: &str) -> Result<Option<StudyPackResponse>, ClientError> {
    match self.saved_pack(subject, title).await? {
      Some(body) => {
        let pack = serde_json::from_str(&body).map_err(StoreError::from)?;
        Ok(Some(pack))
      }
      None => Ok(None),
    }
  }

  /// Grade one option of a saved pack's practice quiz. `None` when the pack or
  /// the question does not exist.
  #[instrument(level = "info", skip(self, view, option))]
  pub async fn check_pack_answer(
    &self,
    view: &dyn View,
    subject: &str,
    title: &str,
    question: usize,
    option: &str,
  ) -> Result<Option<bool>, ClientError> {
    let Some(pack) = self.load_pack(subject, title).await? else {
      return Ok(None);
    };
    let Some(q) = pack.quiz.get(question) else {
      return Ok(None);
    };
    let correct = q.is_correct(option);
    view.alert(if correct { ANSWER_RIGHT } else { ANSWER_WRONG });
    Ok(Some(correct))
  }

  /// Keys of every saved pack.
  pub async fn saved_pack_keys(&self) -> Result<Vec<String>, ClientError> {
    let keys = self.store.keys().await?;
    Ok(keys.into_iter().filter(|k| k.starts_with("offline_")).collect())
  }
}

pub fn chat_action(surface: ChatSurface) -> Action {
  match surface {
    ChatSurface::Widget => Action::WidgetChat,
    ChatSurface::Assistant => Action::AssistantChat,
  }
}

fn local_reply(surface: ChatSurface, message: &str) -> String {
  match surface {
    ChatSurface::Widget => responder::quick_reply(message),
    ChatSurface::Assistant => responder::respond(message),
  }
}

/// Upload control stays disabled until this drops, on every exit path.
struct UploadBusy<'a> {
  view: &'a dyn View,
}

impl<'a> UploadBusy<'a> {
  fn new(view: &'a dyn View) -> Self {
    view.set_upload_busy(true);
    Self { view }
  }
}

impl Drop for UploadBusy<'_> {
  fn drop(&mut self) {
    self.view.set_upload_busy(false);
  }
}
