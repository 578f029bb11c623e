//! Error taxonomy shared by the orchestrator, the backend client and the store.

use serde::Serialize;
use thiserror::Error;

/// Logical UI actions. Each has its own in-flight flag.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
  Quiz,
  WidgetChat,
  AssistantChat,
  Upload,
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Action::Quiz => "quiz",
      Action::WidgetChat => "widget_chat",
      Action::AssistantChat => "assistant_chat",
      Action::Upload => "upload",
    };
    f.write_str(s)
  }
}

/// A required field was blank; the request never left the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
  #[error("topic is required")]
  EmptyTopic,
  #[error("message is required")]
  EmptyMessage,
  #[error("title is required")]
  EmptyTitle,
  #[error("a file must be selected")]
  MissingFile,
}

/// Transport failure, non-2xx status, or an undecodable body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct BackendError {
  pub target: String,
  pub reason: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("store io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("store file is not valid JSON: {0}")]
  Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),
  #[error("backend unavailable at {target}: {reason}")]
  BackendUnavailable { target: String, reason: String },
  #[error("a {0} request is already in flight")]
  Busy(Action),
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl From<BackendError> for ClientError {
  fn from(e: BackendError) -> Self {
    ClientError::BackendUnavailable { target: e.target, reason: e.reason }
  }
}

impl ClientError {
  /// Short machine-readable code used in JSON error bodies.
  pub fn code(&self) -> &'static str {
    match self {
      ClientError::Validation(_) => "validation",
      ClientError::BackendUnavailable { .. } => "backend_unavailable",
      ClientError::Busy(_) => "busy",
      ClientError::Store(_) => "store",
    }
  }
}
