//! Public protocol structs for the page's HTTP and WebSocket calls (serde ready).
//! Every action reply carries the view events the orchestrator produced, so the
//! page only has to replay them.

use serde::{Deserialize, Serialize};

use crate::chat::ChatEntry;
use crate::domain::{ChatSurface, Difficulty, StudyPackResponse};
use crate::error::ClientError;
use crate::view::ViewEvent;

/// Messages the page can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    SubmitQuiz {
        topic: String,
        #[serde(default)]
        difficulty: Option<Difficulty>,
    },
    Chat {
        message: String,
        #[serde(default)]
        surface: ChatSurface,
    },
    /// Send one of the assistant's suggested prompts.
    SuggestedPrompt {
        index: usize,
    },
    ClearChat,
    ExportChat,
    LoadPack {
        subject: String,
        title: String,
    },
    /// Grade one practice-quiz option of a saved pack.
    CheckAnswer {
        subject: String,
        title: String,
        question: usize,
        option: String,
    },
}

/// Messages sent back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    ActionResult {
        action: &'static str,
        #[serde(flatten)]
        out: ActionOut<serde_json::Value>,
    },
    ChatCleared,
    ChatExport {
        file_name: String,
        text: String,
    },
    Pack {
        subject: String,
        title: String,
        pack: Option<StudyPackResponse>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ErrorOut {
    pub code: &'static str,
    pub message: String,
}

impl From<&ClientError> for ErrorOut {
    fn from(e: &ClientError) -> Self {
        Self { code: e.code(), message: e.to_string() }
    }
}

/// Uniform reply to a UI action.
#[derive(Debug, Serialize)]
pub struct ActionOut<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOut>,
    pub events: Vec<ViewEvent>,
}

impl<T> ActionOut<T> {
    pub fn new(result: &Result<T, ClientError>, events: Vec<ViewEvent>) -> Self
    where
        T: Clone,
    {
        match result {
            Ok(v) => Self { ok: true, result: Some(v.clone()), error: None, events },
            Err(e) => Self { ok: false, result: None, error: Some(e.into()), events },
        }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    pub topic: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
pub struct ChatIn {
    pub message: String,
    #[serde(default)]
    pub surface: ChatSurface,
}

#[derive(Debug, Deserialize)]
pub struct PackQuery {
    pub subject: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub subject: String,
    pub title: String,
    pub question: usize,
    pub option: String,
}

#[derive(Serialize)]
pub struct PackListOut {
    pub keys: Vec<String>,
}

#[derive(Serialize)]
pub struct HistoryOut {
    pub entries: Vec<ChatEntry>,
}

#[derive(Serialize)]
pub struct PromptsOut {
    pub prompts: &'static [&'static str],
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub backend: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn client_messages_parse() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"chat","message":"hi"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::Chat { surface: ChatSurface::Widget, .. }));
        let m: ClientWsMessage =
            serde_json::from_str(r#"{"type":"submit_quiz","topic":"sets","difficulty":"hard"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::SubmitQuiz { difficulty: Some(Difficulty::Hard), .. }));
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"clear_chat"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::ClearChat));
        let m: ClientWsMessage = serde_json::from_str(
            r#"{"type":"check_answer","subject":"bio","title":"Cells","question":0,"option":"Nucleus"}"#,
        )
        .unwrap();
        assert!(matches!(m, ClientWsMessage::CheckAnswer { question: 0, .. }));
    }

    #[test]
    fn failed_action_serializes_error_and_events() {
        let res: Result<String, ClientError> = Err(ValidationError::EmptyTopic.into());
        let out = ActionOut::new(&res, vec![ViewEvent::Alert { message: "x".into() }]);
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"]["code"], "validation");
        assert!(v.get("result").is_none());
        assert_eq!(v["events"][0]["kind"], "alert");
    }

    #[test]
    fn ws_action_result_is_flattened() {
        let res: Result<serde_json::Value, ClientError> = Ok(serde_json::json!({"response": "hi"}));
        let msg = ServerWsMessage::ActionResult { action: "chat", out: ActionOut::new(&res, vec![]) };
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "action_result");
        assert_eq!(v["action"], "chat");
        assert_eq!(v["ok"], true);
        assert_eq!(v["result"]["response"], "hi");
    }
}
