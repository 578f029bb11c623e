//! WebSocket upgrade + message loop. Each page message is parsed as JSON and
//! forwarded to the orchestrator. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::chat::{export_file_name, SUGGESTED_PROMPTS};
use crate::domain::ChatSurface;
use crate::error::ClientError;
use crate::protocol::{ActionOut, ClientWsMessage, ServerWsMessage};
use crate::state::AppState;
use crate::view::RecordingView;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "logiclinks", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let conn_id = Uuid::new_v4();
  info!(target: "logiclinks", %conn_id, "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "logiclinks", %conn_id, "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "logiclinks", %conn_id, error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "logiclinks", %conn_id, "WebSocket disconnected");
}

fn action_result<T: Serialize>(action: &'static str, res: Result<T, ClientError>, view: RecordingView) -> ServerWsMessage {
  let res = res.map(|v| serde_json::to_value(v).unwrap_or(serde_json::Value::Null));
  ServerWsMessage::ActionResult { action, out: ActionOut::new(&res, view.into_events()) }
}

async fn chat(state: &AppState, surface: ChatSurface, message: &str) -> ServerWsMessage {
  let view = RecordingView::new();
  let res = state.orchestrator.submit_chat(&view, surface, message).await;
  state.record_assistant_turns(&view.events()).await;
  action_result("chat", res, view)
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::SubmitQuiz { topic, difficulty } => {
      let view = RecordingView::new();
      let difficulty = difficulty.unwrap_or(state.config.ui.default_difficulty);
      let res = state.orchestrator.submit_quiz(&view, &topic, difficulty).await;
      info!(target: "logiclinks", ok = res.is_ok(), "WS submit_quiz handled");
      action_result("submit_quiz", res, view)
    }

    ClientWsMessage::Chat { message, surface } => chat(state, surface, &message).await,

    ClientWsMessage::SuggestedPrompt { index } => match SUGGESTED_PROMPTS.get(index) {
      Some(prompt) => chat(state, ChatSurface::Assistant, prompt).await,
      None => ServerWsMessage::Error { message: format!("No suggested prompt #{}", index) },
    },

    ClientWsMessage::ClearChat => {
      state.history.write().await.clear();
      ServerWsMessage::ChatCleared
    }

    ClientWsMessage::ExportChat => ServerWsMessage::ChatExport {
      file_name: export_file_name(Local::now().date_naive()),
      text: state.history.read().await.export(),
    },

    ClientWsMessage::LoadPack { subject, title } => match state.orchestrator.load_pack(&subject, &title).await {
      Ok(pack) => ServerWsMessage::Pack { subject, title, pack },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::CheckAnswer { subject, title, question, option } => {
      let view = RecordingView::new();
      let res = state.orchestrator.check_pack_answer(&view, &subject, &title, question, &option).await;
      action_result("check_answer", res, view)
    }
  }
}
