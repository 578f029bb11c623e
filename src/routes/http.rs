//! HTTP endpoint handlers. These are thin wrappers that forward to the orchestrator
//! with a recording view and return the recorded events with the outcome.

use std::sync::Arc;

use axum::{
  extract::{Multipart, Query, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::backend::Backend;
use crate::chat::{export_file_name, SUGGESTED_PROMPTS};
use crate::domain::{UploadFile, UploadPack};
use crate::error::ClientError;
use crate::protocol::*;
use crate::state::AppState;
use crate::view::RecordingView;

pub fn status_for(e: &ClientError) -> StatusCode {
  match e {
    ClientError::Validation(_) => StatusCode::BAD_REQUEST,
    ClientError::Busy(_) => StatusCode::CONFLICT,
    ClientError::BackendUnavailable { .. } => StatusCode::BAD_GATEWAY,
    ClientError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

fn reply<T: Serialize + Clone>(res: Result<T, ClientError>, view: RecordingView) -> (StatusCode, Json<ActionOut<T>>) {
  let status = res.as_ref().err().map(status_for).unwrap_or(StatusCode::OK);
  (status, Json(ActionOut::new(&res, view.into_events())))
}

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, backend: state.orchestrator.backend().origin().to_string() })
}

#[instrument(level = "info", skip(state, body), fields(topic_len = body.topic.len()))]
pub async fn http_post_quiz(State(state): State<Arc<AppState>>, Json(body): Json<QuizIn>) -> impl IntoResponse {
  let view = RecordingView::new();
  let difficulty = body.difficulty.unwrap_or(state.config.ui.default_difficulty);
  let res = state.orchestrator.submit_quiz(&view, &body.topic, difficulty).await;
  info!(target: "logiclinks", ok = res.is_ok(), %difficulty, "HTTP quiz handled");
  reply(res, view)
}

#[instrument(level = "info", skip(state, body), fields(surface = ?body.surface, message_len = body.message.len()))]
pub async fn http_post_chat(State(state): State<Arc<AppState>>, Json(body): Json<ChatIn>) -> impl IntoResponse {
  let view = RecordingView::new();
  let res = state.orchestrator.submit_chat(&view, body.surface, &body.message).await;
  let events = view.into_events();
  state.record_assistant_turns(&events).await;
  let status = res.as_ref().err().map(status_for).unwrap_or(StatusCode::OK);
  (status, Json(ActionOut::new(&res, events)))
}

#[instrument(level = "info", skip(state, multipart))]
pub async fn http_post_offline_pack(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
  let upload = match read_upload(multipart).await {
    Ok(u) => u,
    Err(message) => {
      warn!(target: "logiclinks", %message, "Rejected malformed upload");
      let out: ActionOut<()> = ActionOut {
        ok: false,
        result: None,
        error: Some(ErrorOut { code: "bad_request", message }),
        events: vec![],
      };
      return (StatusCode::BAD_REQUEST, Json(out)).into_response();
    }
  };
  let view = RecordingView::new();
  let res = state.orchestrator.submit_offline_pack(&view, &upload).await;
  info!(target: "logiclinks", ok = res.is_ok(), subject = %upload.subject, "HTTP offline pack handled");
  reply(res, view).into_response()
}

/// Collect the upload form. An empty file part counts as no file selected.
async fn read_upload(mut multipart: Multipart) -> Result<UploadPack, String> {
  let mut upload = UploadPack { subject: String::new(), title: String::new(), chapter: None, file: None };
  while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      "file" => {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| e.to_string())?;
        if file_name.is_empty() && bytes.is_empty() {
          continue;
        }
        let name = if file_name.is_empty() { "upload".to_string() } else { file_name };
        upload.file = Some(UploadFile { name, content_type, bytes: bytes.to_vec() });
      }
      "subject" => upload.subject = field.text().await.map_err(|e| e.to_string())?,
      "title" => upload.title = field.text().await.map_err(|e| e.to_string())?,
      "chapter" | "description" => upload.chapter = Some(field.text().await.map_err(|e| e.to_string())?),
      other => debug!(target: "logiclinks", field = %other, "Ignoring unknown upload field"),
    }
  }
  Ok(upload)
}

/// Saved pack body, byte for byte.
#[instrument(level = "info", skip(state), fields(subject = %q.subject, title = %q.title))]
pub async fn http_get_offline_pack(State(state): State<Arc<AppState>>, Query(q): Query<PackQuery>) -> Response {
  match state.orchestrator.saved_pack(&q.subject, &q.title).await {
    Ok(Some(body)) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
    Ok(None) => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { code: "not_found", message: format!("no saved pack for {} / {}", q.subject, q.title) }),
    )
      .into_response(),
    Err(e) => (status_for(&e), Json(ErrorOut::from(&e))).into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_pack_answer(State(state): State<Arc<AppState>>, Json(body): Json<AnswerIn>) -> impl IntoResponse {
  let view = RecordingView::new();
  let res = state
    .orchestrator
    .check_pack_answer(&view, &body.subject, &body.title, body.question, &body.option)
    .await;
  reply(res, view)
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_offline_packs(State(state): State<Arc<AppState>>) -> Response {
  match state.orchestrator.saved_pack_keys().await {
    Ok(keys) => Json(PackListOut { keys }).into_response(),
    Err(e) => (status_for(&e), Json(ErrorOut::from(&e))).into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let entries = state.history.read().await.entries().to_vec();
  Json(HistoryOut { entries })
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  state.history.write().await.clear();
  info!(target: "logiclinks", "Assistant history cleared");
  StatusCode::NO_CONTENT
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_export(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let text = state.history.read().await.export();
  let file_name = export_file_name(Local::now().date_naive());
  (
    [
      (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
      (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
    ],
    text,
  )
}

#[instrument(level = "info")]
pub async fn http_get_prompts() -> impl IntoResponse {
  Json(PromptsOut { prompts: SUGGESTED_PROMPTS })
}
