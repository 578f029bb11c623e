#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
  extract::{Multipart, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  routing::post,
  Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Notify;

use logiclinks_frontend::config::{ClientConfig, StoreKind};

/// Exact body the stub returns for a study pack. Spacing is deliberate so a
/// re-serialized copy would not match.
pub const PACK_BODY: &str = r#"{"summary": ["Cells are the basic unit of life", "Mitochondria make ATP"],
 "quiz": [{"q": "Which organelle makes ATP?", "options": ["Nucleus", "Mitochondria"], "a": "Mitochondria"}]}"#;

#[derive(Clone, Debug, Default)]
pub struct UploadSeen {
  pub subject: String,
  pub chapter: String,
  pub file_name: String,
  pub file_len: usize,
}

#[derive(Clone, Default)]
struct StubState {
  hits: Arc<AtomicUsize>,
  uploads: Arc<Mutex<Vec<UploadSeen>>>,
  chats: Arc<Mutex<Vec<Value>>>,
  gate: Arc<Notify>,
}

/// Stand-in for the remote study backend.
pub struct Stub {
  pub base_url: String,
  state: StubState,
}

impl Stub {
  pub fn hits(&self) -> usize {
    self.state.hits.load(Ordering::SeqCst)
  }

  pub fn uploads(&self) -> Vec<UploadSeen> {
    self.state.uploads.lock().unwrap().clone()
  }

  pub fn chats(&self) -> Vec<Value> {
    self.state.chats.lock().unwrap().clone()
  }

  /// Let a held `"slow"` quiz request finish.
  pub fn release(&self) {
    self.state.gate.notify_one();
  }
}

pub async fn spawn_stub() -> Stub {
  let state = StubState::default();
  let app = Router::new()
    .route("/generate-quiz", post(quiz))
    .route("/chat", post(chat))
    .route("/generate-offline-pack", post(pack))
    .with_state(state.clone());

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr: SocketAddr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  Stub { base_url: format!("http://{}", addr), state }
}

/// An origin nothing listens on.
pub async fn dead_origin() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{}", addr)
}

pub fn config_for(base_url: &str) -> ClientConfig {
  let mut cfg = ClientConfig::default();
  cfg.backend.base_url = base_url.to_string();
  cfg.store.kind = StoreKind::Memory;
  cfg
}

async fn quiz(State(s): State<StubState>, Json(body): Json<Value>) -> Response {
  s.hits.fetch_add(1, Ordering::SeqCst);
  let topic = body["topic"].as_str().unwrap_or_default().to_string();
  let difficulty = body["difficulty"].as_str().unwrap_or_default().to_string();
  if topic == "slow" {
    s.gate.notified().await;
  }
  if topic == "boom" {
    return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "Gemini failed"}))).into_response();
  }
  Json(json!({
    "questions": [
      {"id": 1, "text": format!("Mock Question about {} ({})?", topic, difficulty), "options": ["A", "B"], "answer": "A"}
    ]
  }))
  .into_response()
}

async fn chat(State(s): State<StubState>, Json(body): Json<Value>) -> Response {
  s.hits.fetch_add(1, Ordering::SeqCst);
  s.chats.lock().unwrap().push(body.clone());
  let message = body["message"].as_str().unwrap_or_default();
  if message.contains("silent") {
    return Json(json!({})).into_response();
  }
  if message.contains("legacy") {
    return Json(json!({"message": "legacy reply"})).into_response();
  }
  Json(json!({"response": format!("echo: {}", message)})).into_response()
}

async fn pack(State(s): State<StubState>, mut multipart: Multipart) -> Response {
  s.hits.fetch_add(1, Ordering::SeqCst);
  let mut seen = UploadSeen::default();
  while let Some(field) = multipart.next_field().await.unwrap() {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      "file" => {
        seen.file_name = field.file_name().unwrap_or_default().to_string();
        seen.file_len = field.bytes().await.unwrap().len();
      }
      "subject" => seen.subject = field.text().await.unwrap(),
      "chapter" => seen.chapter = field.text().await.unwrap(),
      _ => {}
    }
  }
  let broken = seen.subject == "broken";
  s.uploads.lock().unwrap().push(seen);
  if broken {
    return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "Prerequisite Analysis Failed"}))).into_response();
  }
  ([(header::CONTENT_TYPE, "application/json")], PACK_BODY).into_response()
}
