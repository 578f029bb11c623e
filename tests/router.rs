mod common;

use std::sync::Arc;

use axum::{
  body::{to_bytes, Body},
  http::{header, Method, Request, StatusCode},
  Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use logiclinks_frontend::canned;
use logiclinks_frontend::routes::build_router;
use logiclinks_frontend::state::AppState;

use common::{config_for, dead_origin, spawn_stub, PACK_BODY};

const BOUNDARY: &str = "logiclinks-test-boundary";

fn app_for(base_url: &str) -> (Router, Arc<AppState>) {
  let state = Arc::new(AppState::new(config_for(base_url)).unwrap());
  (build_router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
  let res = app.clone().oneshot(req).await.unwrap();
  let status = res.status();
  let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  (status, body.to_vec())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
  let req = Request::builder()
    .method(Method::POST)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  let (status, bytes) = send(app, req).await;
  (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
  send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn upload_request(subject: &str, title: &str, with_file: bool) -> Request<Body> {
  let mut body = String::new();
  for (name, value) in [("subject", subject), ("title", title), ("description", "Chapter 3")] {
    body.push_str(&format!(
      "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    ));
  }
  if with_file {
    body.push_str(&format!(
      "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\nContent-Type: text/plain\r\n\r\nmitochondria make ATP\r\n"
    ));
  }
  body.push_str(&format!("--{BOUNDARY}--\r\n"));
  Request::builder()
    .method(Method::POST)
    .uri("/api/v1/offline-pack")
    .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
    .body(Body::from(body))
    .unwrap()
}

fn alerts(out: &Value) -> Vec<Value> {
  out["events"]
    .as_array()
    .unwrap()
    .iter()
    .filter(|e| e["kind"] == "alert")
    .cloned()
    .collect()
}

#[tokio::test]
async fn health_reports_backend_origin() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&format!("{}/", stub.base_url));
  let (status, body) = get(&app, "/api/v1/health").await;
  assert_eq!(status, StatusCode::OK);
  let v: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(v, json!({"ok": true, "backend": stub.base_url}));
}

#[tokio::test]
async fn blank_topic_is_rejected_before_any_fetch() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);
  let (status, out) = post_json(&app, "/api/v1/quiz", json!({"topic": "   "})).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(out["error"]["code"], "validation");
  assert_eq!(alerts(&out).len(), 1);
  assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn quiz_uses_default_difficulty() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);
  let (status, out) = post_json(&app, "/api/v1/quiz", json!({"topic": "sets"})).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["result"]["questions"][0]["text"], "Mock Question about sets (medium)?");
  assert!(alerts(&out).is_empty());
}

#[tokio::test]
async fn quiz_against_dead_backend_alerts_once() {
  let origin = dead_origin().await;
  let (app, _) = app_for(&origin);
  let (status, out) = post_json(&app, "/api/v1/quiz", json!({"topic": "sets", "difficulty": "easy"})).await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  let alerts = alerts(&out);
  assert_eq!(alerts.len(), 1);
  let message = alerts[0]["message"].as_str().unwrap();
  assert!(message.starts_with("Connection Failed!"));
  assert!(message.ends_with(&format!("\nTarget: {}", origin)), "{message}");
}

#[tokio::test]
async fn quiz_in_flight_is_shared_across_clients() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);

  let first = {
    let app = app.clone();
    tokio::spawn(async move { post_json(&app, "/api/v1/quiz", json!({"topic": "slow"})).await })
  };
  while stub.hits() == 0 {
    tokio::task::yield_now().await;
  }

  let (status, out) = post_json(&app, "/api/v1/quiz", json!({"topic": "sets"})).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(out["error"]["code"], "busy");
  assert_eq!(out["events"], json!([]));

  stub.release();
  let (status, out) = first.await.unwrap();
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["result"]["questions"][0]["text"], "Mock Question about slow (medium)?");
  assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn practice_answer_is_graded_after_upload() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);
  let (status, _) = send(&app, upload_request("biology", "Cells", true)).await;
  assert_eq!(status, StatusCode::OK);

  let answer = |option: &str, question: usize| {
    json!({"subject": "biology", "title": "Cells", "question": question, "option": option})
  };
  let (status, out) = post_json(&app, "/api/v1/offline-pack/answer", answer("Mitochondria", 0)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["result"], true);
  assert_eq!(alerts(&out), vec![json!({"kind": "alert", "message": "Correct!"})]);

  let (_, out) = post_json(&app, "/api/v1/offline-pack/answer", answer("Nucleus", 0)).await;
  assert_eq!(out["result"], false);
  assert_eq!(alerts(&out), vec![json!({"kind": "alert", "message": "Try again!"})]);

  let (status, out) = post_json(&app, "/api/v1/offline-pack/answer", answer("Nucleus", 4)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["result"], Value::Null);
  assert!(alerts(&out).is_empty());
}

#[tokio::test]
async fn assistant_chat_falls_back_silently_and_is_recorded() {
  let origin = dead_origin().await;
  let (app, state) = app_for(&origin);
  let (status, out) =
    post_json(&app, "/api/v1/chat", json!({"message": "explain derivative", "surface": "assistant"})).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["ok"], true);
  assert_eq!(out["result"]["local"], true);
  assert_eq!(out["result"]["response"], canned::CALCULUS);
  assert!(alerts(&out).is_empty());
  assert_eq!(state.history.read().await.entries().len(), 2);

  let (status, body) = get(&app, "/api/v1/assistant/export").await;
  assert_eq!(status, StatusCode::OK);
  let text = String::from_utf8(body).unwrap();
  assert!(text.starts_with("EnWise AI Chat Export\n"));
  assert!(text.contains("explain derivative"));
  assert!(text.contains("[AI] "));

  let req = Request::builder().method(Method::DELETE).uri("/api/v1/assistant/history").body(Body::empty()).unwrap();
  let (status, _) = send(&app, req).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (_, body) = get(&app, "/api/v1/assistant/history").await;
  let v: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(v["entries"], json!([]));
}

#[tokio::test]
async fn widget_chat_is_not_recorded_in_assistant_history() {
  let stub = spawn_stub().await;
  let (app, state) = app_for(&stub.base_url);
  let (status, out) = post_json(&app, "/api/v1/chat", json!({"message": "hello"})).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(out["result"]["response"], "echo: hello");
  assert!(state.history.read().await.is_empty());
}

#[tokio::test]
async fn uploaded_pack_reads_back_byte_identical() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);

  let (status, body) = send(&app, upload_request("biology", "Cells", true)).await;
  assert_eq!(status, StatusCode::OK);
  let out: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(out["result"]["quiz"][0]["a"], "Mitochondria");
  let kinds: Vec<&str> = out["events"].as_array().unwrap().iter().map(|e| e["kind"].as_str().unwrap()).collect();
  assert_eq!(kinds.first(), Some(&"upload_busy"));
  assert!(kinds.contains(&"close_upload_modal"));

  let seen = stub.uploads();
  assert_eq!(seen[0].chapter, "Chapter 3");
  assert_eq!(seen[0].file_name, "notes.txt");

  let (status, body) = get(&app, "/api/v1/offline-pack?subject=biology&title=Cells").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, PACK_BODY.as_bytes());

  let (_, body) = get(&app, "/api/v1/offline-packs").await;
  let v: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(v["keys"], json!(["offline_biology_Cells"]));
}

#[tokio::test]
async fn upload_without_file_is_blocked() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);
  let (status, body) = send(&app, upload_request("biology", "Cells", false)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let out: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(alerts(&out).len(), 1);
  assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn failed_upload_alerts_once_and_saves_nothing() {
  let stub = spawn_stub().await;
  let (app, _) = app_for(&stub.base_url);
  let (status, body) = send(&app, upload_request("broken", "Cells", true)).await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
  let out: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(alerts(&out).len(), 1);
  let last = out["events"].as_array().unwrap().last().cloned().unwrap();
  assert_eq!(last, json!({"kind": "upload_busy", "busy": false}));

  let (status, _) = get(&app, "/api/v1/offline-pack?subject=broken&title=Cells").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
