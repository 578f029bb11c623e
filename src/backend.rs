//! Client for the remote study backend.
//!
//! Three endpoints are consumed: `/generate-quiz`, `/chat` and `/generate-offline-pack`.
//! Any transport error, non-2xx status or undecodable body becomes a `BackendError`
//! carrying the endpoint URL and a short reason. Nothing is retried here.
//!
//! NOTE: request and response bodies are logged by size only.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::config::BackendConfig;
use crate::domain::{ChatBody, ChatRequest, QuizBody, QuizRequest, QuizResponse, StudyPackResponse, UploadFile};
use crate::error::BackendError;
use crate::util::{trim_origin, trunc_for_log};

const UA: &str = concat!("logiclinks-frontend/", env!("CARGO_PKG_VERSION"));

/// Study pack as decoded, plus the exact body text it was decoded from.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPack {
  pub body: String,
  pub pack: StudyPackResponse,
}

/// The remote API as seen by the orchestrator.
#[async_trait]
pub trait Backend: Send + Sync {
  /// Base URL used for every call.
  fn origin(&self) -> &str;

  async fn generate_quiz(&self, req: &QuizRequest) -> Result<QuizResponse, BackendError>;

  /// `Ok(None)` when the backend answered 2xx without a usable reply field.
  async fn chat(&self, req: &ChatRequest) -> Result<Option<String>, BackendError>;

  async fn generate_offline_pack(
    &self,
    subject: &str,
    chapter: &str,
    file: &UploadFile,
  ) -> Result<RawPack, BackendError>;
}

#[derive(Clone)]
pub struct HttpBackend {
  client: reqwest::Client,
  base_url: String,
}

impl HttpBackend {
  pub fn new(cfg: &BackendConfig) -> Result<Self, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = cfg.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(Self { client: builder.build()?, base_url: trim_origin(&cfg.base_url) })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  /// Send and return the body text of a 2xx response.
  async fn send(&self, target: &str, rb: RequestBuilder) -> Result<String, BackendError> {
    let start = Instant::now();
    let res = rb
      .header(USER_AGENT, UA)
      .send()
      .await
      .map_err(|e| fail(target, e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      let reason = match extract_detail(&body) {
        Some(detail) => format!("Server error: {}: {}", status.as_u16(), detail),
        None => format!("Server error: {}", status.as_u16()),
      };
      error!(target: "backend", %target, %status, body = %trunc_for_log(&body, 200), "Backend returned an error status");
      return Err(fail(target, reason));
    }

    let text = res.text().await.map_err(|e| fail(target, e.to_string()))?;
    info!(target: "backend", %target, %status, elapsed = ?start.elapsed(), body_len = text.len(), "Backend response received");
    Ok(text)
  }
}

#[async_trait]
impl Backend for HttpBackend {
  fn origin(&self) -> &str {
    &self.base_url
  }

  #[instrument(level = "info", skip(self, req), fields(topic_len = req.topic.len(), difficulty = %req.difficulty))]
  async fn generate_quiz(&self, req: &QuizRequest) -> Result<QuizResponse, BackendError> {
    let target = self.url("/generate-quiz");
    let text = self.send(&target, self.client.post(&target).json(req)).await?;
    let body: QuizBody = serde_json::from_str(&text).map_err(|e| fail(&target, format!("JSON parse error: {}", e)))?;
    Ok(body.into())
  }

  #[instrument(level = "info", skip(self, req), fields(message_len = req.message.len(), has_context = req.context.is_some()))]
  async fn chat(&self, req: &ChatRequest) -> Result<Option<String>, BackendError> {
    let target = self.url("/chat");
    let text = self.send(&target, self.client.post(&target).json(req)).await?;
    let body: ChatBody = serde_json::from_str(&text).map_err(|e| fail(&target, format!("JSON parse error: {}", e)))?;
    Ok(body.text())
  }

  #[instrument(level = "info", skip(self, file), fields(%subject, %chapter, file = %file.name, file_len = file.bytes.len()))]
  async fn generate_offline_pack(
    &self,
    subject: &str,
    chapter: &str,
    file: &UploadFile,
  ) -> Result<RawPack, BackendError> {
    let target = self.url("/generate-offline-pack");

    let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
    if let Some(ct) = &file.content_type {
      part = part.mime_str(ct).map_err(|e| fail(&target, e.to_string()))?;
    }
    let form = Form::new()
      .part("file", part)
      .text("subject", subject.to_string())
      .text("chapter", chapter.to_string());

    let body = self.send(&target, self.client.post(&target).multipart(form)).await?;
    let pack: StudyPackResponse =
      serde_json::from_str(&body).map_err(|e| fail(&target, format!("JSON parse error: {}", e)))?;
    Ok(RawPack { body, pack })
  }
}

fn fail(target: &str, reason: String) -> BackendError {
  BackendError { target: target.to_string(), reason }
}

/// Pull `detail` (FastAPI) or `error` (Flask) out of an error body.
fn extract_detail(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct Detail {
    #[serde(default)] detail: Option<serde_json::Value>,
    #[serde(default)] error: Option<String>,
  }
  let d: Detail = serde_json::from_str(body).ok()?;
  match d.detail {
    Some(serde_json::Value::String(s)) => Some(s),
    Some(other) => Some(other.to_string()),
    None => d.error,
  }
}
