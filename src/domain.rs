//! Domain models exchanged with the remote backend: quiz, chat and offline study packs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Quiz difficulty sent to `/generate-quiz`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

impl std::fmt::Display for Difficulty {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    };
    f.write_str(s)
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizRequest {
  pub topic: String,
  pub difficulty: Difficulty,
}

/// A generated question. Older backends name the prompt `question` instead of `text`.
/// Decoding never fails on field types: scalars are printed as text, a blank or
/// null prompt falls through to `question` and then to `"Question"`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(from = "QuestionWire")]
pub struct Question {
  pub text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub answer: Option<String>,
}

#[derive(Deserialize)]
struct QuestionWire {
  #[serde(default)] text: Option<Value>,
  #[serde(default)] question: Option<Value>,
  #[serde(default)] options: Option<Value>,
  #[serde(default)] answer: Option<Value>,
}

impl From<QuestionWire> for Question {
  fn from(w: QuestionWire) -> Self {
    let text = w
      .text
      .and_then(truthy_text)
      .or_else(|| w.question.and_then(truthy_text))
      .unwrap_or_else(|| "Question".to_string());
    Self {
      text,
      options: w.options.and_then(text_list),
      answer: w.answer.filter(|v| !v.is_null()).map(|v| display(&v)),
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct QuizResponse {
  #[serde(default, deserialize_with = "null_as_default")]
  pub questions: Vec<Question>,
}

/// Body shapes accepted from `/generate-quiz`: the wrapped object or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum QuizBody {
  Wrapped(QuizResponse),
  Bare(Vec<Question>),
}

impl From<QuizBody> for QuizResponse {
  fn from(body: QuizBody) -> Self {
    match body {
      QuizBody::Wrapped(r) => r,
      QuizBody::Bare(questions) => QuizResponse { questions },
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub context: Option<String>,
  #[serde(default, rename = "allowExploration", skip_serializing_if = "Option::is_none")]
  pub allow_exploration: Option<bool>,
}

/// Raw `/chat` body; either field may carry the reply.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ChatBody {
  #[serde(default)] pub response: Option<Value>,
  #[serde(default)] pub message: Option<Value>,
}

impl ChatBody {
  /// First non-empty of `response`, then `message`.
  pub fn text(self) -> Option<String> {
    self.response.and_then(truthy_text).or_else(|| self.message.and_then(truthy_text))
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
  pub response: String,
  /// True when the text came from the local responder instead of the backend.
  #[serde(default)]
  pub local: bool,
}

/// Which chat panel the message was typed into.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatSurface {
  /// Small chat box on the landing page.
  #[default]
  Widget,
  /// Full-page assistant.
  Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
  pub name: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

pub const DEFAULT_CHAPTER: &str = "General Chapter";

/// Notes upload that becomes an offline study pack.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadPack {
  pub subject: String,
  pub title: String,
  pub chapter: Option<String>,
  pub file: Option<UploadFile>,
}

impl UploadPack {
  pub fn chapter_or_default(&self) -> &str {
    match self.chapter.as_deref().map(str::trim) {
      Some(c) if !c.is_empty() => c,
      _ => DEFAULT_CHAPTER,
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "PackQuestionWire")]
pub struct PackQuestion {
  pub q: String,
  pub options: Vec<String>,
  pub a: String,
}

#[derive(Deserialize)]
struct PackQuestionWire {
  #[serde(default)] q: Option<Value>,
  #[serde(default)] options: Option<Value>,
  #[serde(default)] a: Option<Value>,
}

impl From<PackQuestionWire> for PackQuestion {
  fn from(w: PackQuestionWire) -> Self {
    let text = |v: Option<Value>| v.filter(|v| !v.is_null()).map(|v| display(&v)).unwrap_or_default();
    Self { q: text(w.q), options: w.options.and_then(text_list).unwrap_or_default(), a: text(w.a) }
  }
}

impl PackQuestion {
  pub fn is_correct(&self, option: &str) -> bool {
    option == self.a
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct StudyPackResponse {
  #[serde(default, deserialize_with = "lenient_text_list")]
  pub summary: Vec<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub quiz: Vec<PackQuestion>,
}

/// Print a JSON value the way a template string would: strings bare, the rest as JSON.
fn display(v: &Value) -> String {
  match v {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Text of a value that counts as present: `null`, `false`, `0` and `""` do not.
fn truthy_text(v: Value) -> Option<String> {
  match v {
    Value::Null | Value::Bool(false) => None,
    Value::String(s) if s.is_empty() => None,
    Value::Number(n) if n.as_f64() == Some(0.0) => None,
    other => Some(display(&other)),
  }
}

fn text_list(v: Value) -> Option<Vec<String>> {
  match v {
    Value::Array(items) => Some(items.iter().map(display).collect()),
    _ => None,
  }
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn lenient_text_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Value>::deserialize(d)?.and_then(text_list).unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_accepts_legacy_field_and_defaults() {
    let q: Question = serde_json::from_str(r#"{"question":"Why?","options":["a","b"]}"#).unwrap();
    assert_eq!(q.text, "Why?");
    let q: Question = serde_json::from_str(r#"{"id":3}"#).unwrap();
    assert_eq!(q.text, "Question");
    assert!(q.options.is_none());
  }

  #[test]
  fn quiz_body_accepts_bare_list_and_missing_field() {
    let r: QuizResponse = serde_json::from_str::<QuizBody>(r#"[{"text":"A?"}]"#).unwrap().into();
    assert_eq!(r.questions.len(), 1);
    let r: QuizResponse = serde_json::from_str::<QuizBody>("{}").unwrap().into();
    assert!(r.questions.is_empty());
  }

  #[test]
  fn chat_request_omits_optional_fields() {
    let req = ChatRequest { message: "hi".into(), context: None, allow_exploration: None };
    assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hi"}"#);
    let req = ChatRequest { message: "hi".into(), context: Some("educational".into()), allow_exploration: Some(true) };
    assert_eq!(
      serde_json::to_string(&req).unwrap(),
      r#"{"message":"hi","context":"educational","allowExploration":true}"#
    );
  }

  #[test]
  fn chat_body_prefers_response_then_message() {
    let b: ChatBody = serde_json::from_str(r#"{"response":"r","message":"m"}"#).unwrap();
    assert_eq!(b.text().as_deref(), Some("r"));
    let b: ChatBody = serde_json::from_str(r#"{"response":"","message":"m"}"#).unwrap();
    assert_eq!(b.text().as_deref(), Some("m"));
    let b: ChatBody = serde_json::from_str("{}").unwrap();
    assert_eq!(b.text(), None);
  }

  #[test]
  fn quiz_with_odd_field_types_still_decodes() {
    let body = r#"{"questions": [
      {"text": "2+2?", "options": [3, 4, 5, 6], "answer": 4},
      {"text": "A?", "question": "A?"},
      {"text": null, "question": "B?"},
      {"text": "", "options": "none", "answer": null}
    ]}"#;
    let r: QuizResponse = serde_json::from_str::<QuizBody>(body).unwrap().into();
    assert_eq!(r.questions[0].options.as_deref(), Some(&["3", "4", "5", "6"].map(String::from)[..]));
    assert_eq!(r.questions[0].answer.as_deref(), Some("4"));
    assert_eq!(r.questions[1].text, "A?");
    assert_eq!(r.questions[2].text, "B?");
    assert_eq!(r.questions[3].text, "Question");
    assert_eq!(r.questions[3].options, None);
    assert_eq!(r.questions[3].answer, None);
  }

  #[test]
  fn null_questions_is_an_empty_quiz() {
    let r: QuizResponse = serde_json::from_str::<QuizBody>(r#"{"questions": null}"#).unwrap().into();
    assert!(r.questions.is_empty());
  }

  #[test]
  fn chat_body_prints_non_string_replies() {
    let b: ChatBody = serde_json::from_str(r#"{"response": 42}"#).unwrap();
    assert_eq!(b.text().as_deref(), Some("42"));
    let b: ChatBody = serde_json::from_str(r#"{"response": null, "message": "m"}"#).unwrap();
    assert_eq!(b.text().as_deref(), Some("m"));
  }

  #[test]
  fn study_pack_with_odd_field_types_still_decodes() {
    let body = r#"{"summary": ["Limits", 2, null], "quiz": [{"q": 7, "options": [1, "two"], "a": 1}, {"q": "Empty?"}]}"#;
    let pack: StudyPackResponse = serde_json::from_str(body).unwrap();
    assert_eq!(pack.summary, vec!["Limits", "2", "null"]);
    assert_eq!(pack.quiz[0].q, "7");
    assert_eq!(pack.quiz[0].options, vec!["1", "two"]);
    assert!(pack.quiz[0].is_correct("1"));
    assert!(!pack.quiz[0].is_correct("two"));
    assert!(pack.quiz[1].options.is_empty());
    assert_eq!(pack.quiz[1].a, "");

    let pack: StudyPackResponse = serde_json::from_str(r#"{"summary": null, "quiz": null}"#).unwrap();
    assert_eq!(pack, StudyPackResponse::default());
  }

  #[test]
  fn chapter_defaults_when_blank() {
    let mut up = UploadPack { subject: "math".into(), title: "t".into(), chapter: Some("  ".into()), file: None };
    assert_eq!(up.chapter_or_default(), DEFAULT_CHAPTER);
    up.chapter = Some("Limits".into());
    assert_eq!(up.chapter_or_default(), "Limits");
  }
}
