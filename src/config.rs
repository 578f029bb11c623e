//! Client configuration: backend origin, offline-pack store, UI defaults and host settings.
//!
//! Sources, lowest to highest precedence:
//!   1. built-in defaults
//!   2. TOML file at LOGICLINKS_CONFIG_PATH
//!   3. environment overrides (LOGICLINKS_BACKEND_URL, LOGICLINKS_STORE_PATH,
//!      LOGICLINKS_STATIC_DIR, PORT)

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Difficulty;
use crate::util::trim_origin;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
  #[serde(default)]
  pub backend: BackendConfig,
  #[serde(default)]
  pub store: StoreConfig,
  #[serde(default)]
  pub ui: UiConfig,
  #[serde(default)]
  pub server: ServerConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BackendConfig {
  #[serde(default = "default_backend_url")]
  pub base_url: String,
  /// Absent means requests wait as long as the platform lets them.
  #[serde(default)]
  pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
  fn default() -> Self {
    Self { base_url: default_backend_url(), timeout_secs: None }
  }
}

fn default_backend_url() -> String {
  DEFAULT_BACKEND_URL.into()
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
  #[default]
  File,
  Memory,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreConfig {
  #[serde(default)]
  pub kind: StoreKind,
  #[serde(default = "default_store_path")]
  pub path: PathBuf,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self { kind: StoreKind::File, path: default_store_path() }
  }
}

fn default_store_path() -> PathBuf {
  PathBuf::from("./data/offline_packs.json")
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UiConfig {
  #[serde(default)]
  pub default_difficulty: Difficulty,
  /// Context hint sent with full-page assistant messages.
  #[serde(default = "default_assistant_context")]
  pub assistant_context: String,
}

impl Default for UiConfig {
  fn default() -> Self {
    Self { default_difficulty: Difficulty::Medium, assistant_context: default_assistant_context() }
  }
}

fn default_assistant_context() -> String {
  "educational".into()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ServerConfig {
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_static_dir")]
  pub static_dir: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { port: default_port(), static_dir: default_static_dir() }
  }
}

fn default_port() -> u16 { 3000 }

fn default_static_dir() -> PathBuf {
  PathBuf::from("./static")
}

impl ClientConfig {
  /// Parse TOML text; origin is normalized.
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    let mut cfg: ClientConfig = toml::from_str(s)?;
    cfg.backend.base_url = trim_origin(&cfg.backend.base_url);
    Ok(cfg)
  }

  /// Load file (if configured) then apply environment overrides.
  /// A missing or malformed file is logged and the defaults are used instead.
  pub fn from_env() -> Self {
    let mut cfg = load_file_from_env().unwrap_or_default();
    cfg.apply_overrides(|k| std::env::var(k).ok());
    cfg
  }

  /// Apply overrides from any key lookup (the process environment in production).
  pub fn apply_overrides<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = lookup("LOGICLINKS_BACKEND_URL").filter(|s| !s.trim().is_empty()) {
      self.backend.base_url = url;
    }
    self.backend.base_url = trim_origin(&self.backend.base_url);

    if let Some(path) = lookup("LOGICLINKS_STORE_PATH").filter(|s| !s.trim().is_empty()) {
      self.store.path = PathBuf::from(path);
    }
    if let Some(dir) = lookup("LOGICLINKS_STATIC_DIR").filter(|s| !s.trim().is_empty()) {
      self.server.static_dir = PathBuf::from(dir);
    }
    if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
      self.server.port = port;
    }
  }
}

fn load_file_from_env() -> Option<ClientConfig> {
  let path = std::env::var("LOGICLINKS_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match ClientConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "logiclinks", %path, "Loaded client config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "logiclinks", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "logiclinks", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
