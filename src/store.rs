//! Persisted offline study packs: a flat string key-value store.
//!
//! Keys come from `pack_key(subject, title)`. Values are the backend's body text,
//! kept verbatim. Writes are last-writer-wins; there is no expiry or versioning.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::StoreError;

/// Storage key for a saved pack. Same subject and title overwrite each other.
pub fn pack_key(subject: &str, title: &str) -> String {
  format!("offline_{}_{}", subject, title)
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
  async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
  async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
impl KeyValueStore for Box<dyn KeyValueStore> {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    (**self).get(key).await
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    (**self).set(key, value).await
  }

  async fn keys(&self) -> Result<Vec<String>, StoreError> {
    (**self).keys().await
  }
}

#[derive(Default)]
pub struct MemoryStore {
  entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.read().await.get(key).cloned())
  }

  async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    self.entries.write().await.insert(key.to_string(), value);
    Ok(())
  }

  async fn keys(&self) -> Result<Vec<String>, StoreError> {
    Ok(self.entries.read().await.keys().cloned().collect())
  }
}

/// One JSON object on disk, rewritten in full on each `set`.
pub struct FileStore {
  path: PathBuf,
  // Serializes read-modify-write cycles within this process.
  lock: RwLock<()>,
}

impl FileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), lock: RwLock::new(()) }
  }

  async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
    match tokio::fs::read_to_string(&self.path).await {
      Ok(s) if s.trim().is_empty() => Ok(BTreeMap::new()),
      Ok(s) => Ok(serde_json::from_str(&s)?),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
      Err(e) => Err(e.into()),
    }
  }

  async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(dir).await?;
    }
    let tmp = self.path.with_extension("json.tmp");
    tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
    tokio::fs::rename(&tmp, &self.path).await?;
    Ok(())
  }
}

#[async_trait]
impl KeyValueStore for FileStore {
  #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let _g = self.lock.read().await;
    Ok(self.load().await?.remove(key))
  }

  #[instrument(level = "debug", skip(self, value), fields(path = %self.path.display(), value_len = value.len()))]
  async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
    let _g = self.lock.write().await;
    let mut entries = self.load().await?;
    if entries.insert(key.to_string(), value).is_some() {
      info!(target: "store", %key, "Overwrote saved pack");
    } else {
      debug!(target: "store", %key, "Saved new pack");
    }
    self.save(&entries).await
  }

  async fn keys(&self) -> Result<Vec<String>, StoreError> {
    let _g = self.lock.read().await;
    Ok(self.load().await?.into_keys().collect())
  }
}
