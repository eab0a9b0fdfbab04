use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// String key/value namespace with write-through persistence, one
/// `<key>.json` file per entry. Values are stored exactly as given.
pub struct LocalStore {
    dir: Option<PathBuf>,
    items: RwLock<HashMap<String, String>>,
}

impl LocalStore {
    /// Opens (creating if needed) a directory-backed store and loads every entry.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let mut items = HashMap::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_valid_key(key) {
                warn!("Skipping unexpected file in store directory: {}", path.display());
                continue;
            }
            items.insert(key.to_string(), fs::read_to_string(&path).await?);
        }

        debug!("Opened store at {} with {} entries", dir.display(), items.len());

        Ok(Self {
            dir: Some(dir),
            items: RwLock::new(items),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            dir: None,
            items: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        validate_key(key)?;

        let mut items = self.items.write().await;
        if let Some(dir) = &self.dir {
            let target = dir.join(format!("{}.json", key));
            let staging = dir.join(format!(".{}.json.tmp", key));
            fs::write(&staging, value.as_bytes()).await?;
            fs::rename(&staging, &target).await?;
        }
        items.insert(key.to_string(), value);
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;

        let mut items = self.items.write().await;
        let existed = items.remove(key).is_some();
        if existed {
            if let Some(dir) = &self.dir {
                fs::remove_file(dir.join(format!("{}.json", key))).await?;
            }
        }
        Ok(existed)
    }

    /// Reads and parses a JSON entry. Absent or unparsable entries yield `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_item(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unparsable value under '{}': {}", key, e);
                None
            }
        }
    }

    pub async fn load_or_else<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.load(key).await.unwrap_or_else(default)
    }

    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, raw).await
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
