//! Key-value storage backends for the preferences record

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Key under which the single-blob store keeps the whole record
pub const LOCAL_STORAGE_KEY: &str = "aivorys_settings";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored data has unexpected shape: {0}")]
    Shape(String),
}

/// Flat key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Whether writes are actually persisted
    fn is_available(&self) -> bool {
        true
    }

    /// Every stored entry
    async fn get_all(&self) -> Result<Map<String, Value>, StorageError>;

    /// Write the given entries, leaving others untouched
    async fn set_many(&self, items: Map<String, Value>) -> Result<(), StorageError>;
}

/// Entries held in memory
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Map<String, Value>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        Ok(self.items.read().await.clone())
    }

    async fn set_many(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        self.items.write().await.extend(items);
        Ok(())
    }
}

/// A JSON file holding one flat object, one entry per preference
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    fn name(&self) -> &str {
        "sync"
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        let _guard = self.lock.read().await;
        read_object(&self.path).await
    }

    async fn set_many(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut current = read_object(&self.path).await?;
        current.extend(items);
        write_json(&self.path, &Value::Object(current)).await
    }
}

/// A JSON file of string entries where the record is serialized under one key
pub struct LocalStorageStore {
    path: PathBuf,
    key: String,
    lock: RwLock<()>,
}

impl LocalStorageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: LOCAL_STORAGE_KEY.to_string(),
            lock: RwLock::new(()),
        }
    }
}

#[async_trait]
impl KeyValueStore for LocalStorageStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        let _guard = self.lock.read().await;
        let outer = read_object(&self.path).await?;
        match outer.get(&self.key) {
            None => Ok(Map::new()),
            Some(Value::String(blob)) => match serde_json::from_str(blob)? {
                Value::Object(record) => Ok(record),
                _ => Err(StorageError::Shape(format!("{} is not an object", self.key))),
            },
            Some(_) => Err(StorageError::Shape(format!("{} is not a string", self.key))),
        }
    }

    async fn set_many(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut outer = read_object(&self.path).await?;
        let mut record = match outer.get(&self.key) {
            Some(Value::String(blob)) => match serde_json::from_str(blob) {
                Ok(Value::Object(record)) => record,
                _ => Map::new(),
            },
            _ => Map::new(),
        };
        record.extend(items);
        let blob = serde_json::to_string(&Value::Object(record))?;
        outer.insert(self.key.clone(), Value::String(blob));
        write_json(&self.path, &Value::Object(outer)).await
    }
}

/// No storage on this host: reads are empty and writes are dropped
pub struct NullStore;

#[async_trait]
impl KeyValueStore for NullStore {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn get_all(&self) -> Result<Map<String, Value>, StorageError> {
        Ok(Map::new())
    }

    async fn set_many(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        debug!("Dropping {} preference entries, no storage available", items.len());
        Ok(())
    }
}

async fn read_object(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(StorageError::Shape(format!(
            "{} does not hold a JSON object",
            path.display()
        ))),
    }
}

async fn write_json(path: &Path, value: &Value) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}
