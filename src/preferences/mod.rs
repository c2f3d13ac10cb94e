//! Preferences store
//!
//! Loads and saves the fixed-shape preferences record against a pluggable
//! key-value backend. Unset or unreadable fields come back as defaults.

mod model;
mod storage;

pub use model::*;
pub use storage::*;

use crate::config::{StorageKind, StorageSettings};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("unknown preference: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Reads and writes preferences through a storage backend
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Pick the backend for this host from the storage settings
    pub fn from_settings(settings: &StorageSettings) -> Self {
        let backend: Arc<dyn KeyValueStore> = match (settings.kind, settings.resolved_path()) {
            (StorageKind::Memory, _) => Arc::new(MemoryStore::new()),
            (StorageKind::None, _) => Arc::new(NullStore),
            (StorageKind::Sync, Some(path)) => Arc::new(JsonFileStore::new(path)),
            (StorageKind::Local, Some(path)) => Arc::new(LocalStorageStore::new(path)),
            (kind, None) => {
                warn!("No location for {:?} preference storage, preferences will not persist", kind);
                Arc::new(NullStore)
            }
        };
        debug!("Using {} preference storage", backend.name());
        Self::new(backend)
    }

    /// An in-memory store, mostly for tests
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Load the record, filling unset fields with defaults
    pub async fn load(&self) -> Result<Preferences, PreferencesError> {
        let stored = self.backend.get_all().await?;
        Ok(merge_defaults(stored))
    }

    /// Load the record, falling back to defaults when storage cannot be read
    pub async fn load_or_default(&self) -> Preferences {
        match self.load().await {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Failed to load preferences, using defaults: {}", e);
                Preferences::default()
            }
        }
    }

    /// Write the fields present in `update`
    pub async fn save(&self, update: PreferencesUpdate) -> Result<(), PreferencesError> {
        if update.is_empty() {
            return Ok(());
        }
        let entries = update.into_entries();
        debug!("Saving preferences: {:?}", entries.keys().collect::<Vec<_>>());
        self.backend.set_many(entries).await?;
        Ok(())
    }

    /// Read a single field
    pub async fn get(&self, key: PreferenceKey) -> Result<Value, PreferencesError> {
        Ok(self.load().await?.value(key))
    }

    /// Write a single field
    pub async fn set(&self, key: PreferenceKey, value: Value) -> Result<(), PreferencesError> {
        let mut update = PreferencesUpdate::default();
        update.set_value(key, value)?;
        self.save(update).await
    }

    /// Write every default
    pub async fn reset(&self) -> Result<(), PreferencesError> {
        self.save(PreferencesUpdate::full(&Preferences::default())).await
    }
}

fn merge_defaults(stored: Map<String, Value>) -> Preferences {
    let mut prefs = Preferences::default();
    for key in PreferenceKey::ALL {
        let Some(value) = stored.get(key.as_str()) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if let Err(e) = prefs.apply(key, value.clone()) {
            warn!("Ignoring stored preference: {}", e);
        }
    }
    prefs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use serde_json::json;

    fn store_with(value: Value) -> PreferenceStore {
        let items = value.as_object().cloned().unwrap();
        PreferenceStore::new(Arc::new(MemoryStore::with_items(items)))
    }

    #[tokio::test]
    async fn test_load_empty_gives_defaults() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.load().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_load_fills_missing_and_invalid_fields() {
        let store = store_with(json!({
            "language": "pt-BR",
            "safeSearch": 9,
            "theme": "dark",
            "openInNewTab": null,
            "unrelated": "kept out",
        }));

        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.language, "pt-BR");
        assert_eq!(prefs.safe_search, SafeSearch::Moderate);
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(!prefs.open_in_new_tab);
    }

    #[tokio::test]
    async fn test_save_is_partial() {
        let store = store_with(json!({"language": "es", "theme": "light"}));
        store
            .save(PreferencesUpdate {
                theme: Some(Theme::Dark),
                ..Default::default()
            })
            .await
            .unwrap();

        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.language, "es");
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_set_and_get_single_field() {
        let store = PreferenceStore::in_memory();
        store
            .set(PreferenceKey::Backend, json!(" https://searx.example/ "))
            .await
            .unwrap();
        store.set(PreferenceKey::SafeSearch, json!(0)).await.unwrap();

        assert_eq!(
            store.get(PreferenceKey::Backend).await.unwrap(),
            json!("https://searx.example")
        );
        assert_eq!(store.get(PreferenceKey::SafeSearch).await.unwrap(), json!(0));
    }

    #[tokio::test]
    async fn test_set_rejects_invalid_value() {
        let store = PreferenceStore::in_memory();
        let err = store.set(PreferenceKey::SafeSearch, json!(5)).await.unwrap_err();
        assert!(matches!(err, PreferencesError::InvalidValue { .. }));
        assert_eq!(store.load().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let store = store_with(json!({"language": "es", "openInNewTab": true}));
        store.reset().await.unwrap();
        assert_eq!(store.load().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_blank_language_keeps_query_valid() {
        let store = PreferenceStore::in_memory();
        let blank = PreferenceKey::Language.parse_value("   ").unwrap();
        store.set(PreferenceKey::Language, blank).await.unwrap();

        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.language, "en");
        let url = crate::search::SearchRequest::resolve("q", &prefs, &Default::default())
            .url()
            .unwrap();
        assert!(url.as_str().contains("language=en&"));
    }

    #[tokio::test]
    async fn test_local_storage_from_settings_keeps_every_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::from_settings(&StorageSettings {
            kind: StorageKind::Local,
            path: Some(dir.path().join("local-storage.json")),
        });
        assert_eq!(store.backend_name(), "local");

        store.set(PreferenceKey::Language, json!("es")).await.unwrap();
        store.set(PreferenceKey::Theme, json!("dark")).await.unwrap();

        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.language, "es");
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_in_memory_store_blocking() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.backend_name(), "memory");
        tokio_test::block_on(store.set(PreferenceKey::Theme, json!("dark"))).unwrap();
        let prefs = tokio_test::block_on(store.load()).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_null_storage_is_inert() {
        let store = PreferenceStore::new(Arc::new(NullStore));
        store.set(PreferenceKey::Language, json!("es")).await.unwrap();
        assert_eq!(store.load().await.unwrap().language, "en");
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = PreferenceStore::from_settings(&StorageSettings {
            kind: StorageKind::Sync,
            path: Some(path),
        });

        assert!(store.load().await.is_err());
        assert_eq!(store.load_or_default().await, Preferences::default());
    }
}
