//! Settings structures for the client configuration file

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main settings structure matching `client.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub outgoing: OutgoingSettings,
    pub autocomplete: AutocompleteSettings,
    pub ui: UiSettings,
    pub storage: StorageSettings,
}

impl ClientSettings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: ClientSettings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge overrides from SEARXNG_CLIENT_* variables, looked up through `var`
    pub(crate) fn merge_vars<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("SEARXNG_CLIENT_TIMEOUT") {
            match val.parse::<f64>() {
                Ok(timeout) if timeout.is_finite() && timeout > 0.0 => {
                    self.outgoing.request_timeout = timeout;
                }
                _ => warn!("Ignoring SEARXNG_CLIENT_TIMEOUT={}", val),
            }
        }
        if let Some(val) = var("SEARXNG_CLIENT_PROXY") {
            self.outgoing.proxies.all = Some(val);
        }
        if let Some(val) = var("SEARXNG_CLIENT_VERIFY_SSL") {
            self.outgoing.verify_ssl = val.parse().unwrap_or(true);
        }
        if let Some(val) = var("SEARXNG_CLIENT_STORAGE") {
            if let Ok(kind) = val.parse() {
                self.storage.kind = kind;
            }
        }
        if let Some(val) = var("SEARXNG_CLIENT_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("SEARXNG_CLIENT_MAX_RESULTS") {
            if let Ok(max) = val.parse() {
                self.ui.max_results = max;
            }
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Appended to the client user agent
    pub useragent_suffix: Option<String>,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            useragent_suffix: None,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Autocomplete behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSettings {
    /// Maximum number of suggestions shown
    pub limit: usize,
    /// Quiet period after the last keystroke, in milliseconds
    pub debounce_ms: u64,
    /// Minimum trimmed query length before a request is made
    pub min_length: usize,
    /// Lifetime of cached suggestion lists, in seconds (0 disables the cache)
    pub cache_ttl: u64,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            limit: 6,
            debounce_ms: 250,
            min_length: 2,
            cache_ttl: 60,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Results displayed per search
    pub max_results: usize,
    /// Remove tracking parameters from result URLs
    pub strip_tracking: bool,
    /// Name used in omnibox suggestion descriptions
    pub brand: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            max_results: 8,
            strip_tracking: true,
            brand: "Aivorys".to_string(),
        }
    }
}

/// Where preferences are persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub kind: StorageKind,
    /// Overrides the default file location
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    /// Resolved location of the preferences file
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            let name = match self.kind {
                StorageKind::Local => "local-storage.json",
                _ => "preferences.json",
            };
            dirs::config_dir().map(|p| p.join("searxng-client").join(name))
        })
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Flat JSON object, one entry per preference
    #[default]
    Sync,
    /// Whole record serialized under a single key
    Local,
    /// Kept in memory for the lifetime of the process
    Memory,
    /// Nothing is persisted
    None,
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sync" | "file" => Ok(Self::Sync),
            "local" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            "none" | "off" => Ok(Self::None),
            other => Err(format!("unknown storage kind: {}", other)),
        }
    }
}
