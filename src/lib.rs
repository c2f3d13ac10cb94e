//! searxng-client: a search front end for self-hosted SearXNG instances
//!
//! Keeps a small preferences record, builds queries against the backend's
//! JSON API, and serves debounced autocomplete suggestions.

pub mod autocomplete;
pub mod config;
pub mod error;
pub mod locales;
pub mod navigation;
pub mod network;
pub mod preferences;
pub mod privacy;
pub mod render;
pub mod results;
pub mod search;
pub mod theme;

pub use config::ClientSettings;
pub use error::ClientError;
pub use preferences::{PreferenceStore, Preferences};
pub use results::{SearchResponse, SearchResult};
pub use search::{SearchClient, SearchOptions};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend used until the user configures their own
pub const DEFAULT_BACKEND: &str = "https://search.aivorysdev.com";
