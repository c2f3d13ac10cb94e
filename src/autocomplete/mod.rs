//! Autocomplete client
//!
//! Fetches suggestions from the backend's `/autocompleter` endpoint and
//! debounces requests against keystrokes.

mod backends;
mod debounce;

pub use backends::parse_suggestions;
pub use debounce::{Debouncer, SuggestionEvent};

use crate::config::AutocompleteSettings;
use crate::network::HttpClient;
use crate::preferences::normalize_backend;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// Anything that can turn partial input into suggestions
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Suggestions for `query`; failures yield an empty list
    async fn suggest(&self, query: &str) -> Vec<String>;
}

/// Client for `{backend}/autocompleter?q=`
#[derive(Clone)]
pub struct AutocompleteClient {
    client: HttpClient,
    backend: String,
    limit: usize,
    min_length: usize,
    cache: Option<Cache<String, Vec<String>>>,
}

impl AutocompleteClient {
    pub fn new(client: HttpClient, backend: &str, settings: &AutocompleteSettings) -> Self {
        let cache = (settings.cache_ttl > 0).then(|| {
            Cache::builder()
                .time_to_live(Duration::from_secs(settings.cache_ttl))
                .max_capacity(256)
                .build()
        });

        Self {
            client,
            backend: normalize_backend(backend),
            limit: settings.limit,
            min_length: settings.min_length,
            cache,
        }
    }

    /// Endpoint URL for a query
    pub fn url_for(&self, query: &str) -> String {
        format!("{}/autocompleter?q={}", self.backend, urlencoding::encode(query))
    }

    /// Fetch, filter and cap suggestions
    pub async fn fetch(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        if query.chars().count() < self.min_length {
            return vec![];
        }

        let key = self.url_for(query);
        if let Some(ref cache) = self.cache {
            if let Some(hit) = cache.get(&key).await {
                debug!("Autocomplete cache hit for '{}'", query);
                return hit;
            }
        }

        let suggestions = match self.client.get_json(&key, &[], None).await {
            Ok(response) => {
                let mut suggestions = parse_suggestions(&response.body);
                suggestions.truncate(self.limit);
                suggestions
            }
            Err(e) => {
                debug!("Autocomplete failed for '{}': {}", query, e);
                return vec![];
            }
        };

        if let Some(ref cache) = self.cache {
            cache.insert(key, suggestions.clone()).await;
        }
        suggestions
    }
}

#[async_trait]
impl SuggestionSource for AutocompleteClient {
    async fn suggest(&self, query: &str) -> Vec<String> {
        self.fetch(query).await
    }
}
