//! Search request building

use crate::error::ClientError;
use crate::preferences::{normalize_backend, Preferences, SafeSearch};
use serde::{Deserialize, Serialize};
use url::Url;

/// Per-call overrides; a present field wins over the stored preference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub backend: Option<String>,
    pub language: Option<String>,
    pub page: Option<u32>,
    pub categories: Option<String>,
    pub safe_search: Option<SafeSearch>,
}

impl SearchOptions {
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    pub fn with_safe_search(mut self, level: SafeSearch) -> Self {
        self.safe_search = Some(level);
        self
    }
}

/// A fully resolved search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub backend: String,
    pub language: String,
    /// Page number (1-indexed)
    pub pageno: u32,
    pub categories: String,
    pub safesearch: SafeSearch,
}

impl SearchRequest {
    /// Merge call-time overrides over stored preferences
    pub fn resolve(query: impl Into<String>, prefs: &Preferences, options: &SearchOptions) -> Self {
        let non_empty = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);

        Self {
            query: query.into(),
            backend: non_empty(&options.backend)
                .map(|b| normalize_backend(&b))
                .unwrap_or_else(|| normalize_backend(&prefs.backend)),
            language: non_empty(&options.language).unwrap_or_else(|| prefs.language.clone()),
            pageno: options.page.unwrap_or(1).max(1),
            categories: non_empty(&options.categories).unwrap_or_else(|| prefs.categories.clone()),
            safesearch: options.safe_search.unwrap_or(prefs.safe_search),
        }
    }

    /// Query string pairs for the JSON endpoint, in wire order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("format", "json".to_string()),
            ("language", self.language.clone()),
            ("pageno", self.pageno.to_string()),
            ("categories", self.categories.clone()),
            ("safesearch", self.safesearch.level().to_string()),
        ]
    }

    pub fn endpoint(&self) -> String {
        format!("{}/search", self.backend)
    }

    /// Complete JSON endpoint URL
    pub fn url(&self) -> Result<Url, ClientError> {
        let params = self.params();
        Url::parse_with_params(&self.endpoint(), params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| ClientError::InvalidBackend {
                url: self.backend.clone(),
                reason: e.to_string(),
            })
    }
}

/// Human-facing results page for `query`, as opened in a browser
pub fn search_url(query: &str, prefs: &Preferences, options: &SearchOptions) -> Result<Url, ClientError> {
    let request = SearchRequest::resolve(query, prefs, options);
    Url::parse_with_params(
        &request.endpoint(),
        [("q", request.query.as_str()), ("language", request.language.as_str())],
    )
    .map_err(|e| ClientError::InvalidBackend {
        url: request.backend.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_preferences() {
        let prefs = Preferences {
            language: "es".to_string(),
            safe_search: SafeSearch::Strict,
            categories: "news".to_string(),
            ..Default::default()
        };
        let request = SearchRequest::resolve("hola", &prefs, &SearchOptions::default());

        assert_eq!(request.backend, "https://search.aivorysdev.com");
        assert_eq!(request.language, "es");
        assert_eq!(request.pageno, 1);
        assert_eq!(request.categories, "news");
        assert_eq!(request.safesearch, SafeSearch::Strict);
    }

    #[test]
    fn test_overrides_win_including_safe_search_off() {
        let prefs = Preferences::default();
        let options = SearchOptions::default()
            .with_backend("https://searx.example//")
            .with_language("pt-BR")
            .with_page(3)
            .with_categories("images")
            .with_safe_search(SafeSearch::Off);
        let request = SearchRequest::resolve("gatos", &prefs, &options);

        assert_eq!(request.backend, "https://searx.example");
        assert_eq!(request.language, "pt-BR");
        assert_eq!(request.pageno, 3);
        assert_eq!(request.categories, "images");
        assert_eq!(request.safesearch, SafeSearch::Off);
    }

    #[test]
    fn test_blank_overrides_and_page_zero() {
        let prefs = Preferences::default();
        let options = SearchOptions {
            language: Some("  ".to_string()),
            page: Some(0),
            ..Default::default()
        };
        let request = SearchRequest::resolve("q", &prefs, &options);
        assert_eq!(request.language, "en");
        assert_eq!(request.pageno, 1);
    }

    #[test]
    fn test_url_parameter_order_and_encoding() {
        let request = SearchRequest::resolve("rust & go", &Preferences::default(), &SearchOptions::default());
        assert_eq!(
            request.url().unwrap().as_str(),
            "https://search.aivorysdev.com/search?q=rust+%26+go&format=json&language=en&pageno=1&categories=general&safesearch=1"
        );
    }

    #[test]
    fn test_search_url_for_browser() {
        let prefs = Preferences {
            backend: "https://searx.example/".to_string(),
            language: "es".to_string(),
            ..Default::default()
        };
        let url = search_url("café", &prefs, &SearchOptions::default()).unwrap();
        assert_eq!(url.as_str(), "https://searx.example/search?q=caf%C3%A9&language=es");
    }

    #[test]
    fn test_invalid_backend() {
        let options = SearchOptions::default().with_backend("not a url");
        let err = SearchRequest::resolve("q", &Preferences::default(), &options)
            .url()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidBackend { .. }));
    }
}
