//! Search execution against the backend's JSON endpoint

use super::models::{SearchOptions, SearchRequest};
use crate::error::ClientError;
use crate::network::HttpClient;
use crate::preferences::Preferences;
use crate::privacy::TrackerRemover;
use crate::results::SearchResponse;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Issues `/search` requests and normalizes the responses
#[derive(Clone)]
pub struct SearchClient {
    client: HttpClient,
    tracker_remover: Option<TrackerRemover>,
}

impl SearchClient {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            tracker_remover: None,
        }
    }

    /// Strip tracking parameters from result URLs
    pub fn with_tracker_removal(mut self, enabled: bool) -> Self {
        self.tracker_remover = enabled.then(TrackerRemover::new);
        self
    }

    /// Search; failures come back as an empty response with `error` set
    pub async fn search(
        &self,
        query: &str,
        prefs: &Preferences,
        options: &SearchOptions,
    ) -> SearchResponse {
        let request = SearchRequest::resolve(query, prefs, options);
        match self.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_status() {
                    warn!("Search error: {}", e);
                } else {
                    error!("Search error: {}", e);
                }
                SearchResponse::failed(request.query, request.pageno, e.to_string())
            }
        }
    }

    /// Search, surfacing the typed error
    pub async fn try_search(
        &self,
        query: &str,
        prefs: &Preferences,
        options: &SearchOptions,
    ) -> Result<SearchResponse, ClientError> {
        self.execute(&SearchRequest::resolve(query, prefs, options)).await
    }

    /// Execute an already resolved request
    pub async fn execute(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let url = request.url()?;
        debug!("Searching {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get_json(&request.endpoint(), &request.params(), Some(&request.language))
            .await?;

        let mut normalized = SearchResponse::from_body(&request.query, request.pageno, &response.body);
        if let Some(ref remover) = self.tracker_remover {
            for result in normalized.results.iter_mut() {
                if let std::borrow::Cow::Owned(cleaned) = remover.clean_url(&result.url) {
                    result.url = cleaned;
                }
            }
        }

        info!(
            "Search '{}' page {} returned {} results in {}ms",
            request.query,
            request.pageno,
            normalized.results.len(),
            start.elapsed().as_millis()
        );

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::SafeSearch;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prefs_for(server: &MockServer) -> Preferences {
        Preferences {
            backend: server.uri(),
            ..Default::default()
        }
    }

    fn client() -> SearchClient {
        SearchClient::new(HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_search_sends_merged_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .and(query_param("format", "json"))
            .and(query_param("language", "es"))
            .and(query_param("pageno", "2"))
            .and(query_param("categories", "it"))
            .and(query_param("safesearch", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"title": "Rust", "url": "https://rust-lang.org", "content": "fast"}],
                "suggestions": ["rust book"],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut prefs = prefs_for(&server);
        prefs.language = "es".to_string();
        prefs.categories = "it".to_string();
        let options = SearchOptions::default()
            .with_page(2)
            .with_safe_search(SafeSearch::Off);

        let response = client().search("rust", &prefs, &options).await;
        assert!(!response.is_error());
        assert_eq!(response.query, "rust");
        assert_eq!(response.page, 2);
        assert_eq!(response.results[0].snippet, "fast");
        assert_eq!(response.suggestions, vec!["rust book"]);
    }

    #[tokio::test]
    async fn test_http_error_becomes_error_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let response = client()
            .search("rust", &prefs_for(&server), &SearchOptions::default())
            .await;
        assert_eq!(response.error.as_deref(), Some("Search failed: 503"));
        assert!(response.results.is_empty());
        assert_eq!(response.page, 1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let result = client()
            .try_search("rust", &prefs_for(&server), &SearchOptions::default())
            .await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let prefs = Preferences {
            backend: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let response = client().search("rust", &prefs, &SearchOptions::default()).await;
        assert!(response.is_error());
    }

    #[tokio::test]
    async fn test_tracker_removal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"title": "T", "url": "https://shop.example/item?id=4&utm_source=searx"}],
            })))
            .mount(&server)
            .await;

        let response = client()
            .with_tracker_removal(true)
            .search("item", &prefs_for(&server), &SearchOptions::default())
            .await;
        assert_eq!(response.results[0].url, "https://shop.example/item?id=4");
    }
}
