//! Normalized search response model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// A single search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Content snippet/description
    pub snippet: String,
    /// Engine that returned this result
    pub engine: String,
    pub category: String,
}

impl SearchResult {
    /// Map one backend result object; anything that is not an object is skipped
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let engine = str_field(obj, &["engine"]);
        let engine = if engine.is_empty() {
            obj.get("engines")
                .and_then(Value::as_array)
                .and_then(|engines| engines.iter().find_map(Value::as_str))
                .unwrap_or_default()
                .to_string()
        } else {
            engine
        };

        Some(Self {
            title: str_field(obj, &["title"]),
            url: str_field(obj, &["url"]),
            snippet: str_field(obj, &["content", "snippet"]),
            engine,
            category: str_field(obj, &["category"]),
        })
    }

    /// Host shown above the title, without a leading `www.`
    pub fn display_host(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
            .unwrap_or_default()
    }
}

/// Uniform view of a `/search?format=json` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: u32,
    pub results: Vec<SearchResult>,
    pub suggestions: Vec<String>,
    pub answers: Vec<String>,
    pub infoboxes: Vec<Value>,
    pub number_of_results: u64,
    /// Set when the request failed; the lists are then empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Normalize a decoded backend body
    pub fn from_body(query: impl Into<String>, page: u32, body: &Value) -> Self {
        let results = array_field(body, "results")
            .iter()
            .filter_map(SearchResult::from_value)
            .collect();

        let answers = array_field(body, "answers")
            .iter()
            .filter_map(|answer| match answer {
                Value::String(text) => Some(text.clone()),
                Value::Object(obj) => obj.get("answer").and_then(Value::as_str).map(String::from),
                _ => None,
            })
            .collect();

        Self {
            query: query.into(),
            page,
            results,
            suggestions: strings(array_field(body, "suggestions")),
            answers,
            infoboxes: array_field(body, "infoboxes").to_vec(),
            number_of_results: body
                .get("number_of_results")
                .and_then(Value::as_f64)
                .map(|n| n.max(0.0) as u64)
                .unwrap_or(0),
            error: None,
        }
    }

    /// Empty response carrying an error message
    pub fn failed(query: impl Into<String>, page: u32, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn str_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn array_field<'a>(body: &'a Value, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_missing_fields_become_empty() {
        let result = SearchResult::from_value(&json!({"url": "https://example.com"})).unwrap();
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.title, "");
        assert_eq!(result.snippet, "");
        assert_eq!(result.engine, "");
    }

    #[test]
    fn test_result_snippet_fallback_and_engines() {
        let result = SearchResult::from_value(&json!({
            "title": "Rust",
            "url": "https://www.rust-lang.org/",
            "content": null,
            "snippet": "A language empowering everyone",
            "engines": ["duckduckgo", "brave"],
            "category": "general",
        }))
        .unwrap();
        assert_eq!(result.snippet, "A language empowering everyone");
        assert_eq!(result.engine, "duckduckgo");
        assert_eq!(result.display_host(), "rust-lang.org");
    }

    #[test]
    fn test_non_object_results_skipped() {
        assert!(SearchResult::from_value(&json!("oops")).is_none());
        assert_eq!(SearchResult::default().display_host(), "");
    }

    #[test]
    fn test_response_from_body() {
        let body = json!({
            "query": "rust",
            "number_of_results": 1200.0,
            "results": [
                {"title": "A", "url": "https://a.example", "content": "first", "engine": "bing"},
                42,
            ],
            "suggestions": ["rust book", 7, "rust async"],
            "answers": ["plain", {"answer": "structured"}, {"other": 1}],
            "infoboxes": [{"infobox": "Rust"}],
        });

        let response = SearchResponse::from_body("rust", 2, &body);
        assert_eq!(response.page, 2);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].snippet, "first");
        assert_eq!(response.suggestions, vec!["rust book", "rust async"]);
        assert_eq!(response.answers, vec!["plain", "structured"]);
        assert_eq!(response.infoboxes.len(), 1);
        assert_eq!(response.number_of_results, 1200);
        assert!(!response.is_error());
    }

    #[test]
    fn test_response_tolerates_missing_sections() {
        let response = SearchResponse::from_body("q", 1, &json!({"results": null}));
        assert!(response.is_empty());
        assert!(response.suggestions.is_empty());
        assert_eq!(response.number_of_results, 0);
    }

    #[test]
    fn test_failed_response() {
        let response = SearchResponse::failed("q", 1, "Search failed: 502");
        assert!(response.is_error());
        assert!(response.is_empty());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "Search failed: 502");
    }
}
