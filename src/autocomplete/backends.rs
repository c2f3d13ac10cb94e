//! Response shapes returned by `/autocompleter`

use serde_json::Value;

/// Extract suggestion strings from any supported response shape
///
/// Handles a plain array of strings and the OpenSearch pair
/// `[query, [suggestions...]]`. Non-string entries are dropped.
pub fn parse_suggestions(json: &Value) -> Vec<String> {
    let Some(arr) = json.as_array() else {
        return vec![];
    };

    let list = match (arr.first(), arr.get(1)) {
        (Some(Value::String(_)), Some(Value::Array(inner))) if arr.len() <= 4 => inner,
        _ => arr,
    };

    list.iter()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_array() {
        let json = json!(["rust", "rustup", 3, null, "  "]);
        assert_eq!(parse_suggestions(&json), vec!["rust", "rustup"]);
    }

    #[test]
    fn test_opensearch_shape() {
        let json = json!(["rus", ["rust", "russia"], [], []]);
        assert_eq!(parse_suggestions(&json), vec!["rust", "russia"]);
    }

    #[test]
    fn test_unexpected_shape() {
        assert!(parse_suggestions(&json!({"error": "nope"})).is_empty());
        assert!(parse_suggestions(&json!("rust")).is_empty());
    }
}
