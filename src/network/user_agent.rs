//! Request header values

/// User agent identifying this client, with an optional operator suffix
pub fn client_user_agent(suffix: Option<&str>) -> String {
    let base = format!("searxng-client/{}", crate::VERSION);
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{} {}", base, suffix),
        None => base,
    }
}

/// The backend only answers the JSON endpoints with JSON
pub fn accept_json() -> &'static str {
    "application/json"
}

/// Standard accept-language header
pub fn accept_language(lang: &str) -> String {
    if lang == "all" || lang.is_empty() {
        "en-US,en;q=0.9".to_string()
    } else {
        format!("{},en-US;q=0.9,en;q=0.8", lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_user_agent() {
        assert!(client_user_agent(None).starts_with("searxng-client/"));
        assert!(client_user_agent(Some(" (ops@example.org)")).ends_with("(ops@example.org)"));
        assert_eq!(client_user_agent(Some("  ")), client_user_agent(None));
    }

    #[test]
    fn test_accept_language() {
        assert_eq!(accept_language(""), "en-US,en;q=0.9");
        assert_eq!(accept_language("pt-BR"), "pt-BR,en-US;q=0.9,en;q=0.8");
    }
}
