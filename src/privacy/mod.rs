//! Tracking parameter removal for outbound links

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use url::Url;

static UTM_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^utm_.+$").expect("valid regex"));

/// Removes known tracking parameters from result URLs
#[derive(Debug, Clone)]
pub struct TrackerRemover {
    tracking_params: Vec<&'static str>,
}

impl TrackerRemover {
    pub fn new() -> Self {
        Self {
            tracking_params: vec![
                "utm_source",
                "utm_medium",
                "utm_campaign",
                "utm_term",
                "utm_content",
                "fbclid",
                "gclid",
                "msclkid",
                "mc_cid",
                "mc_eid",
            ],
        }
    }

    /// Clean a URL; returns it unchanged when nothing was removed or it does not parse
    pub fn clean_url<'a>(&self, url: &'a str) -> Cow<'a, str> {
        let Ok(mut parsed) = Url::parse(url) else {
            return Cow::Borrowed(url);
        };

        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let kept: Vec<&(String, String)> = pairs
            .iter()
            .filter(|(key, _)| !self.is_tracking_param(key))
            .collect();

        if kept.len() == pairs.len() {
            return Cow::Borrowed(url);
        }

        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(kept);
        }
        Cow::Owned(parsed.to_string())
    }

    pub fn is_tracking_param(&self, param: &str) -> bool {
        self.tracking_params.contains(&param) || UTM_PATTERN.is_match(param)
    }
}

impl Default for TrackerRemover {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_utm_params() {
        let remover = TrackerRemover::new();
        let url = "https://example.com/page?foo=bar&utm_source=google&utm_medium=cpc";
        assert_eq!(remover.clean_url(url), "https://example.com/page?foo=bar");
    }

    #[test]
    fn test_remove_fbclid_only_param() {
        let remover = TrackerRemover::new();
        assert_eq!(
            remover.clean_url("https://example.com/?fbclid=IwAR123456"),
            "https://example.com/"
        );
    }

    #[test]
    fn test_untouched_url_is_borrowed() {
        let remover = TrackerRemover::new();
        let url = "https://example.com/search?q=a%20b&page=2";
        assert!(matches!(remover.clean_url(url), Cow::Borrowed(_)));
    }

    #[test]
    fn test_keeps_order_of_remaining_params() {
        let remover = TrackerRemover::new();
        let cleaned = remover.clean_url("https://example.com/?b=2&gclid=x&a=1&utm_id=9#frag");
        assert_eq!(cleaned, "https://example.com/?b=2&a=1#frag");
    }

    #[test]
    fn test_invalid_url_unchanged() {
        let remover = TrackerRemover::new();
        assert_eq!(remover.clean_url("not a url?utm_source=x"), "not a url?utm_source=x");
    }
}
