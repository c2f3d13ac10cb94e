//! Address-bar integration and link-opening behavior
//!
//! Maps a submitted query to either a browser navigation or an in-client
//! result list, depending on the `openInNewTab` preference.

use crate::error::ClientError;
use crate::preferences::Preferences;
use crate::results::SearchResponse;
use crate::search::{search_url, SearchClient, SearchOptions};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Number of suggestions the address bar shows
pub const OMNIBOX_LIMIT: usize = 5;

/// Where a navigation should land
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Disposition {
    #[default]
    CurrentTab,
    NewForegroundTab,
    NewBackgroundTab,
}

impl Disposition {
    /// Whether the target tab takes focus
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::NewBackgroundTab)
    }

    pub fn opens_new_tab(&self) -> bool {
        !matches!(self, Self::CurrentTab)
    }
}

impl FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "currenttab" | "current" => Ok(Self::CurrentTab),
            "newforegroundtab" | "foreground" | "new" => Ok(Self::NewForegroundTab),
            "newbackgroundtab" | "background" => Ok(Self::NewBackgroundTab),
            other => Err(format!("unknown disposition: {}", other)),
        }
    }
}

/// A page to open in the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub url: Url,
    pub disposition: Disposition,
}

/// Address-bar suggestion entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmniboxSuggestion {
    pub content: String,
    pub description: String,
}

/// Outcome of submitting a query
#[derive(Debug, Clone)]
pub enum SearchAction {
    Navigate(Navigation),
    Display(SearchResponse),
}

/// Navigation for a query entered in the address bar
pub fn navigate(
    query: &str,
    prefs: &Preferences,
    disposition: Disposition,
) -> Result<Navigation, ClientError> {
    Ok(Navigation {
        url: search_url(query, prefs, &SearchOptions::default())?,
        disposition,
    })
}

/// Turn autocomplete suggestions into address-bar entries
///
/// `describe` renders the description line for one suggestion.
pub fn omnibox_suggestions<F>(suggestions: Vec<String>, describe: F) -> Vec<OmniboxSuggestion>
where
    F: Fn(&str) -> String,
{
    suggestions
        .into_iter()
        .take(OMNIBOX_LIMIT)
        .map(|content| OmniboxSuggestion {
            description: describe(&content),
            content,
        })
        .collect()
}

/// Submit a query: open it in the browser or fetch results in-client
///
/// Returns `None` for a blank query.
pub async fn submit(
    search: &SearchClient,
    query: &str,
    prefs: &Preferences,
    options: &SearchOptions,
) -> Result<Option<SearchAction>, ClientError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    if prefs.open_in_new_tab {
        let navigation = Navigation {
            url: search_url(query, prefs, options)?,
            disposition: Disposition::NewForegroundTab,
        };
        return Ok(Some(SearchAction::Navigate(navigation)));
    }

    Ok(Some(SearchAction::Display(
        search.search(query, prefs, options).await,
    )))
}
