//! Preference record, keys and catalogs

use super::PreferencesError;
use crate::theme::Theme;
use crate::DEFAULT_BACKEND;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Result categories offered by the backend
pub const CATEGORIES: &[&str] = &[
    "general", "images", "videos", "news", "map", "music", "it", "science", "files",
];

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_CATEGORIES: &str = "general";

/// Search languages offered in the settings screens
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Español (Latinoamérica)"),
    ("pt-BR", "Português (Brasil)"),
];

/// Safe search level sent as `safesearch`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SafeSearch {
    Off = 0,
    #[default]
    Moderate = 1,
    Strict = 2,
}

impl SafeSearch {
    pub const ALL: [SafeSearch; 3] = [SafeSearch::Off, SafeSearch::Moderate, SafeSearch::Strict];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Moderate => "moderate",
            Self::Strict => "strict",
        }
    }
}

impl TryFrom<u8> for SafeSearch {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Moderate),
            2 => Ok(Self::Strict),
            other => Err(format!("safe search level must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl From<SafeSearch> for u8 {
    fn from(value: SafeSearch) -> Self {
        value.level()
    }
}

impl FromStr for SafeSearch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Self::try_from(level);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown safe search level: {}", s))
    }
}

/// The persisted preferences record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Base URL of the SearXNG instance, without trailing slash
    pub backend: String,
    pub language: String,
    pub safe_search: SafeSearch,
    pub theme: Theme,
    pub open_in_new_tab: bool,
    pub categories: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            safe_search: SafeSearch::Moderate,
            theme: Theme::System,
            open_in_new_tab: false,
            categories: DEFAULT_CATEGORIES.to_string(),
        }
    }
}

impl Preferences {
    /// Current value of a single field
    pub fn value(&self, key: PreferenceKey) -> Value {
        match key {
            PreferenceKey::Backend => Value::from(self.backend.clone()),
            PreferenceKey::Language => Value::from(self.language.clone()),
            PreferenceKey::SafeSearch => Value::from(self.safe_search.level()),
            PreferenceKey::Theme => Value::from(self.theme.as_str()),
            PreferenceKey::OpenInNewTab => Value::from(self.open_in_new_tab),
            PreferenceKey::Categories => Value::from(self.categories.clone()),
        }
    }

    /// Overwrite a single field from a stored value
    pub fn apply(&mut self, key: PreferenceKey, value: Value) -> Result<(), PreferencesError> {
        let invalid = |e: serde_json::Error| PreferencesError::InvalidValue {
            key: key.as_str().to_string(),
            reason: e.to_string(),
        };
        match key {
            PreferenceKey::Backend => self.backend = serde_json::from_value(value).map_err(invalid)?,
            PreferenceKey::Language => {
                let language: String = serde_json::from_value(value).map_err(invalid)?;
                self.language = or_default(&language, DEFAULT_LANGUAGE);
            }
            PreferenceKey::SafeSearch => {
                self.safe_search = serde_json::from_value(value).map_err(invalid)?
            }
            PreferenceKey::Theme => self.theme = serde_json::from_value(value).map_err(invalid)?,
            PreferenceKey::OpenInNewTab => {
                self.open_in_new_tab = serde_json::from_value(value).map_err(invalid)?
            }
            PreferenceKey::Categories => {
                let categories: String = serde_json::from_value(value).map_err(invalid)?;
                self.categories = or_default(&categories, DEFAULT_CATEGORIES);
            }
        }
        Ok(())
    }

    /// Every field as a flat key-value map
    pub fn to_entries(&self) -> Map<String, Value> {
        PreferenceKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), self.value(*key)))
            .collect()
    }
}

/// Names of the fields in the preferences record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Backend,
    Language,
    SafeSearch,
    Theme,
    OpenInNewTab,
    Categories,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 6] = [
        PreferenceKey::Backend,
        PreferenceKey::Language,
        PreferenceKey::SafeSearch,
        PreferenceKey::Theme,
        PreferenceKey::OpenInNewTab,
        PreferenceKey::Categories,
    ];

    /// Key as written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Language => "language",
            Self::SafeSearch => "safeSearch",
            Self::Theme => "theme",
            Self::OpenInNewTab => "openInNewTab",
            Self::Categories => "categories",
        }
    }

    /// Parse a value typed by the user for this key
    pub fn parse_value(&self, raw: &str) -> Result<Value, PreferencesError> {
        let invalid = |reason: String| PreferencesError::InvalidValue {
            key: self.as_str().to_string(),
            reason,
        };
        match self {
            Self::Backend | Self::Language | Self::Categories => Ok(Value::from(raw.trim())),
            Self::SafeSearch => raw
                .parse::<SafeSearch>()
                .map(|level| Value::from(level.level()))
                .map_err(invalid),
            Self::Theme => raw
                .parse::<Theme>()
                .map(|theme| Value::from(theme.as_str()))
                .map_err(invalid),
            Self::OpenInNewTab => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                other => Err(invalid(format!("expected a boolean, got {}", other))),
            },
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = PreferencesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().to_lowercase() == folded)
            .ok_or_else(|| PreferencesError::UnknownKey(s.to_string()))
    }
}

/// A partial write; absent fields are left untouched in storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub backend: Option<String>,
    pub language: Option<String>,
    pub safe_search: Option<SafeSearch>,
    pub theme: Option<Theme>,
    pub open_in_new_tab: Option<bool>,
    pub categories: Option<String>,
}

impl PreferencesUpdate {
    /// Update that writes every field of `prefs`
    pub fn full(prefs: &Preferences) -> Self {
        Self {
            backend: Some(prefs.backend.clone()),
            language: Some(prefs.language.clone()),
            safe_search: Some(prefs.safe_search),
            theme: Some(prefs.theme),
            open_in_new_tab: Some(prefs.open_in_new_tab),
            categories: Some(prefs.categories.clone()),
        }
    }

    /// Set one field from a JSON value
    pub fn set_value(&mut self, key: PreferenceKey, value: Value) -> Result<(), PreferencesError> {
        let mut scratch = Preferences::default();
        scratch.apply(key, value)?;
        match key {
            PreferenceKey::Backend => self.backend = Some(scratch.backend),
            PreferenceKey::Language => self.language = Some(scratch.language),
            PreferenceKey::SafeSearch => self.safe_search = Some(scratch.safe_search),
            PreferenceKey::Theme => self.theme = Some(scratch.theme),
            PreferenceKey::OpenInNewTab => self.open_in_new_tab = Some(scratch.open_in_new_tab),
            PreferenceKey::Categories => self.categories = Some(scratch.categories),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Normalized entries to write, present fields only
    pub fn into_entries(self) -> Map<String, Value> {
        let mut entries = Map::new();
        let mut put = |key: PreferenceKey, value: Value| {
            entries.insert(key.as_str().to_string(), value);
        };
        if let Some(backend) = self.backend {
            put(PreferenceKey::Backend, Value::from(normalize_backend(&backend)));
        }
        if let Some(language) = self.language {
            put(PreferenceKey::Language, Value::from(or_default(&language, DEFAULT_LANGUAGE)));
        }
        if let Some(level) = self.safe_search {
            put(PreferenceKey::SafeSearch, Value::from(level.level()));
        }
        if let Some(theme) = self.theme {
            put(PreferenceKey::Theme, Value::from(theme.as_str()));
        }
        if let Some(open) = self.open_in_new_tab {
            put(PreferenceKey::OpenInNewTab, Value::Bool(open));
        }
        if let Some(categories) = self.categories {
            put(
                PreferenceKey::Categories,
                Value::from(or_default(&categories, DEFAULT_CATEGORIES)),
            );
        }
        entries
    }
}

/// Trim whitespace and trailing slashes; empty falls back to the default backend
pub fn normalize_backend(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BACKEND.to_string()
    } else {
        trimmed.to_string()
    }
}

fn or_default(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Entries of a comma-separated category list that the backend does not offer
pub fn unknown_categories(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty() && !CATEGORIES.contains(c))
        .collect()
}

/// Display name of a supported language
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}
