//! Color theme selection
//!
//! `system` follows the host's dark-mode preference. On a terminal that
//! preference is read from `COLORFGBG`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Theme stored in preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Theme after `system` has been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Resolve against an explicit host preference
    pub fn resolve(self, prefers_dark: bool) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
            Self::System if prefers_dark => ResolvedTheme::Dark,
            Self::System => ResolvedTheme::Light,
        }
    }

    /// Resolve against the current terminal
    pub fn apply(self) -> ResolvedTheme {
        self.resolve(prefers_dark(std::env::var("COLORFGBG").ok().as_deref()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Interpret a `COLORFGBG` value ("fg;bg" or "fg;default;bg")
pub fn prefers_dark(colorfgbg: Option<&str>) -> bool {
    let Some(bg) = colorfgbg.and_then(|v| v.rsplit(';').next()) else {
        return false;
    };
    match bg.trim().parse::<u8>() {
        Ok(code) => code <= 6 || code == 8,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_themes_ignore_host() {
        assert_eq!(Theme::Light.resolve(true), ResolvedTheme::Light);
        assert_eq!(Theme::Dark.resolve(false), ResolvedTheme::Dark);
    }

    #[test]
    fn test_system_follows_host() {
        assert_eq!(Theme::System.resolve(true), ResolvedTheme::Dark);
        assert_eq!(Theme::System.resolve(false), ResolvedTheme::Light);
    }

    #[test]
    fn test_colorfgbg() {
        assert!(prefers_dark(Some("15;0")));
        assert!(prefers_dark(Some("15;default;8")));
        assert!(!prefers_dark(Some("0;15")));
        assert!(!prefers_dark(Some("garbage")));
        assert!(!prefers_dark(None));
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
        assert!("solarized".parse::<Theme>().is_err());
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }
}
