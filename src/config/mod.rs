//! Configuration module
//!
//! Handles loading client settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "SEARXNG_CLIENT_SETTINGS_PATH";

/// Load settings from an explicit path, the usual locations, or defaults
pub fn load(explicit: Option<PathBuf>) -> Result<ClientSettings> {
    load_with(explicit, |key| std::env::var(key).ok())
}

fn load_with<F>(explicit: Option<PathBuf>, var: F) -> Result<ClientSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut candidates = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path);
    }
    if let Some(path) = var(SETTINGS_PATH_VAR) {
        candidates.push(PathBuf::from(path));
    }
    candidates.push(PathBuf::from("client.yml"));
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("searxng-client/client.yml"));
    }

    for path in candidates.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = ClientSettings::from_file(path)?;
            settings.merge_vars(&var);
            return Ok(settings);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = ClientSettings::default();
    settings.merge_vars(&var);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "autocomplete:\n  limit: 3").unwrap();

        let settings = load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(settings.autocomplete.limit, 3);
    }

    #[test]
    fn test_load_from_settings_path_var() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ui:\n  max_results: 4").unwrap();
        let path = file.path().display().to_string();

        let settings = load_with(None, |key| match key {
            SETTINGS_PATH_VAR => Some(path.clone()),
            "SEARXNG_CLIENT_STORAGE" => Some("none".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.ui.max_results, 4);
        assert_eq!(settings.storage.kind, StorageKind::None);
    }

    #[test]
    fn test_explicit_path_wins_over_settings_path_var() {
        let mut explicit = tempfile::NamedTempFile::new().unwrap();
        writeln!(explicit, "autocomplete:\n  limit: 2").unwrap();
        let mut from_var = tempfile::NamedTempFile::new().unwrap();
        writeln!(from_var, "autocomplete:\n  limit: 5").unwrap();
        let var_path = from_var.path().display().to_string();

        let settings = load_with(Some(explicit.path().to_path_buf()), |key| {
            (key == SETTINGS_PATH_VAR).then(|| var_path.clone())
        })
        .unwrap();
        assert_eq!(settings.autocomplete.limit, 2);
    }

    #[test]
    fn test_load_rejects_bad_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ui: [not, a, map]").unwrap();

        assert!(load(Some(file.path().to_path_buf())).is_err());
    }
}
