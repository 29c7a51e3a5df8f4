//! Configuration handling for the CLI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// File name of the JSON form store inside the data directory
pub const DATA_FILE_NAME: &str = "forms.json";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory holding the form store
    pub data_dir: Option<PathBuf>,
    /// Owner used when a command does not name one
    pub default_owner: Option<String>,
    /// `tracing` filter directive, e.g. `formsmith=debug`
    pub log_filter: Option<String>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "formsmith", "formsmith")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Resolve the JSON store location: configured directory, then the
    /// platform data directory, then `./.formsmith`
    pub fn data_file(&self) -> PathBuf {
        let dir = self
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".formsmith"));
        dir.join(DATA_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.data_dir.is_none());
        assert!(config.default_owner.is_none());
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/tmp/forms")),
            default_owner: Some("ada".to_string()),
            log_filter: Some("formsmith=debug".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"defaultOwner\""));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/forms")));
        assert_eq!(parsed.default_owner, Some("ada".to_string()));
        assert_eq!(parsed.log_filter, Some("formsmith=debug".to_string()));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.default_owner.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Unknown keys are ignored
        let json = r#"{"defaultOwner": "ada", "theme": "dark"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.default_owner, Some("ada".to_string()));
    }

    #[test]
    fn test_data_file_prefers_configured_dir() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/forms")),
            ..Default::default()
        };
        assert_eq!(config.data_file(), PathBuf::from("/srv/forms/forms.json"));
    }

    #[test]
    fn test_data_file_falls_back_to_a_forms_json() {
        let path = AppConfig::default().data_file();
        assert!(path.ends_with(DATA_FILE_NAME));
    }

    #[test]
    fn test_load_returns_ok() {
        // Default config when no file exists; whatever is on disk otherwise
        assert!(AppConfig::load().is_ok());
    }
}
