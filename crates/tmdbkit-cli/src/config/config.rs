//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDb API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDb API configuration (`[tmdb]` table).
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API read access token; `TMDB_API_TOKEN` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Session ID for account endpoints; `TMDB_SESSION_ID` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Default response language (e.g. "ja-JP").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Include adult content in searches.
    #[serde(default)]
    pub include_adult: bool,
    /// Retry budget for 429 and 5xx responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Picks the API token: `env_token` when non-empty, else the file's.
    #[must_use]
    pub fn api_token(&self, env_token: Option<String>) -> Option<String> {
        first_non_empty(env_token, self.tmdb.api_token.as_deref())
    }

    /// Picks the session ID: `env_session` when non-empty, else the file's.
    #[must_use]
    pub fn session_id(&self, env_session: Option<String>) -> Option<String> {
        first_non_empty(env_session, self.tmdb.session_id.as_deref())
    }
}

fn first_non_empty(env: Option<String>, file: Option<&str>) -> Option<String> {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| file.map(String::from))
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.api_token, None);
        assert!(!config.tmdb.include_adult);
    }

    #[test]
    fn test_parse_tmdb_table() {
        // Arrange
        let toml_str = r#"
[tmdb]
api_token = "eyJhbGciOi"
language = "ja-JP"
max_retries = 5
"#;

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_token.as_deref(), Some("eyJhbGciOi"));
        assert_eq!(config.tmdb.language.as_deref(), Some("ja-JP"));
        assert_eq!(config.tmdb.max_retries, Some(5));
        assert!(!config.tmdb.include_adult);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_token: Some(String::from("token")),
                session_id: None,
                language: Some(String::from("de-DE")),
                include_adult: true,
                max_retries: None,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\napi_token = 1").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_token_wins_over_file() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_token: Some(String::from("from-file")),
                ..TmdbConfig::default()
            },
        };

        // Act & Assert
        assert_eq!(
            config.api_token(Some(String::from("from-env"))).as_deref(),
            Some("from-env")
        );
        assert_eq!(config.api_token(Some(String::new())).as_deref(), Some("from-file"));
        assert_eq!(config.api_token(None).as_deref(), Some("from-file"));
        assert_eq!(AppConfig::default().api_token(None), None);
    }

    #[test]
    fn test_blank_session_is_ignored() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                session_id: Some(String::from("  ")),
                ..TmdbConfig::default()
            },
        };

        // Act & Assert
        assert_eq!(config.session_id(None), None);
        assert_eq!(
            config.session_id(Some(String::from("abc123"))).as_deref(),
            Some("abc123")
        );
    }
}
