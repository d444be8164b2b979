//! Configuration system using TOML files and environment overrides.
//!
//! Settings are layered, later sources winning:
//! 1. Built-in defaults
//! 2. A TOML file, by default in the OS-standard config directory:
//!    - Windows: %APPDATA%\song-catalog\config.toml
//!    - macOS: ~/Library/Application Support/song-catalog/config.toml
//!    - Linux: ~/.config/song-catalog/config.toml
//! 3. Environment variables (`PORT`, `DATABASE_URL`, `MUSIC_API_URL`),
//!    including those loaded from a `.env` file, and command-line flags
//!
//! A missing database URL is fatal at startup. A missing music info URL
//! only breaks song creation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,

    /// Database settings
    pub database: DatabaseConfig,

    /// External music info API settings
    pub enrichment: EnrichmentConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite:songs.db`
    pub url: Option<String>,

    /// Connection pool size
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// External music info API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Base URL; `/info` is appended
    pub base_url: Option<String>,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

/// Values supplied by the environment or the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub music_api_url: Option<String>,
}

impl Config {
    /// Apply overrides on top of this config.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(url) = &overrides.database_url {
            self.database.url = Some(url.clone());
        }
        if let Some(url) = &overrides.music_api_url {
            self.enrichment.base_url = Some(url.clone());
        }
        self
    }

    /// The database URL, or an error if none is configured.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Check the settings the service cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database_url()?;
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` to bind the listener to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("song-catalog"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `path`, or the default location if `None`.
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[enrichment]"));
        assert!(toml.contains("port = 8080"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[database]
url = "sqlite:songs.db"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.database.url.as_deref(), Some("sqlite:songs.db"));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.enrichment.timeout_secs, 30);
        assert!(config.enrichment.base_url.is_none());
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(&ConfigOverrides {
            port: Some(9000),
            database_url: Some("sqlite::memory:".to_string()),
            music_api_url: Some("http://localhost:8081".to_string()),
        });

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
        assert_eq!(
            config.enrichment.base_url.as_deref(),
            Some("http://localhost:8081")
        );
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config = Config::default();
        config.database.url = Some("sqlite:file.db".to_string());
        let config = config.with_overrides(&ConfigOverrides::default());
        assert_eq!(config.database_url().unwrap(), "sqlite:file.db");
    }

    #[test]
    fn test_validate_requires_database_url() {
        assert!(matches!(
            Config::default().validate(),
            Err(ConfigError::MissingDatabaseUrl)
        ));

        let mut config = Config::default();
        config.database.url = Some("   ".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::MissingDatabaseUrl)));

        config.database.url = Some("sqlite:songs.db".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_pool_size() {
        let mut config = Config::default();
        config.database.url = Some("sqlite:songs.db".to_string());
        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_enrichment_url_is_valid() {
        let mut config = Config::default();
        config.database.url = Some("sqlite:songs.db".to_string());
        assert!(config.enrichment.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(Some(&dir.path().join("absent.toml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 3000\n\n[enrichment]\nbase_url = \"http://music.local\"\n",
        )
        .unwrap();

        let config = load(Some(&path));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.enrichment.base_url.as_deref(), Some("http://music.local"));
    }

    #[test]
    fn test_load_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(load(Some(&path)), Config::default());
    }
}
