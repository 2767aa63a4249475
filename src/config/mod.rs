//! Configuration management
//!
//! Configuration is loaded from a config.yml file, with environment
//! variables overriding file settings. Missing values fall back to defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (for cookie-based auth)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path (or ":memory:" for tests)
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/xabar.db".to_string()
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing or empty file yields the default configuration. Invalid
    /// YAML returns an error with the location of the problem.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Recognized variables:
    /// - XABAR_SERVER_HOST
    /// - XABAR_SERVER_PORT
    /// - XABAR_SERVER_CORS_ORIGIN
    /// - XABAR_DATABASE_URL
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("XABAR_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("XABAR_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("XABAR_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }
        if let Ok(url) = std::env::var("XABAR_DATABASE_URL") {
            self.database.url = url;
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn clear_env() {
        std::env::remove_var("XABAR_SERVER_HOST");
        std::env::remove_var("XABAR_SERVER_PORT");
        std::env::remove_var("XABAR_SERVER_CORS_ORIGIN");
        std::env::remove_var("XABAR_DATABASE_URL");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "data/xabar.db");
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3000\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "data/xabar.db");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
  cors_origin: "http://example.com"
database:
  url: "data/test.db"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin, "http://example.com");
        assert_eq!(config.database.url, "data/test.db");
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let result = Config::load(file.path());

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("parse") || err_msg.contains("invalid"));
    }

    #[test]
    fn test_load_malformed_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  host: [invalid yaml").unwrap();

        let result = Config::load(file.path());

        assert!(result.is_err());
    }

    #[test]
    fn test_env_override_server_config() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  host: \"0.0.0.0\"\n  port: 8080\n").unwrap();

        std::env::set_var("XABAR_SERVER_HOST", "192.168.1.1");
        std::env::set_var("XABAR_SERVER_PORT", "4000");

        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 4000);

        clear_env();
    }

    #[test]
    fn test_env_override_database_url() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "database:\n  url: \"original.db\"\n").unwrap();

        std::env::set_var("XABAR_DATABASE_URL", ":memory:");

        let config = Config::load_with_env(file.path()).unwrap();

        assert_eq!(config.database.url, ":memory:");

        clear_env();
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\n").unwrap();

        std::env::set_var("XABAR_SERVER_PORT", "not_a_number");

        let config = Config::load_with_env(file.path()).unwrap();

        // Original value wins when the env var is invalid
        assert_eq!(config.server.port, 8080);

        clear_env();
    }
}
