//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a small TOML file. Everything has a built-in
//! default, and a missing or unreadable file never prevents startup.
//!
//! Root folder priority:
//! 1. Command-line argument (highest priority)
//! 2. `HEXQUIZ_ROOT_FOLDER` environment variable
//! 3. `root_folder` in the TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "HEXQUIZ_ROOT_FOLDER";

/// Environment variable overriding the HTTP port
pub const PORT_ENV: &str = "HEXQUIZ_PORT";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5740;

/// Default iNaturalist API base URL
pub const DEFAULT_INATURALIST_BASE_URL: &str = "https://api.inaturalist.org/v1";

/// Directory (under the root folder) holding saved quiz records
pub const QUIZ_DIR_NAME: &str = "saved_quizzes";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder for persisted data (optional)
    pub root_folder: Option<PathBuf>,

    /// Interface to bind the HTTP server to
    pub bind_address: String,

    /// HTTP server port
    pub port: u16,

    /// Upstream biodiversity API settings
    pub inaturalist: InaturalistConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            inaturalist: InaturalistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// iNaturalist client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InaturalistConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for InaturalistConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_INATURALIST_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: format!("hexquiz/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl InaturalistConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Built-in defaults, with the reason no file was used
    Defaults { reason: String },
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, falling back to defaults on any problem
    ///
    /// An explicit path is tried first; otherwise the platform config
    /// locations are searched. Failures are reported through the returned
    /// [`ConfigSource`] rather than as errors, so the caller can log them once
    /// tracing is up.
    pub fn load_or_default(explicit: Option<&Path>) -> (Self, ConfigSource) {
        let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => {
                return (
                    Self::default(),
                    ConfigSource::Defaults {
                        reason: "No config file found".to_string(),
                    },
                )
            }
        };

        match Self::load(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (
                Self::default(),
                ConfigSource::Defaults {
                    reason: e.to_string(),
                },
            ),
        }
    }

    /// HTTP port after applying the environment override
    pub fn resolve_port(&self, cli_port: Option<u16>) -> u16 {
        if let Some(port) = cli_port {
            return port;
        }
        if let Ok(raw) = std::env::var(PORT_ENV) {
            match raw.trim().parse() {
                Ok(port) => return port,
                Err(_) => warn!("Ignoring invalid {}='{}'", PORT_ENV, raw),
            }
        }
        self.port
    }
}

/// First existing config file among the platform locations
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("hexquiz").join("config.toml"));
    let system_config = PathBuf::from("/etc/hexquiz/config.toml");

    user_config
        .into_iter()
        .chain(std::iter::once(system_config))
        .find(|path| path.exists())
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hexquiz"))
        .unwrap_or_else(|| PathBuf::from("./hexquiz_data"))
}

/// Resolves the root folder from CLI, environment, TOML, then defaults
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, config: &TomlConfig) -> Self {
        Self {
            cli_arg,
            toml_root: config.root_folder.clone(),
        }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            return path.clone();
        }

        default_root_folder()
    }
}

/// Creates the root folder layout on first start
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            info!("Creating root folder: {}", self.root_folder.display());
            std::fs::create_dir_all(&self.root_folder)?;
        }
        Ok(())
    }

    /// Directory holding one JSON file per saved quiz
    pub fn quiz_dir(&self) -> PathBuf {
        self.root_folder.join(QUIZ_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.inaturalist.base_url, DEFAULT_INATURALIST_BASE_URL);
        assert_eq!(config.inaturalist.timeout(), Duration::from_secs(10));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 8080

            [inaturalist]
            timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.inaturalist.timeout_secs, 3);
        assert_eq!(config.inaturalist.base_url, DEFAULT_INATURALIST_BASE_URL);
        assert!(config.root_folder.is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
