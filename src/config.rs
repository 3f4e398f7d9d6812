use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CAMPAIGN_KEEP_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub history: HistoryConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API listens on.
    pub bind_address: SocketAddr,
    /// Allow any origin, method and header (development front-ends).
    pub cors_permissive: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Authorization configuration. Identity itself comes from the upstream
/// authentication layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// User ids holding the site-wide admin role.
    pub admin_users: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Override the log directory.
    pub log_dir: Option<PathBuf>,
    /// Emit JSON on stdout instead of the pretty format.
    pub json_stdout: bool,
}

/// Check-in history paging limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_permissive: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_dir: None,
            json_stdout: false,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 50,
        }
    }
}

/// Where the configuration came from.
///
/// Loading happens before logging is initialized, so the outcome is kept and
/// reported through [`ConfigSource::log`] afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!(path = %path.display(), "Loaded config");
            }
            ConfigSource::Missing(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
            }
            ConfigSource::Invalid { path, error } => {
                tracing::warn!(path = %path.display(), %error, "Failed to parse config, using defaults");
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from `$CAMPAIGN_KEEP_CONFIG` or
    /// `~/.config/campaign-keep/config.toml`.
    /// Falls back to `Default` if the file is missing or unparseable.
    pub fn load() -> (Self, ConfigSource) {
        let config_path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> (Self, ConfigSource) {
        let path = config_path.to_path_buf();
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Invalid {
                        path,
                        error: e.to_string(),
                    },
                ),
            },
            Err(_) => (Self::default(), ConfigSource::Missing(path)),
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data
            .data_dir
            .clone()
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .map(|d| d.join("campaign-keep"))
                    .unwrap_or_else(|| PathBuf::from("data"))
            })
    }

    /// Resolved log directory (override or `<data dir>/logs`).
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("logs"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("campaign-keep").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
