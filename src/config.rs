use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

/// Configuration file consulted when `CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "webworker.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid date format: {0:?}")]
    InvalidDateFormat(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Deadline for receiving the whole request head.
    pub read_timeout_secs: u64,
    /// Bytes of request head read before giving up on the rest.
    pub max_request_head_bytes: u64,
}

/// What gets served and how text content is personalised.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Base directory request targets are resolved against.
    pub document_root: PathBuf,
    /// File served when the target names a directory.
    pub index_file: String,
    /// Value of the `Server` header and of the server placeholder.
    pub server_name: String,
    pub date_placeholder: String,
    pub server_placeholder: String,
    /// strftime pattern for the date placeholder, rendered in UTC.
    pub date_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 30,
            max_request_head_bytes: 8192,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("."),
            index_file: "index.html".to_string(),
            server_name: "The Unfinished Server".to_string(),
            date_placeholder: "<cs371date>".to_string(),
            server_placeholder: "<cs371server>".to_string(),
            date_format: "%b %-d, %Y, %-I:%M:%S %p".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Config {
    /// Loads the configuration from `CONFIG` (or `webworker.yaml` when present),
    /// falling back to defaults. `LISTEN` overrides the listen address.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var_os("CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.read_timeout_secs == 0 {
            return Err(ConfigError::Zero("server.read_timeout_secs"));
        }
        if self.server.max_request_head_bytes == 0 {
            return Err(ConfigError::Zero("server.max_request_head_bytes"));
        }

        let format = &self.static_files.date_format;
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat(format.clone()));
        }
        Ok(())
    }
}
