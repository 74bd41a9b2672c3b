//! Optional TOML configuration file.
//!
//! Passed with `--config <FILE>`.  Every key is optional; missing keys take
//! the same defaults as [`ServerConfig::default`].  Command-line flags are
//! applied on top of the file by `main.rs`.
//!
//! ```toml
//! [server]
//! bind_address = "127.0.0.1"
//! port = 8080
//! connect_timeout_secs = 45
//! ping_interval_secs = 25
//! ping_timeout_secs = 60
//! max_message_size = 1048576
//! log_level = "debug"
//!
//! [limits]
//! max_array_len = 1000
//! rate_limit_window_secs = 60
//! rate_limit_max_requests = 10
//! max_counting_range = 100000
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::config::{DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_MESSAGE_SIZE};
use crate::domain::{ServerConfig, SessionLimits};
use sortstream_core::algorithms::DEFAULT_MAX_COUNTING_RANGE;

/// Error type for loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address` is not an IP address.
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Top-level file layout.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

/// `[server]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// `[limits]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,
    #[serde(default = "default_max_counting_range")]
    pub max_counting_range: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_connect_timeout_secs() -> u64 {
    45
}
fn default_ping_interval_secs() -> u64 {
    25
}
fn default_ping_timeout_secs() -> u64 {
    60
}
fn default_max_message_size() -> usize {
    DEFAULT_MAX_MESSAGE_SIZE
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_array_len() -> usize {
    DEFAULT_MAX_ARRAY_LEN
}
fn default_rate_limit_window_secs() -> u64 {
    60
}
fn default_rate_limit_max_requests() -> u32 {
    10
}
fn default_max_counting_range() -> u64 {
    DEFAULT_MAX_COUNTING_RANGE
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            connect_timeout_secs: default_connect_timeout_secs(),
            ping_interval_secs: default_ping_interval_secs(),
            ping_timeout_secs: default_ping_timeout_secs(),
            max_message_size: default_max_message_size(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_array_len: default_max_array_len(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
            rate_limit_max_requests: default_rate_limit_max_requests(),
            max_counting_range: default_max_counting_range(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl FileConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Converts the file contents into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidAddress`] if `bind_address` is not an IP.
    pub fn into_server_config(self) -> Result<ServerConfig, ConfigError> {
        let FileConfig { server, limits } = self;
        let ip: IpAddr = server
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(server.bind_address.clone()))?;

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(ip, server.port),
            connect_timeout: Duration::from_secs(server.connect_timeout_secs),
            ping_interval: Duration::from_secs(server.ping_interval_secs),
            ping_timeout: Duration::from_secs(server.ping_timeout_secs),
            max_message_size: server.max_message_size,
            log_level: server.log_level,
            limits: SessionLimits {
                max_array_len: limits.max_array_len,
                rate_limit_window: Duration::from_secs(limits.rate_limit_window_secs),
                rate_limit_max_requests: limits.rate_limit_max_requests,
                max_counting_range: limits.max_counting_range,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_matches_builtin_defaults() {
        // Arrange / Act
        let config = FileConfig::parse("").unwrap().into_server_config().unwrap();
        let defaults = ServerConfig::default();

        // Assert
        assert_eq!(config.bind_addr, defaults.bind_addr);
        assert_eq!(config.connect_timeout, defaults.connect_timeout);
        assert_eq!(config.ping_interval, defaults.ping_interval);
        assert_eq!(config.ping_timeout, defaults.ping_timeout);
        assert_eq!(config.max_message_size, defaults.max_message_size);
        assert_eq!(config.log_level, defaults.log_level);
        assert_eq!(config.limits, defaults.limits);
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let text = r#"
            [server]
            port = 8080
            connect_timeout_secs = 10

            [limits]
            max_array_len = 50
        "#;

        let config = FileConfig::parse(text).unwrap().into_server_config().unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.ping_interval, Duration::from_secs(25));
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.limits.max_array_len, 50);
        assert_eq!(config.limits.rate_limit_max_requests, 10);
    }

    #[test]
    fn test_invalid_bind_address() {
        let text = "[server]\nbind_address = \"not.an.ip\"\n";
        let err = FileConfig::parse(text).unwrap().into_server_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress(ref a) if a == "not.an.ip"));
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let err = FileConfig::parse("[server]\nprot = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = FileConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
