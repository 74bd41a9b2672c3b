//! Server configuration types.
//!
//! [`ServerConfig`] holds every runtime setting.  It is a plain struct with no
//! global state: `main.rs` fills it from CLI flags and an optional TOML file,
//! tests build it directly.  [`SessionLimits`] is the subset each connection's
//! supervisor needs, split out so it can be cloned into sessions on its own.

use std::net::SocketAddr;
use std::time::Duration;

use sortstream_core::algorithms::DEFAULT_MAX_COUNTING_RANGE;

/// Largest array accepted by `startSort`.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1000;

/// Inbound WebSocket message cap (1 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// All runtime configuration for the server.
///
/// # Example
///
/// ```rust
/// use sortstream_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 3000);
/// assert_eq!(cfg.limits.max_array_len, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    pub bind_addr: SocketAddr,

    /// A connection that has not finished the WebSocket handshake within this
    /// long is dropped.
    pub connect_timeout: Duration,

    /// How often the server pings each client.
    pub ping_interval: Duration,

    /// A session with no inbound traffic (frames or pongs) for this long is
    /// closed.
    pub ping_timeout: Duration,

    /// Largest inbound WebSocket message, in bytes.
    pub max_message_size: usize,

    /// Fallback `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,

    /// Per-connection request limits.
    pub limits: SessionLimits,
}

impl Default for ServerConfig {
    /// | Field            | Default        |
    /// |------------------|----------------|
    /// | bind_addr        | `0.0.0.0:3000` |
    /// | connect_timeout  | 45 seconds     |
    /// | ping_interval    | 25 seconds     |
    /// | ping_timeout     | 60 seconds     |
    /// | max_message_size | 1 MiB          |
    /// | log_level        | `info`         |
    fn default() -> Self {
        Self {
            // Compile-time constant address; cannot fail.
            bind_addr: "0.0.0.0:3000".parse().unwrap(),
            connect_timeout: Duration::from_secs(45),
            ping_interval: Duration::from_secs(25),
            ping_timeout: Duration::from_secs(60),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            log_level: "info".to_string(),
            limits: SessionLimits::default(),
        }
    }
}

/// Limits applied by each connection's supervisor.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLimits {
    /// Maximum number of elements in a submitted array.
    pub max_array_len: usize,
    /// Length of the fixed rate-limit window.
    pub rate_limit_window: Duration,
    /// Start requests allowed per window.
    pub rate_limit_max_requests: u32,
    /// Largest `max - min + 1` counting sort will allocate for.
    pub max_counting_range: u64,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max_requests: 10,
            max_counting_range: DEFAULT_MAX_COUNTING_RANGE,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
