//! sortstream-server entry point.
//!
//! Serves the sort visualization event protocol over WebSocket.  A browser
//! sends `startSort` with an algorithm, an array and a speed; the server plays
//! the algorithm back one `sortStep` at a time and finishes with
//! `sortComplete` (or `sortError`).
//!
//! # Usage
//!
//! ```text
//! sortstream-server [OPTIONS]
//!
//! Options:
//!   --bind <IP>                  Listen address [default: 0.0.0.0]
//!   --port <PORT>                Listen port [env: PORT] [default: 3000]
//!   --config <FILE>              Optional TOML configuration file
//!   --max-array-len <N>          Largest accepted array [default: 1000]
//!   --rate-limit-window <SECS>   Rate-limit window [default: 60]
//!   --rate-limit-max <N>         Start requests per window [default: 10]
//!   --connect-timeout <SECS>     WebSocket handshake deadline [default: 45]
//!   --ping-interval <SECS>       Keep-alive ping interval [default: 25]
//!   --ping-timeout <SECS>        Idle timeout [default: 60]
//!   --log-level <FILTER>         Log filter when RUST_LOG is unset [default: info]
//! ```
//!
//! Precedence: command-line flag (or its environment variable), then the
//! config file, then the built-in default.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sortstream_server::domain::ServerConfig;
use sortstream_server::infrastructure::{run_server, FileConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Step-streaming sort visualization server.
///
/// Unset options fall back to the config file, then to built-in defaults.
#[derive(Debug, Parser)]
#[command(
    name = "sortstream-server",
    about = "WebSocket server that streams sorting algorithm steps",
    version
)]
struct Cli {
    /// IP address to listen on.
    #[arg(long, env = "SORTSTREAM_BIND")]
    bind: Option<IpAddr>,

    /// TCP port to listen on.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of elements in a submitted array.
    #[arg(long)]
    max_array_len: Option<usize>,

    /// Rate-limit window in seconds.
    #[arg(long, value_name = "SECS")]
    rate_limit_window: Option<u64>,

    /// Start requests allowed per window and connection.
    #[arg(long)]
    rate_limit_max: Option<u32>,

    /// Seconds a new connection gets to complete the WebSocket handshake.
    #[arg(long, value_name = "SECS")]
    connect_timeout: Option<u64>,

    /// Keep-alive ping interval in seconds.
    #[arg(long, value_name = "SECS")]
    ping_interval: Option<u64>,

    /// Close a session after this many seconds without inbound traffic.
    #[arg(long, value_name = "SECS")]
    ping_timeout: Option<u64>,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Builds the effective [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--config` names a file that cannot be read or
    /// parsed.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::load(path)
                .and_then(FileConfig::into_server_config)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(ip) = self.bind {
            config.bind_addr.set_ip(ip);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(n) = self.max_array_len {
            config.limits.max_array_len = n;
        }
        if let Some(secs) = self.rate_limit_window {
            config.limits.rate_limit_window = Duration::from_secs(secs);
        }
        if let Some(n) = self.rate_limit_max {
            config.limits.rate_limit_max_requests = n;
        }
        if let Some(secs) = self.connect_timeout {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.ping_interval {
            config.ping_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.ping_timeout {
            config.ping_timeout = Duration::from_secs(secs);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_server_config()?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("sortstream-server starting on {}", config.bind_addr);

    let shutdown = CancellationToken::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; shutting down");
                on_ctrl_c.cancel();
            }
            Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
        }
    });

    run_server(config, shutdown).await?;

    info!("sortstream-server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
