//! sortstream-server library crate.
//!
//! Streams the steps of a sorting algorithm to a browser over WebSocket so
//! the browser can animate them.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser (JSON over WebSocket)
//!         ↕
//! [sortstream-server]
//!   ├── domain/           Event protocol types, ServerConfig
//!   ├── application/      Session supervisor, sort jobs, pacing / pause / cancel
//!   └── infrastructure/
//!         ├── ws_server/    Accept loop, reader loop, writer + keep-alive
//!         └── config_file/  Optional TOML configuration
//!         ↕
//! sortstream-core (instrumented algorithms)
//! ```
//!
//! # Layer rules
//!
//! - `domain` does no I/O and spawns nothing.
//! - `application` depends on `domain` and `sortstream-core`; it uses Tokio
//!   channels and timers but never touches a socket.
//! - `infrastructure` depends on everything else plus `tokio-tungstenite`.

/// Domain layer: event protocol and configuration types.
pub mod domain;

/// Application layer: per-connection supervision of sort jobs.
pub mod application;

/// Infrastructure layer: WebSocket server and config file.
pub mod infrastructure;
