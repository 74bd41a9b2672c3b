//! Infrastructure layer for sortstream-server.
//!
//! All I/O lives here: binding the listener, the WebSocket handshake and
//! framing, keep-alive pings, and reading the optional config file.  Parsed
//! events are handed to the application layer's `SessionSupervisor`.

pub mod config_file;
pub mod ws_server;

pub use config_file::{ConfigError, FileConfig};
pub use ws_server::{run_server, serve};
