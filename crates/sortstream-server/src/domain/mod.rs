//! Domain layer for sortstream-server.
//!
//! Pure types with no I/O: the JSON event protocol spoken with the browser
//! and the runtime configuration.  Nothing here touches sockets, timers or
//! tasks, so every type can be built and inspected directly in tests.

pub mod config;
pub mod messages;

pub use config::{ServerConfig, SessionLimits};
pub use messages::{ClientMsg, ServerMsg, Speed, StartSortRequest};
