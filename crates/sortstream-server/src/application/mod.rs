//! Application layer for sortstream-server.
//!
//! Owns the rules of a session: what a `startSort` goes through before a job
//! exists, how a job's steps are paced, paused and cancelled, and which
//! failures the user gets to see.  Nothing here opens a socket; the
//! infrastructure layer hands in an outbound channel and feeds parsed events.
//!
//! - [`supervisor`] – per-connection [`SessionSupervisor`]
//! - [`job`] – one running [`SortJob`]
//! - [`driver`] – the async step emitter contract ([`StepEmitter`], [`drive`])
//! - [`outbox`], [`pause`], [`rate_limit`] – the session state pieces
//! - [`error`] – [`SortRejection`] (user-visible) and [`Halt`] (silent)

pub mod driver;
pub mod error;
pub mod job;
pub mod outbox;
pub mod pause;
pub mod rate_limit;
pub mod supervisor;

pub use driver::{drive, StepEmitter};
pub use error::{Halt, SortRejection};
pub use job::SortJob;
pub use outbox::Outbox;
pub use pause::{PauseGate, PauseWaiter};
pub use rate_limit::FixedWindow;
pub use supervisor::SessionSupervisor;
