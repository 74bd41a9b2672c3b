//! Error types for the application layer.
//!
//! Two families, kept apart on purpose:
//!
//! - [`SortRejection`] is user-visible.  Its `Display` text is sent verbatim
//!   as the `sortError` message.
//! - [`Halt`] stops a job early (superseded, cancelled, client gone).  It is
//!   never shown to the user.

use sortstream_core::InputError;
use thiserror::Error;

/// Why a `startSort` request was refused, or why a job failed.
#[derive(Debug, Error, PartialEq)]
pub enum SortRejection {
    /// `array` is not a non-empty JSON array of numbers.
    #[error("Invalid array input")]
    InvalidArray,

    /// `array` has more elements than the configured maximum.
    #[error("Array too large (max {max} elements)")]
    ArrayTooLarge { max: usize },

    /// No algorithm is registered under the requested key.
    #[error("Algorithm {0} not supported")]
    UnsupportedAlgorithm(String),

    /// The connection used up its start requests for this window.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The algorithm refused the input (counting / radix domain).
    #[error(transparent)]
    Input(#[from] InputError),

    /// The algorithm panicked while producing steps.
    #[error("Internal error while sorting")]
    Internal,
}

/// Reasons a job stops before its stream ends.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The job's cancellation token fired.
    #[error("sort job cancelled")]
    Cancelled,
    /// A newer job took over the session's outbox.
    #[error("sort job superseded")]
    Superseded,
    /// The connection's outbound channel is closed.
    #[error("client disconnected")]
    Disconnected,
}
