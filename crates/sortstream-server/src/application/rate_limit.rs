//! Fixed-window request counter, one per connection.
//!
//! The window opens at the first request and resets once more than `window`
//! has elapsed since it opened.  Within a window at most `max_requests`
//! requests pass; the rest are refused and do not count.

use std::time::Duration;

use tokio::time::Instant;

/// Per-connection fixed-window rate limiter.
#[derive(Debug)]
pub struct FixedWindow {
    window: Duration,
    max_requests: u32,
    count: u32,
    window_start: Instant,
}

impl FixedWindow {
    /// Creates a limiter whose first window opens at `now`.
    pub fn new(window: Duration, max_requests: u32, now: Instant) -> Self {
        Self {
            window,
            max_requests,
            count: 0,
            window_start: now,
        }
    }

    /// Counts a request made at `now`.  Returns `false` when the window's
    /// budget is already spent.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.window_start) > self.window {
            self.count = 0;
            self.window_start = now;
        }
        if self.count >= self.max_requests {
            return false;
        }
        self.count += 1;
        true
    }

    /// Requests left in the current window, as of the last call.
    pub fn remaining(&self) -> u32 {
        self.max_requests.saturating_sub(self.count)
    }
}
