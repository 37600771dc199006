//! Rate Limiter Module
//!
//! Sliding-window operation gate shared by cache operations. Shedding is
//! silent: a gated call degrades to a no-op or a miss, never an error.

use std::time::{Duration, Instant};

// == Rate Limiter ==
/// Fixed-duration window with a max-operation budget that resets wholesale
/// once the window elapses.
#[derive(Debug)]
pub struct RateLimiter {
    /// Start of the current window
    window_start: Instant,
    /// Operations admitted in the current window
    count: u64,
    /// Window duration
    window: Duration,
    /// Maximum admitted operations per window
    max_ops: u64,
    /// Cumulative count of shed operations, survives window resets
    rate_limited: u64,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a new rate limiter with the given window and budget.
    pub fn new(window_ms: u64, max_ops: u64) -> Self {
        Self {
            window_start: Instant::now(),
            count: 0,
            window: Duration::from_millis(window_ms),
            max_ops,
            rate_limited: 0,
        }
    }

    // == Allow ==
    /// Gates one operation. Returns true if it may proceed; a false return
    /// means the call was shed and the cumulative counter was bumped.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= self.window {
            self.window_start = now;
            self.count = 0;
        }

        if self.count >= self.max_ops {
            self.rate_limited += 1;
            return false;
        }

        self.count += 1;
        true
    }

    // == Rate Limited Count ==
    /// Returns the cumulative number of shed operations.
    pub fn rate_limited_count(&self) -> u64 {
        self.rate_limited
    }

    // == Reset ==
    /// Restarts the window and zeroes both the window counter and the
    /// cumulative shed counter.
    pub fn reset(&mut self) {
        self.window_start = Instant::now();
        self.count = 0;
        self.rate_limited = 0;
    }
}
