//! Platform-agnostic reconnection backoff for the bridge clients.
//!
//! Free of runtime dependencies (tokio, web-sys) so desktop and wasm share
//! the same backoff math.

use super::shared::{
    BACKOFF_MULTIPLIER, INITIAL_RETRY_DELAY_MS, MAX_RETRY_ATTEMPTS, MAX_RETRY_DELAY_MS,
};

/// Exponential backoff state shared by reconnect logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffState {
    attempts: u32,
    delay_ms: u64,
}

impl Default for BackoffState {
    fn default() -> Self {
        Self {
            attempts: 0,
            delay_ms: INITIAL_RETRY_DELAY_MS,
        }
    }
}

impl BackoffState {
    /// Start over after a successful connection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= MAX_RETRY_ATTEMPTS
    }

    /// Advance to the next attempt.
    ///
    /// Returns the delay to wait *before* this attempt, or `None` once the
    /// attempt budget is spent.
    pub fn next_delay_and_advance(&mut self) -> Option<u64> {
        if self.is_exhausted() {
            return None;
        }

        let current_delay = self.delay_ms;
        self.attempts += 1;
        self.delay_ms =
            ((self.delay_ms as f64) * BACKOFF_MULTIPLIER).min(MAX_RETRY_DELAY_MS as f64) as u64;
        Some(current_delay)
    }
}
