//! Bounded polling for page state.
//!
//! The rewriting pages expose no completion signal, so every wait is a poll
//! at a fixed interval bounded by a timeout. Built on `tokio::time`, which
//! lets tests run against a paused clock.

use std::time::Duration;
use tokio::time::Instant;

/// Poll interval and timeout for one kind of wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    interval: Duration,
    timeout: Duration,
}

impl Poller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Start the clock for one wait
    pub fn start(&self) -> Deadline {
        Deadline {
            interval: self.interval,
            until: Instant::now() + self.timeout,
        }
    }
}

/// A running wait. Probe, then `tick` until it reports expiry:
///
/// ```ignore
/// let mut deadline = poller.start();
/// loop {
///     if ready().await { break; }
///     if !deadline.tick().await { return Err(timeout); }
/// }
/// ```
#[derive(Debug)]
pub struct Deadline {
    interval: Duration,
    until: Instant,
}

impl Deadline {
    /// Sleep for one poll interval, clamped to the deadline.
    ///
    /// Returns `false` without sleeping once the deadline has passed.
    pub async fn tick(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.until {
            return false;
        }

        let wake = (now + self.interval).min(self.until);
        tokio::time::sleep_until(wake).await;
        true
    }
}
