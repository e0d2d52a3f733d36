use crate::chunk::DEFAULT_WORD_LIMIT;
use crate::wait::Poller;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays and timeouts used while driving the rewriting page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How often page state is re-checked while waiting
    pub poll_interval: Duration,
    /// Upper bound for an element to appear
    pub element_timeout: Duration,
    /// Fixed wait after submitting a segment
    pub settle_delay: Duration,
    /// Upper bound for output text to appear once the settle delay is over
    pub output_timeout: Duration,
    /// Fixed wait after loading a tool page
    pub navigation_delay: Duration,
    /// Short pause between interaction steps
    pub interaction_pause: Duration,
    /// Upper bound for the input box to read empty after clearing
    pub clear_timeout: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            element_timeout: Duration::from_secs(20),
            settle_delay: Duration::from_secs(15),
            output_timeout: Duration::from_secs(5),
            navigation_delay: Duration::from_secs(2),
            interaction_pause: Duration::from_millis(500),
            clear_timeout: Duration::from_secs(2),
        }
    }
}

impl Timings {
    pub fn element_poller(&self) -> Poller {
        Poller::new(self.poll_interval, self.element_timeout)
    }

    pub fn output_poller(&self) -> Poller {
        Poller::new(self.poll_interval, self.output_timeout)
    }

    pub fn clear_poller(&self) -> Poller {
        Poller::new(self.poll_interval, self.clear_timeout)
    }
}

/// How a run turns segment results into an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunPolicy {
    /// Maximum words per submitted segment
    pub word_limit: usize,
    /// Report success with empty text when every segment failed
    pub allow_empty_result: bool,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            word_limit: DEFAULT_WORD_LIMIT,
            allow_empty_result: false,
        }
    }
}
