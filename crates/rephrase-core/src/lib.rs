pub mod chunk;
pub mod config;
pub mod error;
pub mod outcome;
pub mod record;
pub mod request;
pub mod wait;

pub use config::{RunPolicy, Timings};
pub use error::{Error, Result, SegmentFailure};
pub use outcome::{Outcome, SegmentReport};
pub use request::{HumanizeMode, Mode, Request};
