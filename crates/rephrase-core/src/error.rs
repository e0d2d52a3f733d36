use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single segment produced no output.
///
/// These never abort a run; the session records them per segment and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentFailure {
    #[error("input box not found")]
    InputNotFound,

    #[error("input box could not be cleared")]
    InputNotCleared,

    #[error("'{0}' button not found")]
    ControlNotFound(String),

    #[error("output box stayed empty")]
    ExtractionEmpty,

    #[error("interaction failed: {0}")]
    Interaction(String),
}
