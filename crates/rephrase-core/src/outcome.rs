use crate::SegmentFailure;
use crate::chunk::Segment;
use serde::{Deserialize, Serialize};

/// What happened to one segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub index: usize,
    pub words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl SegmentReport {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Terminal result of a rewrite. Exactly one of `text` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub text: Option<String>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SegmentReport>,
}

impl Outcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: Some(text.into()),
            error: None,
            segments: Vec::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.into()),
            segments: Vec::new(),
        }
    }

    /// Join per-segment results in order.
    ///
    /// Failed segments contribute nothing. If every segment failed the
    /// outcome is a failure unless `allow_empty` is set, in which case it
    /// succeeds with empty text.
    pub fn from_segments(
        results: Vec<(Segment, Result<String, SegmentFailure>)>,
        allow_empty: bool,
    ) -> Self {
        let total = results.len();
        let mut text = String::new();
        let mut reports = Vec::with_capacity(total);

        for (segment, result) in results {
            let report = match result {
                Ok(output) => {
                    let output = output.trim();
                    if !output.is_empty() {
                        text.push_str(output);
                        text.push(' ');
                    }
                    SegmentReport {
                        index: segment.index,
                        words: segment.words,
                        output_chars: Some(output.chars().count()),
                        failure: None,
                    }
                }
                Err(failure) => SegmentReport {
                    index: segment.index,
                    words: segment.words,
                    output_chars: None,
                    failure: Some(failure.to_string()),
                },
            };
            reports.push(report);
        }

        let failed = reports.iter().filter(|r| r.is_failed()).count();

        let mut outcome = if failed == total && total > 0 && !allow_empty {
            Outcome::failure(format!(
                "no segment produced output ({} of {} failed)",
                failed, total
            ))
        } else {
            Outcome::success(text.trim())
        };
        outcome.segments = reports;
        outcome
    }

    pub fn failed_segments(&self) -> usize {
        self.segments.iter().filter(|r| r.is_failed()).count()
    }
}
