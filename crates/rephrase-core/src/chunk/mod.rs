//! Word-bounded text segmentation.
//!
//! The rewriting tools only accept a limited number of words per submission,
//! so long input is cut into segments that stay under the limit and, where
//! possible, end on a sentence boundary. A sentence is never split; a single
//! sentence longer than the limit becomes its own oversized segment.

mod sentence;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use sentence::sentence_spans;

/// Free-tier word limit of the rewriting tools.
pub const DEFAULT_WORD_LIMIT: usize = 125;

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new(r"\b[\w']+\b").unwrap();
}

/// One unit of submission, numbered from 1 in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub text: String,
    pub words: usize,
}

/// Count words as runs of word characters and apostrophes
pub fn word_count(text: &str) -> usize {
    WORD_PATTERN.find_iter(text).count()
}

/// Split `text` into segments of at most `limit` words.
///
/// Text that already fits is returned as a single segment, untouched. Blank
/// text yields no segments.
pub fn split(text: &str, limit: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    if word_count(text) <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    // Byte range of the sentences accumulated so far
    let mut pending: Option<(usize, usize)> = None;
    let mut pending_words = 0;

    for (start, end) in sentence_spans(text) {
        let sentence = &text[start..end];
        let words = word_count(sentence);

        if pending_words + words <= limit {
            pending = Some(match pending {
                Some((first, _)) => (first, end),
                None => (start, end),
            });
            pending_words += words;
        } else if words > limit {
            flush(text, pending.take(), &mut chunks);
            push_trimmed(&mut chunks, sentence);
            pending_words = 0;
        } else {
            flush(text, pending.take(), &mut chunks);
            pending = Some((start, end));
            pending_words = words;
        }
    }

    flush(text, pending, &mut chunks);

    tracing::debug!("Split {} words into {} segments", word_count(text), chunks.len());

    chunks
}

/// Split `text` and number the resulting segments
pub fn segments(text: &str, limit: usize) -> Vec<Segment> {
    split(text, limit)
        .into_iter()
        .enumerate()
        .map(|(i, text)| Segment {
            index: i + 1,
            words: word_count(&text),
            text,
        })
        .collect()
}

fn flush(text: &str, span: Option<(usize, usize)>, chunks: &mut Vec<String>) {
    if let Some((start, end)) = span {
        push_trimmed(chunks, &text[start..end]);
    }
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}
