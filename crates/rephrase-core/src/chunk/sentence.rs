use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Terminal punctuation followed by whitespace. No abbreviation handling.
    static ref SENTENCE_BREAK: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Byte spans of the sentences in `text`.
///
/// Each span keeps its terminal punctuation; the whitespace after it belongs
/// to no span. Spans are returned in order and never overlap.
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is a single ASCII byte
        let end = m.start() + 1;
        spans.push((start, end));
        start = m.end();
    }

    if start < text.len() {
        spans.push((start, text.len()));
    }

    spans
}
