use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Split text into trimmed, non-empty paragraphs separated by blank lines.
pub fn segment(text: &str) -> Vec<String> {
    BLANK_LINE_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Byte ranges of the terminated sentences in a paragraph, with leading
/// whitespace excluded. Trailing text without a terminator is not a sentence.
pub fn sentence_spans(paragraph: &str) -> Vec<Range<usize>> {
    SENTENCE_RE
        .find_iter(paragraph)
        .filter_map(|m| {
            let raw = m.as_str();
            let lead = raw.len() - raw.trim_start().len();
            let start = m.start() + lead;
            (start < m.end()).then_some(start..m.end())
        })
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
