//! Fix application.
//!
//! A [`Document`] is never edited in place: every fix yields a new paragraph
//! sequence. Batches are applied bottom-to-top and right-to-left so a
//! replacement never shifts the offsets of a fix still waiting its turn.
//!
//! Issues are snapshots of the document they were detected against. When
//! overlapping fixes in one batch leave a later issue's span pointing at
//! different text, that issue is still applied at its stored offsets and
//! counted as stale in the [`FixOutcome`].

use log::{debug, warn};
use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::segment::segment;
use crate::types::Issue;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    paragraphs: Vec<String>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            paragraphs: segment(text),
        }
    }

    pub fn from_paragraphs(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&str> {
        self.paragraphs.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraphs joined by blank lines.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

/// Which issues a bulk fix may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Every selected issue, advisory suggestions included
    #[default]
    All,
    /// Only issues whose suggestion is literal replacement text
    LiteralOnly,
}

impl FixMode {
    pub fn allows(&self, issue: &Issue) -> bool {
        match self {
            FixMode::All => true,
            FixMode::LiteralOnly => !issue.is_advisory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFix {
    pub issue_id: String,
    pub reason: String,
}

/// Result of applying a batch of fixes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixOutcome {
    pub document: Document,
    /// Ids of applied issues, in application order
    pub applied: Vec<String>,
    pub skipped: Vec<SkippedFix>,
    /// Applied issues whose span no longer held their matched text
    pub stale: usize,
}

/// Replace one issue's span with its suggestion.
pub fn apply_one(document: &Document, issue: &Issue) -> Result<Document> {
    let index = issue.position.paragraph_index;
    let paragraph = document
        .paragraph(index)
        .ok_or_else(|| out_of_range(document, issue))?;
    let rewritten = splice(paragraph, issue).ok_or_else(|| out_of_range(document, issue))?;

    let mut paragraphs = document.paragraphs.clone();
    paragraphs[index] = rewritten;
    Ok(Document { paragraphs })
}

/// Apply a batch in one pass, in decreasing `(paragraph, start)` order.
///
/// Issues whose position no longer fits are skipped and reported; the rest
/// of the batch still goes through.
pub fn apply_many<'a, I>(document: &Document, issues: I) -> FixOutcome
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut sorted: Vec<&Issue> = issues.into_iter().collect();
    sorted.sort_by(|a, b| {
        (b.position.paragraph_index, b.position.start_offset)
            .cmp(&(a.position.paragraph_index, a.position.start_offset))
    });

    let mut outcome = FixOutcome {
        document: document.clone(),
        ..FixOutcome::default()
    };

    for issue in sorted {
        let stale = issue.is_stale(&outcome.document);
        let index = issue.position.paragraph_index;
        let rewritten = outcome
            .document
            .paragraph(index)
            .and_then(|paragraph| splice(paragraph, issue));

        match rewritten {
            Some(text) => {
                if stale {
                    debug!(
                        "applying stale fix {}: span no longer holds '{}'",
                        issue.id, issue.matched_text
                    );
                    outcome.stale += 1;
                }
                outcome.document.paragraphs[index] = text;
                outcome.applied.push(issue.id.clone());
            }
            None => {
                let err = out_of_range(&outcome.document, issue);
                warn!("skipping fix: {err}");
                outcome.skipped.push(SkippedFix {
                    issue_id: issue.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    outcome
}

/// `None` when the start offset lies past the paragraph's end.
fn splice(paragraph: &str, issue: &Issue) -> Option<String> {
    let start = issue.position.start_offset;
    if start >= paragraph.len() {
        return None;
    }
    let start = snap_to_char_boundary(paragraph, start, false);
    let end = snap_to_char_boundary(paragraph, issue.position.end_offset, true).max(start);

    let mut out = String::with_capacity(paragraph.len() + issue.suggestion.len());
    out.push_str(&paragraph[..start]);
    out.push_str(&issue.suggestion);
    out.push_str(&paragraph[end..]);
    Some(out)
}

fn out_of_range(document: &Document, issue: &Issue) -> EngineError {
    EngineError::PositionOutOfRange {
        issue_id: issue.id.clone(),
        paragraph_index: issue.position.paragraph_index,
        start_offset: issue.position.start_offset,
        paragraph_count: document.len(),
        paragraph_len: document
            .paragraph(issue.position.paragraph_index)
            .map_or(0, str::len),
    }
}

/// Snap a byte offset to a valid char boundary.
/// If `forward` is true, snap forward; otherwise snap backward.
fn snap_to_char_boundary(text: &str, pos: usize, forward: bool) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    if forward {
        while p < text.len() && !text.is_char_boundary(p) {
            p += 1;
        }
    } else {
        while p > 0 && !text.is_char_boundary(p) {
            p -= 1;
        }
    }
    p
}
