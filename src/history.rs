use std::collections::VecDeque;

use serde::Serialize;

use crate::config::HP;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub title_snippet: String,
    pub word_count: usize,
    pub issue_count: usize,
}

/// Newest-first log of past analyses, capped at a handful of entries.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: VecDeque<HistoryEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, title_snippet: &str, word_count: usize, issue_count: usize) {
        self.entries.push_front(HistoryEntry {
            title_snippet: title_snippet.chars().take(HP.title_snippet_chars).collect(),
            word_count,
            issue_count,
        });
        self.entries.truncate(HP.history_cap);
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
