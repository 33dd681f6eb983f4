//! Document scoring.
//!
//! In [`ScoringMode::Simulated`] the grammar, style and readability scores
//! are baselines sampled from fixed ranges, standing in for an external
//! scoring service. [`ScoringMode::Deterministic`] derives them from the
//! text and the issue list instead. Either way the baseline is drawn once
//! per analysis, so re-scoring unchanged text gives the same numbers.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::HP;
use crate::segment::{segment, sentence_spans, word_count};
use crate::types::{DocumentType, Issue, IssueKind, ReadabilityLevel, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    #[default]
    Simulated,
    Deterministic,
}

/// Starting scores before issue penalties and document-type adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub grammar: u8,
    pub style: u8,
    /// `None` means "measure from the text"
    pub readability: Option<u8>,
}

impl Baseline {
    pub fn sample(mode: ScoringMode, rng: &mut dyn RngCore) -> Self {
        match mode {
            ScoringMode::Simulated => Self {
                grammar: rng.random_range(HP.grammar_range.0..=HP.grammar_range.1),
                style: rng.random_range(HP.style_range.0..=HP.style_range.1),
                readability: Some(
                    rng.random_range(HP.readability_range.0..=HP.readability_range.1),
                ),
            },
            ScoringMode::Deterministic => Self {
                grammar: HP.grammar_range.1,
                style: HP.style_range.1,
                readability: None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub readability_score: u8,
    pub readability_level: ReadabilityLevel,
    pub grammar_score: u8,
    pub style_score: u8,
    pub overall_score: u8,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    mode: ScoringMode,
}

impl Scorer {
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn score(
        &self,
        text: &str,
        issues: &[Issue],
        document_type: DocumentType,
        baseline: &Baseline,
    ) -> Scores {
        let wc = word_count(text);

        let mut readability = baseline
            .readability
            .unwrap_or_else(|| flesch_reading_ease(text));
        let (mut grammar, mut style) = match self.mode {
            ScoringMode::Simulated => (baseline.grammar, baseline.style),
            ScoringMode::Deterministic => {
                let grammar_penalty = penalty(issues, &GRAMMAR_KINDS);
                let style_penalty = penalty(issues, &STYLE_KINDS);
                (
                    baseline.grammar.saturating_sub(grammar_penalty),
                    baseline.style.saturating_sub(style_penalty),
                )
            }
        };

        match document_type {
            DocumentType::Academic => {
                readability = readability
                    .saturating_sub(HP.academic_readability_penalty)
                    .max(HP.academic_readability_floor)
                    .min(readability);
            }
            DocumentType::Creative => {
                style = style
                    .saturating_add(HP.creative_style_bonus)
                    .min(HP.creative_style_cap)
                    .max(style);
            }
            DocumentType::Business | DocumentType::General => {}
        }

        grammar = grammar.min(100);
        style = style.min(100);
        readability = readability.min(100);
        let overall = ((u16::from(grammar) + u16::from(style)) / 2) as u8;

        Scores {
            word_count: wc,
            reading_time_minutes: wc.div_ceil(HP.words_per_minute),
            readability_score: readability,
            readability_level: ReadabilityLevel::for_score(readability),
            grammar_score: grammar,
            style_score: style,
            overall_score: overall,
        }
    }
}

const GRAMMAR_KINDS: [IssueKind; 3] = [
    IssueKind::Grammar,
    IssueKind::Spelling,
    IssueKind::Punctuation,
];
const STYLE_KINDS: [IssueKind; 3] = [IssueKind::Style, IssueKind::Structure, IssueKind::Clarity];

fn penalty(issues: &[Issue], kinds: &[IssueKind]) -> u8 {
    let total: usize = issues
        .iter()
        .filter(|i| kinds.contains(&i.kind))
        .map(|i| {
            usize::from(match i.severity {
                Severity::Low => HP.penalty_low,
                Severity::Medium => HP.penalty_medium,
                Severity::High => HP.penalty_high,
            })
        })
        .sum();
    total.min(u8::MAX as usize) as u8
}

/// Flesch reading ease, clamped to 0..=100.
fn flesch_reading_ease(text: &str) -> u8 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }
    let sentences = segment(text)
        .iter()
        .map(|p| sentence_spans(p).len())
        .sum::<usize>()
        .max(1);
    let syllables: usize = words.iter().map(|w| syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let ease = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    ease.round().clamp(0.0, 100.0) as u8
}

fn syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }
    // silent trailing e
    if letters.len() > 2 && letters.ends_with(&['e']) && !is_vowel(letters[letters.len() - 2]) {
        groups -= 1;
    }
    groups.max(1)
}
