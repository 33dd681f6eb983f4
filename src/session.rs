//! The engine session: one working document, its current analysis, and the
//! log of past analyses.
//!
//! Edits take `&mut self`, so a session applies one fix batch at a time
//! against one consistent document snapshot.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::aggregate::IssueList;
use crate::config::{AnalysisOptions, EngineConfig, HP};
use crate::detectors::{default_detectors, run_detectors, Detector};
use crate::error::{EngineError, Result};
use crate::fix::{apply_many, apply_one, Document, FixMode, SkippedFix};
use crate::history::{HistoryEntry, SessionLog};
use crate::score::{Baseline, Scorer, ScoringMode};
use crate::types::{Analysis, Citation, KindSelector};

/// Outcome of `apply_fix` / `apply_fixes_by_kind`
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub text: String,
    pub analysis: Analysis,
    pub applied: usize,
    /// Issues whose position no longer fit; they stay in `analysis.issues`
    pub skipped: Vec<SkippedFix>,
    pub stale: usize,
}

struct Active {
    document: Document,
    options: AnalysisOptions,
    baseline: Baseline,
    citations: Vec<Citation>,
    issues: IssueList,
    analysis: Analysis,
}

pub struct Session {
    detectors: Vec<Box<dyn Detector>>,
    scorer: Scorer,
    rng: StdRng,
    history: SessionLog,
    active: Option<Active>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A session whose sampling and simulated scores are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let session = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        session.with_scoring(config.scoring)
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            detectors: default_detectors(),
            scorer: Scorer::default(),
            rng,
            history: SessionLog::new(),
            active: None,
        }
    }

    pub fn with_scoring(mut self, mode: ScoringMode) -> Self {
        self.scorer = Scorer::new(mode);
        self
    }

    /// Replace the detection passes, e.g. to plug in a real grammar backend.
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn Detector>>) -> Self {
        self.detectors = detectors;
        self
    }

    pub fn analyze(&mut self, text: &str, options: &AnalysisOptions) -> Result<Analysis> {
        let trimmed = text.trim();
        let length = trimmed.chars().count();
        if length < HP.min_input_chars {
            return Err(EngineError::InputTooShort {
                length,
                minimum: HP.min_input_chars,
            });
        }

        let document = Document::from_text(text);
        let output = run_detectors(
            &self.detectors,
            document.paragraphs(),
            options,
            &mut self.rng,
        );
        let issues = IssueList::aggregate(output.findings);
        let baseline = Baseline::sample(self.scorer.mode(), &mut self.rng);
        let analysis = build_analysis(
            &self.scorer,
            &document,
            &issues,
            &output.citations,
            options,
            &baseline,
        );

        info!(
            "analyzed {} paragraphs: {} words, {} issues, {} citations",
            document.len(),
            analysis.word_count,
            analysis.issues.len(),
            analysis.citations.len()
        );
        self.history
            .record(trimmed, analysis.word_count, analysis.issues.len());

        self.active = Some(Active {
            document,
            options: options.clone(),
            baseline,
            citations: output.citations,
            issues,
            analysis: analysis.clone(),
        });
        Ok(analysis)
    }

    /// Apply a single issue by id. On failure the document is unchanged.
    pub fn apply_fix(&mut self, issue_id: &str) -> Result<FixReport> {
        let active = self.active.as_mut().ok_or(EngineError::NoActiveDocument)?;
        let issue = active
            .issues
            .get(issue_id)
            .ok_or_else(|| EngineError::UnknownIssue(issue_id.to_string()))?;
        let stale = usize::from(issue.is_stale(&active.document));

        active.document = apply_one(&active.document, issue)?;
        active.issues.remove_ids(&[issue_id.to_string()]);
        Ok(report(&self.scorer, active, 1, Vec::new(), stale))
    }

    /// Apply every issue of one kind, or all issues.
    pub fn apply_fixes_by_kind(&mut self, selector: KindSelector) -> Result<FixReport> {
        self.apply_fixes_with(selector, FixMode::All)
    }

    pub fn apply_fixes_with(&mut self, selector: KindSelector, mode: FixMode) -> Result<FixReport> {
        let active = self.active.as_mut().ok_or(EngineError::NoActiveDocument)?;
        let targets = active.issues.select(selector);
        let outcome = apply_many(
            &active.document,
            targets.into_iter().filter(|i| mode.allows(i)),
        );

        active.document = outcome.document;
        active.issues.remove_ids(&outcome.applied);
        Ok(report(
            &self.scorer,
            active,
            outcome.applied.len(),
            outcome.skipped,
            outcome.stale,
        ))
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.active.as_ref().map(|a| &a.analysis)
    }

    pub fn document(&self) -> Option<&Document> {
        self.active.as_ref().map(|a| &a.document)
    }

    pub fn document_text(&self) -> Option<String> {
        self.document().map(Document::text)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    /// Forget the working document and the history.
    pub fn reset(&mut self) {
        self.active = None;
        self.history.clear();
    }
}

fn report(
    scorer: &Scorer,
    active: &mut Active,
    applied: usize,
    skipped: Vec<SkippedFix>,
    stale: usize,
) -> FixReport {
    active.analysis = build_analysis(
        scorer,
        &active.document,
        &active.issues,
        &active.citations,
        &active.options,
        &active.baseline,
    );
    FixReport {
        text: active.document.text(),
        analysis: active.analysis.clone(),
        applied,
        skipped,
        stale,
    }
}

fn build_analysis(
    scorer: &Scorer,
    document: &Document,
    issues: &IssueList,
    citations: &[Citation],
    options: &AnalysisOptions,
    baseline: &Baseline,
) -> Analysis {
    let scores = scorer.score(
        &document.text(),
        issues.as_slice(),
        options.document_type,
        baseline,
    );
    Analysis {
        word_count: scores.word_count,
        reading_time_minutes: scores.reading_time_minutes,
        readability_score: scores.readability_score,
        readability_level: scores.readability_level,
        grammar_score: scores.grammar_score,
        style_score: scores.style_score,
        overall_score: scores.overall_score,
        citations: citations.to_vec(),
        issues: issues.as_slice().to_vec(),
    }
}
