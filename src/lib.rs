//! Detect categorized writing issues in prose, score the document, and
//! apply corrections without corrupting the positions of pending issues.
//!
//! ```no_run
//! use redline::{AnalysisOptions, IssueKind, KindSelector, Session};
//!
//! let mut session = Session::with_seed(7);
//! let text = std::fs::read_to_string("essay.txt")?;
//! let analysis = session.analyze(&text, &AnalysisOptions::default())?;
//! println!("{} issues, overall {}", analysis.issues.len(), analysis.overall_score);
//!
//! let report = session.apply_fixes_by_kind(KindSelector::Kind(IssueKind::Spelling))?;
//! println!("{}", report.text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod config;
pub mod detectors;
pub mod error;
pub mod fix;
pub mod history;
pub mod score;
pub mod segment;
pub mod session;
pub mod types;

pub use aggregate::IssueList;
pub use config::{AnalysisOptions, ConfigError, EngineConfig};
pub use detectors::Detector;
pub use error::{EngineError, Result};
pub use fix::{apply_many, apply_one, Document, FixMode, FixOutcome};
pub use history::HistoryEntry;
pub use score::ScoringMode;
pub use segment::segment;
pub use session::{FixReport, Session};
pub use types::{
    Analysis, Applicability, Citation, CitationForm, CitationStyle, DocumentType, Issue, IssueKind,
    KindSelector, Position, ReadabilityLevel, Severity,
};

/// One-shot analysis with a fresh, unseeded session.
pub fn analyze(text: &str, options: &AnalysisOptions) -> Result<Analysis> {
    Session::new().analyze(text, options)
}
