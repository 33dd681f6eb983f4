//! Detection passes.
//!
//! Each pass is a [`Detector`] strategy producing findings of one category
//! from the paragraph sequence. Passes never see each other's output, and
//! each one draws from its own random stream, so enabling or disabling one
//! pass never changes what another reports.

mod citation;
mod clarity;
mod grammar;
mod similarity;
mod spelling;
mod structure;
mod style;

pub use citation::CitationDetector;
pub use clarity::ClarityDetector;
pub use grammar::GrammarDetector;
pub use similarity::SimilarityDetector;
pub use spelling::SpellingDetector;
pub use structure::StructureDetector;
pub use style::StyleDetector;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::AnalysisOptions;
use crate::types::{Citation, Finding, IssueKind};

pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> IssueKind;

    fn enabled(&self, options: &AnalysisOptions) -> bool;

    fn detect(
        &self,
        paragraphs: &[String],
        options: &AnalysisOptions,
        rng: &mut dyn RngCore,
    ) -> DetectorOutput;
}

#[derive(Debug, Default)]
pub struct DetectorOutput {
    pub findings: Vec<Finding>,
    pub citations: Vec<Citation>,
}

impl DetectorOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    fn merge(&mut self, other: DetectorOutput) {
        self.findings.extend(other.findings);
        self.citations.extend(other.citations);
    }
}

/// All passes, in reporting order.
pub fn default_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(GrammarDetector),
        Box::new(SpellingDetector),
        Box::new(StyleDetector),
        Box::new(StructureDetector),
        Box::new(ClarityDetector),
        Box::new(CitationDetector),
        Box::new(SimilarityDetector),
    ]
}

/// Run every enabled detector and join their output.
pub fn run_detectors(
    detectors: &[Box<dyn Detector>],
    paragraphs: &[String],
    options: &AnalysisOptions,
    rng: &mut dyn RngCore,
) -> DetectorOutput {
    let base_seed: u64 = rng.random();
    let mut joined = DetectorOutput::new();

    for detector in detectors {
        if !detector.enabled(options) {
            continue;
        }
        let mut stream = StdRng::seed_from_u64(base_seed ^ salt(detector.name()));
        let out = detector.detect(paragraphs, options, &mut stream);
        debug!(
            "{} detector ({}): {} findings, {} citations",
            detector.name(),
            detector.kind(),
            out.findings.len(),
            out.citations.len()
        );
        joined.merge(out);
    }
    joined
}

fn salt(name: &str) -> u64 {
    // FNV-1a
    name.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Capitalise `replacement` when the text it replaces starts with a capital.
pub(crate) fn match_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
