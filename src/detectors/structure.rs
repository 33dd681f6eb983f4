use rand::RngCore;

use super::{Detector, DetectorOutput};
use crate::config::{AnalysisOptions, HP};
use crate::segment::word_count;
use crate::types::{Finding, IssueKind, Severity};

/// Flags paragraphs too long to read comfortably.
pub struct StructureDetector;

impl Detector for StructureDetector {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Structure
    }

    fn enabled(&self, options: &AnalysisOptions) -> bool {
        options.check_style
    }

    fn detect(
        &self,
        paragraphs: &[String],
        _options: &AnalysisOptions,
        _rng: &mut dyn RngCore,
    ) -> DetectorOutput {
        let mut out = DetectorOutput::new();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            let words = word_count(paragraph);
            if words <= HP.paragraph_word_limit {
                continue;
            }
            out.push(
                Finding::at(
                    IssueKind::Structure,
                    Severity::Medium,
                    index,
                    paragraph,
                    0,
                    paragraph.len(),
                )
                .suggest("Break this paragraph into smaller paragraphs, one idea each.")
                .explain(format!(
                    "This paragraph has {words} words; readers lose track beyond {}.",
                    HP.paragraph_word_limit
                ))
                .advisory(),
            );
        }
        out
    }
}
