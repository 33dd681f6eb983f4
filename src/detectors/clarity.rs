use rand::RngCore;

use super::{Detector, DetectorOutput};
use crate::config::{AnalysisOptions, HP};
use crate::segment::{sentence_spans, word_count};
use crate::types::{Finding, IssueKind, Severity};

/// Flags sentences too long to parse on one read.
pub struct ClarityDetector;

impl Detector for ClarityDetector {
    fn name(&self) -> &'static str {
        "clarity"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Clarity
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
            for span in sentence_spans(paragraph) {
                let words = word_count(&paragraph[span.clone()]);
                if words <= HP.sentence_word_limit {
                    continue;
                }
                out.push(
                    Finding::at(
                        IssueKind::Clarity,
                        Severity::Medium,
                        index,
                        paragraph,
                        span.start,
                        span.end,
                    )
                    .suggest("Split this sentence into two or more shorter sentences.")
                    .explain(format!(
                        "This sentence has {words} words; aim for fewer than {}.",
                        HP.sentence_word_limit
                    ))
                    .advisory(),
                );
            }
        }
        out
    }
}
