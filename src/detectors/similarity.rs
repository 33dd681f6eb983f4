use rand::{Rng, RngCore};

use super::{Detector, DetectorOutput};
use crate::config::{AnalysisOptions, HP};
use crate::segment::{sentence_spans, word_count};
use crate::types::{Finding, IssueKind, Severity};

/// Placeholder for a text-similarity search.
///
/// Samples at most one substantial sentence from one paragraph and flags it
/// for review. It does not compare against any corpus, so its output is a
/// prompt to double-check sourcing, never evidence of copying. A real
/// similarity backend can replace it behind the [`Detector`] trait.
pub struct SimilarityDetector;

impl Detector for SimilarityDetector {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Plagiarism
    }

    fn enabled(&self, options: &AnalysisOptions) -> bool {
        options.check_plagiarism
    }

    fn detect(
        &self,
        paragraphs: &[String],
        _options: &AnalysisOptions,
        rng: &mut dyn RngCore,
    ) -> DetectorOutput {
        let mut out = DetectorOutput::new();
        if paragraphs.len() < 2 {
            return out;
        }

        let index = rng.random_range(0..paragraphs.len());
        let paragraph = &paragraphs[index];
        let candidates: Vec<_> = sentence_spans(paragraph)
            .into_iter()
            .filter(|s| word_count(&paragraph[s.clone()]) >= HP.similarity_min_sentence_words)
            .collect();
        if candidates.is_empty() {
            return out;
        }

        let span = &candidates[rng.random_range(0..candidates.len())];
        out.push(
            Finding::at(
                IssueKind::Plagiarism,
                Severity::High,
                index,
                paragraph,
                span.start,
                span.end,
            )
            .suggest("Rewrite this passage in your own words or cite its source.")
            .explain("This sentence may closely match published text; verify its originality.")
            .advisory(),
        );
        out
    }
}
