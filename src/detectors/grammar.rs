use once_cell::sync::Lazy;
use rand::{Rng, RngCore};
use regex::Regex;

use super::{match_case, Detector, DetectorOutput};
use crate::config::{AnalysisOptions, HP};
use crate::segment::sentence_spans;
use crate::types::{Finding, IssueKind, Severity};

struct GrammarRule {
    kind: IssueKind,
    pattern: Regex,
    /// Expanded against the match's capture groups
    template: &'static str,
    explanation: &'static str,
}

fn rule(
    kind: IssueKind,
    pattern: &str,
    template: &'static str,
    explanation: &'static str,
) -> GrammarRule {
    GrammarRule {
        kind,
        pattern: Regex::new(pattern).unwrap(),
        template,
        explanation,
    }
}

static RULES: Lazy<Vec<GrammarRule>> = Lazy::new(|| {
    use IssueKind::{Grammar, Punctuation};
    vec![
        rule(
            Grammar,
            r"(?i)\b(could|should|would|must|might) of\b",
            "${1} have",
            "'Of' is not a verb. Use 'have' after a modal verb.",
        ),
        rule(
            Grammar,
            r"(?i)\b(he|she|it) don't\b",
            "${1} doesn't",
            "Third-person singular subjects take 'doesn't'.",
        ),
        rule(
            Grammar,
            r"(?i)\b(they|we|you) was\b",
            "${1} were",
            "Plural subjects take 'were'.",
        ),
        rule(
            Grammar,
            r"(?i)\bthere is (many|several|numerous|few)\b",
            "there are ${1}",
            "A plural subject after 'there' takes 'are'.",
        ),
        rule(
            Grammar,
            r"(?i)\b(have|has|had) went\b",
            "${1} gone",
            "The past participle of 'go' is 'gone'.",
        ),
        rule(
            Grammar,
            r"(?i)\byour welcome\b",
            "you're welcome",
            "'Your' is possessive; the contraction of 'you are' is 'you're'.",
        ),
        rule(
            Grammar,
            r"(?i)\bits (a|an|the|not|been|going)\b",
            "it's ${1}",
            "'Its' is possessive; the contraction of 'it is' is 'it's'.",
        ),
        rule(
            Grammar,
            r"(?i)\bbetween you and I\b",
            "between you and me",
            "After a preposition use the object pronoun 'me'.",
        ),
        rule(
            Grammar,
            r"(?i)\bless (people|students|items|books|words|mistakes|errors)\b",
            "fewer ${1}",
            "Use 'fewer' with countable nouns.",
        ),
        rule(
            Grammar,
            r"(?i)\bmore (better|worse|easier|harder)\b",
            "${1}",
            "Comparative adjectives don't take 'more'.",
        ),
        rule(
            Grammar,
            r"(?i)\bsuppose to\b",
            "supposed to",
            "The fixed expression is 'supposed to'.",
        ),
        rule(
            Grammar,
            r"(?i)\birregardless\b",
            "regardless",
            "'Irregardless' is nonstandard; use 'regardless'.",
        ),
        rule(
            Punctuation,
            r"[ \t]+([,;:!?])",
            "${1}",
            "Punctuation attaches to the preceding word without a space.",
        ),
        rule(
            Punctuation,
            r",{2,}",
            ",",
            "Repeated commas.",
        ),
    ]
});

struct SupplementalRule {
    pick_last_sentence: bool,
    suggestion: &'static str,
    explanation: &'static str,
}

static SUPPLEMENTAL_RULES: [SupplementalRule; 2] = [
    SupplementalRule {
        pick_last_sentence: false,
        suggestion: "Check that each verb agrees with its subject in number.",
        explanation: "Subject-verb agreement errors are easy to miss in longer sentences.",
    },
    SupplementalRule {
        pick_last_sentence: true,
        suggestion: "Keep verb tenses consistent within the paragraph.",
        explanation: "Shifting tense without reason confuses the timeline.",
    },
];

/// Fixed-table grammar and punctuation rules.
///
/// When the table finds fewer than a handful of problems, the pass adds
/// generic advisory checks to one sampled paragraph so short or clean
/// documents still receive feedback.
pub struct GrammarDetector;

impl Detector for GrammarDetector {
    fn name(&self) -> &'static str {
        "grammar"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Grammar
    }

    fn enabled(&self, options: &AnalysisOptions) -> bool {
        options.check_grammar
    }

    fn detect(
        &self,
        paragraphs: &[String],
        _options: &AnalysisOptions,
        rng: &mut dyn RngCore,
    ) -> DetectorOutput {
        let mut out = DetectorOutput::new();
        let mut matches = 0;

        for (index, paragraph) in paragraphs.iter().enumerate() {
            for rule in RULES.iter() {
                let mut found = rule.pattern.captures_iter(paragraph);
                let Some(caps) = found.next() else {
                    continue;
                };
                matches += 1 + found.count();
                let Some(m) = caps.get(0) else {
                    continue;
                };
                let mut expanded = String::new();
                caps.expand(rule.template, &mut expanded);
                out.push(
                    Finding::at(
                        rule.kind,
                        Severity::Medium,
                        index,
                        paragraph,
                        m.start(),
                        m.end(),
                    )
                    .suggest(match_case(m.as_str(), &expanded))
                    .explain(rule.explanation),
                );
            }
        }

        if matches < HP.grammar_supplement_below && !paragraphs.is_empty() {
            let index = rng.random_range(0..paragraphs.len());
            supplement(&mut out, index, &paragraphs[index]);
        }
        out
    }
}

fn supplement(out: &mut DetectorOutput, index: usize, paragraph: &str) {
    let spans = sentence_spans(paragraph);
    for rule in &SUPPLEMENTAL_RULES {
        let span = if rule.pick_last_sentence {
            spans.last()
        } else {
            spans.first()
        };
        let (start, end) = span.map_or((0, paragraph.len()), |s| (s.start, s.end));
        out.push(
            Finding::at(
                IssueKind::Grammar,
                Severity::Low,
                index,
                paragraph,
                start,
                end,
            )
            .suggest(rule.suggestion)
            .explain(rule.explanation)
            .advisory(),
        );
    }
}
