use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;

use super::{match_case, Detector, DetectorOutput};
use crate::config::AnalysisOptions;
use crate::types::{Finding, IssueKind, Severity};

const MISSPELLINGS: &[(&str, &str)] = &[
    ("accomodate", "accommodate"),
    ("acheive", "achieve"),
    ("alot", "a lot"),
    ("arguement", "argument"),
    ("beleive", "believe"),
    ("calender", "calendar"),
    ("definately", "definitely"),
    ("embarass", "embarrass"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("goverment", "government"),
    ("independant", "independent"),
    ("neccessary", "necessary"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("publically", "publicly"),
    ("recieve", "receive"),
    ("refered", "referred"),
    ("seperate", "separate"),
    ("succesful", "successful"),
    ("teh", "the"),
    ("thier", "their"),
    ("tommorow", "tomorrow"),
    ("untill", "until"),
    ("wich", "which"),
    ("wierd", "weird"),
];

static CORRECTIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| MISSPELLINGS.iter().copied().collect());

static MISSPELLING_RE: Lazy<Regex> = Lazy::new(|| {
    let alt = MISSPELLINGS
        .iter()
        .map(|(w, _)| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)\\b({alt})\\b")).unwrap()
});

/// Whole-word lookup against a table of common misspellings.
pub struct SpellingDetector;

impl Detector for SpellingDetector {
    fn name(&self) -> &'static str {
        "spelling"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Spelling
    }

    fn enabled(&self, options: &AnalysisOptions) -> bool {
        options.check_spelling
    }

    fn detect(
        &self,
        paragraphs: &[String],
        _options: &AnalysisOptions,
        _rng: &mut dyn RngCore,
    ) -> DetectorOutput {
        let mut out = DetectorOutput::new();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            for m in MISSPELLING_RE.find_iter(paragraph) {
                let word = m.as_str().to_lowercase();
                let Some(correction) = CORRECTIONS.get(word.as_str()) else {
                    continue;
                };
                out.push(
                    Finding::at(
                        IssueKind::Spelling,
                        Severity::Low,
                        index,
                        paragraph,
                        m.start(),
                        m.end(),
                    )
                    .suggest(match_case(m.as_str(), correction))
                    .explain(format!("'{}' is misspelled.", m.as_str())),
                );
            }
        }
        out
    }
}
