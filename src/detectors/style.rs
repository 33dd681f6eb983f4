use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;

use super::{match_case, Detector, DetectorOutput};
use crate::config::AnalysisOptions;
use crate::types::{Finding, IssueKind, Severity};

static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(am|is|are|was|were|be|been|being)\s+",
        r"(\w+ed|taken|given|written|seen|known|shown|chosen|driven|broken|spoken|stolen",
        r"|forgotten|hidden|eaten|beaten|frozen|proven|made|done|built|found|held|kept",
        r"|left|sent|told|thought|brought|bought|caught|taught|paid|said|put|read|set)\b",
    ))
    .unwrap()
});

const WORDY_PHRASES: &[(&str, &str)] = &[
    ("due to the fact that", "because"),
    ("in spite of the fact that", "although"),
    ("at this point in time", "now"),
    ("in the event that", "if"),
    ("in order to", "to"),
    ("for the purpose of", "for"),
    ("a large number of", "many"),
    ("has the ability to", "can"),
    ("with regard to", "about"),
    ("prior to", "before"),
    ("in close proximity to", "near"),
    ("each and every", "each"),
];

static WORDY_RES: Lazy<Vec<(Regex, &'static str, &'static str)>> = Lazy::new(|| {
    WORDY_PHRASES
        .iter()
        .map(|(phrase, replacement)| {
            let re = Regex::new(&format!("(?i)\\b{}\\b", regex::escape(phrase))).unwrap();
            (re, *phrase, *replacement)
        })
        .collect()
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Passive voice, wordy phrases and immediately repeated words.
pub struct StyleDetector;

impl Detector for StyleDetector {
    fn name(&self) -> &'static str {
        "style"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Style
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
            passive_voice(&mut out, index, paragraph);
            wordy_phrases(&mut out, index, paragraph);
            repeated_words(&mut out, index, paragraph);
        }
        out
    }
}

fn passive_voice(out: &mut DetectorOutput, index: usize, paragraph: &str) {
    if let Some(m) = PASSIVE_RE.find(paragraph) {
        out.push(
            Finding::at(
                IssueKind::Style,
                Severity::Low,
                index,
                paragraph,
                m.start(),
                m.end(),
            )
            .suggest("Prefer the active voice: say who performs the action.")
            .explain("Passive constructions hide the actor and lengthen sentences.")
            .advisory(),
        );
    }
}

fn wordy_phrases(out: &mut DetectorOutput, index: usize, paragraph: &str) {
    for (re, phrase, replacement) in WORDY_RES.iter() {
        if let Some(m) = re.find(paragraph) {
            out.push(
                Finding::at(
                    IssueKind::Style,
                    Severity::Low,
                    index,
                    paragraph,
                    m.start(),
                    m.end(),
                )
                .suggest(match_case(m.as_str(), replacement))
                .explain(format!("'{phrase}' can be shortened to '{replacement}'.")),
            );
        }
    }
}

/// Scans like `find_iter` would: once a pair is reported its second word
/// cannot open the next pair, so a run of three gives one issue.
fn repeated_words(out: &mut DetectorOutput, index: usize, paragraph: &str) {
    let words: Vec<_> = WORD_RE.find_iter(paragraph).collect();
    let mut i = 0;
    while i + 1 < words.len() {
        let (first, second) = (words[i], words[i + 1]);
        let gap = &paragraph[first.end()..second.start()];
        let repeated = !gap.is_empty()
            && gap.chars().all(char::is_whitespace)
            && first.as_str().eq_ignore_ascii_case(second.as_str());
        if !repeated {
            i += 1;
            continue;
        }
        out.push(
            Finding::at(
                IssueKind::Style,
                Severity::Low,
                index,
                paragraph,
                first.start(),
                second.end(),
            )
            .suggest(first.as_str())
            .explain(format!("'{}' is repeated.", first.as_str())),
        );
        i += 2;
    }
}
