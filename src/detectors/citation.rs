//! Citation shape checks for academic documents.
//!
//! Two shapes are recognised: parenthetical `(Author, Year)` and narrative
//! `Author (Year)`. Every occurrence becomes a [`Citation`]; the ones that
//! break a rule of the selected style also become issues. Formatting the
//! reference list itself is not this pass's concern.

use once_cell::sync::Lazy;
use rand::RngCore;
use regex::{Captures, Regex};

use super::{Detector, DetectorOutput};
use crate::config::AnalysisOptions;
use crate::segment::sentence_spans;
use crate::types::{
    Citation, CitationForm, CitationStyle, DocumentType, Finding, IssueKind, Severity,
};

static PARENTHETICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\((?P<author>[A-Z][A-Za-z'\-]+(?: et al\.)?(?: (?:&|and) [A-Z][A-Za-z'\-]+)?)",
        r"(?P<comma>,)?\s+(?P<year>\d{4}[a-z]?)",
        r"(?P<locator>,\s*pp?\.\s*\d+(?:[-\u{2013}]\d+)?)?\)",
    ))
    .unwrap()
});

static NARRATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<author>[A-Z][A-Za-z'\-]+(?: et al\.)?) \((?P<year>\d{4}[a-z]?)\)").unwrap()
});

/// A rule violation and how to fix it.
struct Problem {
    message: String,
    suggestion: String,
    literal: bool,
}

pub struct CitationDetector;

impl Detector for CitationDetector {
    fn name(&self) -> &'static str {
        "citation"
    }

    fn kind(&self) -> IssueKind {
        IssueKind::Citation
    }

    fn enabled(&self, options: &AnalysisOptions) -> bool {
        options.check_citations && options.document_type == DocumentType::Academic
    }

    fn detect(
        &self,
        paragraphs: &[String],
        options: &AnalysisOptions,
        _rng: &mut dyn RngCore,
    ) -> DetectorOutput {
        let mut out = DetectorOutput::new();

        for (index, paragraph) in paragraphs.iter().enumerate() {
            let mut found: Vec<(CitationForm, Captures<'_>)> = PARENTHETICAL_RE
                .captures_iter(paragraph)
                .map(|c| (CitationForm::InText, c))
                .chain(
                    NARRATIVE_RE
                        .captures_iter(paragraph)
                        .map(|c| (CitationForm::Narrative, c)),
                )
                .collect();
            found.sort_by_key(|(_, caps)| caps.get(0).map_or(0, |m| m.start()));

            for (form, caps) in &found {
                let Some(m) = caps.get(0) else {
                    continue;
                };
                let problem = check(options.citation_style, *form, caps, paragraph, m.start());
                out.citations.push(Citation {
                    text: m.as_str().to_string(),
                    form: *form,
                    problems: problem.iter().map(|p| p.message.clone()).collect(),
                });

                if let Some(problem) = problem {
                    let finding = Finding::at(
                        IssueKind::Citation,
                        Severity::Medium,
                        index,
                        paragraph,
                        m.start(),
                        m.end(),
                    )
                    .suggest(problem.suggestion)
                    .explain(problem.message);
                    out.push(if problem.literal {
                        finding
                    } else {
                        finding.advisory()
                    });
                }
            }
        }

        if out.citations.is_empty() {
            if let Some(first) = paragraphs.first() {
                out.push(
                    Finding::at(
                        IssueKind::Citation,
                        Severity::High,
                        0,
                        first,
                        0,
                        first.len(),
                    )
                    .suggest("Support your claims with citations, e.g. (Author, Year).")
                    .explain("Academic writing is expected to cite its sources; none were found.")
                    .advisory(),
                );
            }
        }
        out
    }
}

fn check(
    style: CitationStyle,
    form: CitationForm,
    caps: &Captures<'_>,
    paragraph: &str,
    at: usize,
) -> Option<Problem> {
    use CitationForm::{InText, Narrative};
    use CitationStyle::{Apa, Chicago, Harvard, Mla};

    let author = caps.name("author").map_or("", |m| m.as_str());
    let year = caps.name("year").map_or("", |m| m.as_str());

    match (style, form) {
        (Apa | Harvard, InText) => {
            let has_locator = caps.name("locator").is_some();
            (!has_locator && quotes_in_sentence(paragraph, at)).then(|| Problem {
                message: "Direct quotations require a page number.".to_string(),
                suggestion: format!("Add the quoted page, e.g. ({author}, {year}, p. 12)."),
                literal: false,
            })
        }
        (Mla, InText) => Some(Problem {
            message: "MLA in-text citations give the author and page number, not the year."
                .to_string(),
            suggestion: format!("Cite as ({author} page), e.g. ({author} 12)."),
            literal: false,
        }),
        (Chicago, Narrative) => Some(Problem {
            message: "Chicago author-date style prefers the parenthetical form.".to_string(),
            suggestion: format!("({author} {year})"),
            literal: true,
        }),
        (Chicago, InText) => {
            let has_comma = caps.name("comma").is_some();
            let locator = caps.name("locator").map_or("", |m| m.as_str());
            has_comma.then(|| Problem {
                message: "Chicago author-date style puts no comma between author and year."
                    .to_string(),
                suggestion: format!("({author} {year}{locator})"),
                literal: true,
            })
        }
        _ => None,
    }
}

fn quotes_in_sentence(paragraph: &str, at: usize) -> bool {
    let sentence = sentence_spans(paragraph)
        .into_iter()
        .find(|s| s.contains(&at))
        .map_or(paragraph, |s| &paragraph[s]);
    sentence.contains(['"', '\u{201C}', '\u{201D}'])
}
