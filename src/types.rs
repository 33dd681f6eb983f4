//! Core data model: issues, their positions, citations and the analysis result.

use serde::{Deserialize, Serialize};

use crate::fix::Document;

/// Category of a detected writing problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Grammar,
    Spelling,
    Punctuation,
    Clarity,
    Structure,
    Style,
    Citation,
    Plagiarism,
}

impl IssueKind {
    pub const ALL: [IssueKind; 8] = [
        IssueKind::Grammar,
        IssueKind::Spelling,
        IssueKind::Punctuation,
        IssueKind::Clarity,
        IssueKind::Structure,
        IssueKind::Style,
        IssueKind::Citation,
        IssueKind::Plagiarism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Grammar => "grammar",
            IssueKind::Spelling => "spelling",
            IssueKind::Punctuation => "punctuation",
            IssueKind::Clarity => "clarity",
            IssueKind::Structure => "structure",
            IssueKind::Style => "style",
            IssueKind::Citation => "citation",
            IssueKind::Plagiarism => "plagiarism",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        IssueKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| format!("unknown issue kind '{s}'"))
    }
}

/// Which issues a bulk fix targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSelector {
    All,
    Kind(IssueKind),
}

impl std::str::FromStr for KindSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(KindSelector::All)
        } else {
            s.parse().map(KindSelector::Kind)
        }
    }
}

impl From<IssueKind> for KindSelector {
    fn from(kind: IssueKind) -> Self {
        KindSelector::Kind(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Whether a suggestion is literal replacement text or prose guidance.
///
/// Advisory suggestions can still be applied; the result just won't read
/// as clean text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Literal,
    Advisory,
}

/// Byte span inside one paragraph of the document snapshot the issue was
/// detected against. Offsets always fall on UTF-8 character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub paragraph_index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Position {
    pub fn new(paragraph_index: usize, start_offset: usize, end_offset: usize) -> Self {
        Self {
            paragraph_index,
            start_offset,
            end_offset,
        }
    }
}

/// Detector output before the aggregator assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: IssueKind,
    pub severity: Severity,
    pub matched_text: String,
    pub suggestion: String,
    pub explanation: String,
    pub applicability: Applicability,
    pub position: Position,
}

impl Finding {
    /// Build a finding whose matched text is the paragraph slice at `start..end`.
    pub fn at(
        kind: IssueKind,
        severity: Severity,
        paragraph_index: usize,
        paragraph: &str,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            severity,
            matched_text: paragraph[start..end].to_string(),
            suggestion: String::new(),
            explanation: String::new(),
            applicability: Applicability::Literal,
            position: Position::new(paragraph_index, start, end),
        }
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    pub fn explain(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn advisory(mut self) -> Self {
        self.applicability = Applicability::Advisory;
        self
    }

    pub fn into_issue(self, id: String) -> Issue {
        Issue {
            id,
            kind: self.kind,
            severity: self.severity,
            matched_text: self.matched_text,
            suggestion: self.suggestion,
            explanation: self.explanation,
            applicability: self.applicability,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub kind: IssueKind,
    pub severity: Severity,
    #[serde(rename = "match")]
    pub matched_text: String,
    pub suggestion: String,
    pub explanation: String,
    pub applicability: Applicability,
    pub position: Position,
}

impl Issue {
    pub fn is_advisory(&self) -> bool {
        self.applicability == Applicability::Advisory
    }

    /// True when the document no longer holds `matched_text` at this issue's span.
    pub fn is_stale(&self, document: &Document) -> bool {
        let Some(paragraph) = document.paragraph(self.position.paragraph_index) else {
            return true;
        };
        paragraph.get(self.position.start_offset..self.position.end_offset)
            != Some(self.matched_text.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CitationForm {
    InText,
    Narrative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub text: String,
    pub form: CitationForm,
    pub problems: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    Complex,
    Moderate,
    Easy,
}

impl ReadabilityLevel {
    pub fn for_score(score: u8) -> Self {
        if score < 40 {
            ReadabilityLevel::Complex
        } else if score < 60 {
            ReadabilityLevel::Moderate
        } else {
            ReadabilityLevel::Easy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Academic,
    Creative,
    Business,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    #[default]
    Apa,
    Mla,
    Chicago,
    Harvard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub readability_score: u8,
    pub readability_level: ReadabilityLevel,
    pub grammar_score: u8,
    pub style_score: u8,
    pub overall_score: u8,
    pub citations: Vec<Citation>,
    pub issues: Vec<Issue>,
}

impl Analysis {
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    pub fn count_by_kind(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}
