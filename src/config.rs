//! Analysis options, engine configuration files and the fixed thresholds
//! every pass shares.
//!
//! Configuration is read from `.yaml`/`.yml` or `.json` files:
//!
//! ```yaml
//! seed: 42
//! scoring: deterministic
//! options:
//!   document_type: academic
//!   citation_style: chicago
//!   check_plagiarism: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::score::ScoringMode;
use crate::types::{CitationStyle, DocumentType};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Per-run toggles. Every check is independent of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub document_type: DocumentType,
    pub citation_style: CitationStyle,
    pub check_grammar: bool,
    pub check_spelling: bool,
    pub check_style: bool,
    pub check_citations: bool,
    pub check_plagiarism: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            document_type: DocumentType::General,
            citation_style: CitationStyle::Apa,
            check_grammar: true,
            check_spelling: true,
            check_style: true,
            check_citations: true,
            check_plagiarism: false,
        }
    }
}

impl AnalysisOptions {
    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    pub fn with_citation_style(mut self, citation_style: CitationStyle) -> Self {
        self.citation_style = citation_style;
        self
    }

    /// Turn every check off; callers then enable the ones they want.
    pub fn none() -> Self {
        Self {
            check_grammar: false,
            check_spelling: false,
            check_style: false,
            check_citations: false,
            check_plagiarism: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub options: AnalysisOptions,
    /// Fixed seed for reproducible sampling and simulated scores
    pub seed: Option<u64>,
    pub scoring: ScoringMode,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::Invalid(format!(
                "unsupported config file '{}': expected .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

pub(crate) struct Hyperparameters {
    pub min_input_chars: usize,
    pub words_per_minute: usize,
    pub paragraph_word_limit: usize,
    pub sentence_word_limit: usize,
    /// Every match of every grammar-table rule counts, punctuation rules
    /// included, even though only the first per paragraph is reported.
    pub grammar_supplement_below: usize,
    pub similarity_min_sentence_words: usize,
    pub grammar_range: (u8, u8),
    pub style_range: (u8, u8),
    pub readability_range: (u8, u8),
    pub academic_readability_penalty: u8,
    pub academic_readability_floor: u8,
    pub creative_style_bonus: u8,
    pub creative_style_cap: u8,
    pub penalty_low: u8,
    pub penalty_medium: u8,
    pub penalty_high: u8,
    pub history_cap: usize,
    pub title_snippet_chars: usize,
}

pub(crate) static HP: Hyperparameters = Hyperparameters {
    min_input_chars: 100,
    words_per_minute: 200,
    paragraph_word_limit: 150,
    sentence_word_limit: 40,
    grammar_supplement_below: 3,
    similarity_min_sentence_words: 6,
    grammar_range: (70, 95),
    style_range: (60, 90),
    readability_range: (30, 70),
    academic_readability_penalty: 10,
    academic_readability_floor: 30,
    creative_style_bonus: 5,
    creative_style_cap: 95,
    penalty_low: 1,
    penalty_medium: 3,
    penalty_high: 6,
    history_cap: 5,
    title_snippet_chars: 40,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_config() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "seed: 7\nscoring: deterministic\noptions:\n  document_type: academic\n  citation_style: mla"
        )
        .unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scoring, ScoringMode::Deterministic);
        assert_eq!(config.options.document_type, DocumentType::Academic);
        assert_eq!(config.options.citation_style, CitationStyle::Mla);
        // unspecified toggles keep their defaults
        assert!(config.options.check_spelling);
        assert!(!config.options.check_plagiarism);
    }

    #[test]
    fn loads_json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"options": {{"check_plagiarism": true}}}}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.scoring, ScoringMode::Simulated);
        assert!(config.options.check_plagiarism);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = EngineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
