use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("text is too short: {length} characters, at least {minimum} required")]
    InputTooShort { length: usize, minimum: usize },

    #[error(
        "issue {issue_id} no longer fits: paragraph {paragraph_index} offset {start_offset} \
         (document has {paragraph_count} paragraphs, target is {paragraph_len} bytes)"
    )]
    PositionOutOfRange {
        issue_id: String,
        paragraph_index: usize,
        start_offset: usize,
        paragraph_count: usize,
        paragraph_len: usize,
    },

    #[error("no issue with id '{0}' in the current analysis")]
    UnknownIssue(String),

    #[error("no document has been analyzed yet")]
    NoActiveDocument,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
