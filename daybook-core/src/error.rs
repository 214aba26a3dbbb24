//! Error types for daybook.

use thiserror::Error;

/// Errors that can occur in daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Month ordinal {0} out of range 1-12")]
    OutOfRange(u8),

    #[error("Event description cannot be empty")]
    EmptyDescription,

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DaybookError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        DaybookError::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
