//! Error types for the navigation history

use navtrail_common::DocumentHandle;
use thiserror::Error;

/// Rejected arguments. No history state is changed when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Document is not open: {0}")]
    InvalidDocument(DocumentHandle),

    #[error("Line numbers start at 1, got {0}")]
    InvalidLine(usize),

    #[error("Line {line} is past the end of {handle}")]
    LineOutOfRange { line: usize, handle: DocumentHandle },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
