//! Error types for the editor host

use navtrail_common::{DocumentHandle, DocumentKey};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Stale document handle: {0}")]
    StaleHandle(DocumentHandle),

    #[error("Document already open: {0}")]
    AlreadyOpen(DocumentKey),

    #[error("Offset {offset} is past the end of the document (length {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
}
