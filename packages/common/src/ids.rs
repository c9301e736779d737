//! Identifiers shared between the history core and editor hosts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

/// Stable identity of a document, usually its file path.
///
/// Unsaved documents have no key and can never be recorded in history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentKey(PathBuf);

impl DocumentKey {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for DocumentKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DocumentKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for DocumentKey {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Non-owning reference to an open document.
///
/// Hosts reuse document slots after a close, so a handle carries the
/// generation of the slot it was issued for. A handle whose generation no
/// longer matches is stale and must be looked up again by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHandle {
    pub index: u32,
    pub generation: u32,
}

impl DocumentHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}v{}", self.index, self.generation)
    }
}

/// Tag stored in a marker layer. Zero is reserved for "no marker", which is
/// why the value is non-zero and absent markers are `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(NonZeroU64);

impl MarkerId {
    pub const FIRST: MarkerId = MarkerId(NonZeroU64::MIN);

    /// Returns `None` for the reserved value zero.
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Next id in sequence, saturating at `u64::MAX`
    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selects one independent marker layer inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerLayerId(pub u32);

/// Layer reserved for navigation anchors.
pub const NAVIGATION_LAYER: MarkerLayerId = MarkerLayerId(9);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_id_rejects_zero() {
        assert!(MarkerId::new(0).is_none());
        assert_eq!(MarkerId::new(7).map(MarkerId::get), Some(7));
    }

    #[test]
    fn test_marker_id_sequence() {
        assert_eq!(MarkerId::FIRST.get(), 1);
        assert_eq!(MarkerId::FIRST.successor().get(), 2);
    }

    #[test]
    fn test_document_key_display() {
        let key = DocumentKey::from("src/main.rs");
        assert_eq!(key.to_string(), "src/main.rs");
        assert_eq!(key.as_path(), Path::new("src/main.rs"));
    }

    #[test]
    fn test_handle_equality_includes_generation() {
        assert_ne!(DocumentHandle::new(0, 1), DocumentHandle::new(0, 2));
        assert_eq!(DocumentHandle::new(3, 1).to_string(), "doc#3v1");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&MarkerLayerId(4)).unwrap();
        assert_eq!(json, "4");
        let key: DocumentKey = serde_json::from_str("\"a.txt\"").unwrap();
        assert_eq!(key, DocumentKey::from("a.txt"));
    }
}
