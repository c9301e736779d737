//! # Text Document
//!
//! An in-memory text buffer with a caret and any number of marker layers.
//!
//! Offsets are byte offsets into UTF-8 text and must sit on character
//! boundaries. Positions `0..=len` are addressable: the position after the
//! last character is where a caret sits at end of file, and markers may be
//! placed there too.
//!
//! ## Lifecycle
//!
//! ```text
//! open → insert/delete (markers follow) → replace_all (markers dropped) → close
//! ```

use crate::lines;
use crate::markers::MarkerLayer;
use crate::EditorError;
use navtrail_common::{DocumentKey, MarkerId, MarkerLayerId};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::trace;

/// Editable text document
#[derive(Debug, Clone)]
pub struct TextDocument {
    /// Stable key, `None` until the document is saved
    key: Option<DocumentKey>,

    text: String,

    caret: usize,

    /// Current version number (increments on each edit)
    pub version: u64,

    layers: BTreeMap<MarkerLayerId, MarkerLayer>,
}

impl TextDocument {
    pub fn new(key: Option<DocumentKey>, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
            caret: 0,
            version: 0,
            layers: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> Option<&DocumentKey> {
        self.key.as_ref()
    }

    pub fn set_key(&mut self, key: DocumentKey) {
        self.key = Some(key);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of addressable positions, including the end-of-text position
    pub fn extent(&self) -> usize {
        self.text.len() + 1
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, offset: usize) -> Result<(), EditorError> {
        self.check_offset(offset)?;
        self.caret = offset;
        Ok(())
    }

    /// Insert text at `offset`; markers and caret at or after it move right
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditorError> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }

        self.text.insert_str(offset, text);
        for layer in self.layers.values_mut() {
            layer.on_insert(offset, text.len());
        }
        if self.caret >= offset {
            self.caret += text.len();
        }
        self.version += 1;
        trace!(offset, len = text.len(), version = self.version, "insert");
        Ok(())
    }

    /// Delete a byte range; markers inside it are dropped
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), EditorError> {
        self.check_offset(range.start)?;
        self.check_offset(range.end)?;
        if range.start >= range.end {
            return Ok(());
        }

        let len = range.end - range.start;
        self.text.replace_range(range.clone(), "");
        for layer in self.layers.values_mut() {
            layer.on_delete(range.start, len);
        }
        if self.caret >= range.end {
            self.caret -= len;
        } else if self.caret > range.start {
            self.caret = range.start;
        }
        self.version += 1;
        trace!(start = range.start, len, version = self.version, "delete");
        Ok(())
    }

    /// Replace the whole text, as a reload from disk does.
    ///
    /// Every marker layer is emptied and the caret is clamped.
    pub fn replace_all(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.layers.clear();
        self.caret = self.caret.min(self.text.len());
        while !self.text.is_char_boundary(self.caret) {
            self.caret -= 1;
        }
        self.version += 1;
    }

    pub fn line_count(&self) -> usize {
        lines::line_count(&self.text)
    }

    /// Offset of a 0-based line
    pub fn position_from_line(&self, line: usize) -> Option<usize> {
        lines::position_from_line(&self.text, line)
    }

    /// 0-based line containing `offset`
    pub fn line_from_position(&self, offset: usize) -> usize {
        lines::line_from_position(&self.text, offset)
    }

    pub fn layer(&self, id: MarkerLayerId) -> Option<&MarkerLayer> {
        self.layers.get(&id)
    }

    /// Tag `len` positions at `offset`, clipped to the addressable extent
    pub fn fill_marker(&mut self, layer: MarkerLayerId, offset: usize, len: usize, value: MarkerId) {
        let len = self.clip(offset, len);
        if len > 0 {
            self.layers.entry(layer).or_default().fill(offset, len, value);
        }
    }

    pub fn clear_marker(&mut self, layer: MarkerLayerId, offset: usize, len: usize) {
        let len = self.clip(offset, len);
        if let Some(markers) = self.layers.get_mut(&layer) {
            markers.clear(offset, len);
        }
    }

    pub fn marker_at(&self, layer: MarkerLayerId, offset: usize) -> Option<MarkerId> {
        self.layers.get(&layer).and_then(|m| m.value_at(offset))
    }

    pub fn marker_range_end(&self, layer: MarkerLayerId, offset: usize) -> usize {
        match self.layers.get(&layer) {
            Some(markers) => markers.range_end(offset, self.extent()),
            None => self.extent().max(offset),
        }
    }

    fn clip(&self, offset: usize, len: usize) -> usize {
        self.extent().saturating_sub(offset).min(len)
    }

    fn check_offset(&self, offset: usize) -> Result<(), EditorError> {
        if offset > self.text.len() {
            return Err(EditorError::OutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(EditorError::NotCharBoundary(offset));
        }
        Ok(())
    }
}
