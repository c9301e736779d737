//! # Edit Session
//!
//! The set of open documents, which one is visible, and where its caret is.
//!
//! Documents live in slots. Closing a document frees its slot and bumps the
//! slot's generation; a later open reuses the slot. Handles issued before the
//! close still name the slot but carry the old generation, so they are
//! detected as stale instead of silently pointing at the new document.

use crate::{EditorError, TextDocument};
use navtrail_common::{
    DocumentHandle, DocumentKey, DocumentService, MarkerId, MarkerLayerId, MarkerService,
    ViewControl,
};
use tracing::debug;

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    document: Option<TextDocument>,
}

/// Open documents plus view state for a single editor window
#[derive(Debug, Default)]
pub struct EditSession {
    slots: Vec<Slot>,

    /// Document currently shown
    current: Option<DocumentHandle>,

    /// Number of successful view moves, handy for asserting navigation
    pub view_moves: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a saved document and make it current
    pub fn open(
        &mut self,
        key: impl Into<DocumentKey>,
        text: impl Into<String>,
    ) -> Result<DocumentHandle, EditorError> {
        let key = key.into();
        if self.find_by_key(&key).is_some() {
            return Err(EditorError::AlreadyOpen(key));
        }
        debug!(%key, "open document");
        Ok(self.insert(TextDocument::new(Some(key), text)))
    }

    /// Open a document that has never been saved
    pub fn open_untitled(&mut self, text: impl Into<String>) -> DocumentHandle {
        self.insert(TextDocument::new(None, text))
    }

    /// Close a document, returning it. The handle is stale afterwards.
    pub fn close(&mut self, handle: DocumentHandle) -> Result<TextDocument, EditorError> {
        let slot = self
            .slot_mut(handle)
            .ok_or(EditorError::StaleHandle(handle))?;
        let document = slot
            .document
            .take()
            .ok_or(EditorError::StaleHandle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        debug!(%handle, key = ?document.key(), "close document");

        if self.current == Some(handle) {
            self.current = self.handles().last();
        }
        Ok(document)
    }

    /// Give an untitled document a key, or rename a saved one
    pub fn save_as(
        &mut self,
        handle: DocumentHandle,
        key: impl Into<DocumentKey>,
    ) -> Result<(), EditorError> {
        let key = key.into();
        if let Some(existing) = self.find_by_key(&key) {
            if existing != handle {
                return Err(EditorError::AlreadyOpen(key));
            }
        }
        self.get_mut(handle)
            .ok_or(EditorError::StaleHandle(handle))?
            .set_key(key);
        Ok(())
    }

    pub fn get(&self, handle: DocumentHandle) -> Option<&TextDocument> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.document.as_ref())
    }

    pub fn get_mut(&mut self, handle: DocumentHandle) -> Option<&mut TextDocument> {
        self.slot_mut(handle).and_then(|slot| slot.document.as_mut())
    }

    /// Make a document current without moving its caret
    pub fn set_current(&mut self, handle: DocumentHandle) -> Result<(), EditorError> {
        if !self.is_valid(handle) {
            return Err(EditorError::StaleHandle(handle));
        }
        self.current = Some(handle);
        Ok(())
    }

    /// Handles of every open document, in slot order
    pub fn handles(&self) -> impl Iterator<Item = DocumentHandle> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.document
                .as_ref()
                .map(|_| DocumentHandle::new(index as u32, slot.generation))
        })
    }

    pub fn document_count(&self) -> usize {
        self.handles().count()
    }

    fn insert(&mut self, document: TextDocument) -> DocumentHandle {
        let index = match self.slots.iter().position(|slot| slot.document.is_none()) {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.document = Some(document);

        let handle = DocumentHandle::new(index as u32, slot.generation);
        self.current = Some(handle);
        handle
    }

    fn slot_mut(&mut self, handle: DocumentHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }
}

impl DocumentService for EditSession {
    fn find_by_key(&self, key: &DocumentKey) -> Option<DocumentHandle> {
        self.handles()
            .find(|&handle| self.get(handle).and_then(TextDocument::key) == Some(key))
    }

    fn is_valid(&self, handle: DocumentHandle) -> bool {
        self.get(handle).is_some()
    }

    fn document_key(&self, handle: DocumentHandle) -> Option<DocumentKey> {
        self.get(handle).and_then(|doc| doc.key().cloned())
    }

    fn current_document(&self) -> Option<DocumentHandle> {
        self.current.filter(|&handle| self.is_valid(handle))
    }

    fn caret_position(&self, handle: DocumentHandle) -> Option<usize> {
        self.get(handle).map(TextDocument::caret)
    }

    fn position_from_line(&self, handle: DocumentHandle, line: usize) -> Option<usize> {
        self.get(handle).and_then(|doc| doc.position_from_line(line))
    }
}

impl MarkerService for EditSession {
    fn fill_marker(
        &mut self,
        handle: DocumentHandle,
        layer: MarkerLayerId,
        offset: usize,
        len: usize,
        value: MarkerId,
    ) {
        if let Some(doc) = self.get_mut(handle) {
            doc.fill_marker(layer, offset, len, value);
        }
    }

    fn clear_marker(&mut self, handle: DocumentHandle, layer: MarkerLayerId, offset: usize, len: usize) {
        if let Some(doc) = self.get_mut(handle) {
            doc.clear_marker(layer, offset, len);
        }
    }

    fn marker_at(&self, handle: DocumentHandle, layer: MarkerLayerId, offset: usize) -> Option<MarkerId> {
        self.get(handle).and_then(|doc| doc.marker_at(layer, offset))
    }

    fn marker_range_end(&self, handle: DocumentHandle, layer: MarkerLayerId, offset: usize) -> usize {
        self.get(handle)
            .map(|doc| doc.marker_range_end(layer, offset))
            .unwrap_or(offset)
    }
}

impl ViewControl for EditSession {
    fn move_view_to(&mut self, handle: DocumentHandle, offset: usize) -> bool {
        let Some(doc) = self.get_mut(handle) else {
            return false;
        };
        if doc.set_caret(offset).is_err() {
            return false;
        }
        self.current = Some(handle);
        self.view_moves += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_makes_document_current() {
        let mut session = EditSession::new();
        let a = session.open("a.rs", "fn a() {}").unwrap();
        let b = session.open("b.rs", "fn b() {}").unwrap();

        assert_eq!(session.current_document(), Some(b));
        assert_eq!(session.find_by_key(&"a.rs".into()), Some(a));
        assert_eq!(session.document_count(), 2);
    }

    #[test]
    fn test_open_same_key_twice_fails() {
        let mut session = EditSession::new();
        session.open("a.rs", "").unwrap();
        assert_eq!(
            session.open("a.rs", ""),
            Err(EditorError::AlreadyOpen("a.rs".into()))
        );
    }

    #[test]
    fn test_closed_slot_is_reused_with_new_generation() {
        let mut session = EditSession::new();
        let a = session.open("a.rs", "a").unwrap();
        session.close(a).unwrap();
        let b = session.open("b.rs", "b").unwrap();

        assert_eq!(a.index, b.index);
        assert_ne!(a.generation, b.generation);
        assert!(!session.is_valid(a));
        assert!(session.is_valid(b));
        assert_eq!(session.document_key(a), None);
    }

    #[test]
    fn test_close_falls_back_to_another_current_document() {
        let mut session = EditSession::new();
        let a = session.open("a.rs", "a").unwrap();
        let b = session.open("b.rs", "b").unwrap();
        session.close(b).unwrap();
        assert_eq!(session.current_document(), Some(a));

        session.close(a).unwrap();
        assert_eq!(session.current_document(), None);
        assert_eq!(session.close(a).unwrap_err(), EditorError::StaleHandle(a));
    }

    #[test]
    fn test_untitled_document_has_no_key_until_saved() {
        let mut session = EditSession::new();
        let doc = session.open_untitled("scratch");
        assert_eq!(session.document_key(doc), None);

        session.save_as(doc, "scratch.txt").unwrap();
        assert_eq!(session.document_key(doc), Some("scratch.txt".into()));
    }

    #[test]
    fn test_move_view_rejects_offsets_past_end() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "abc").unwrap();

        assert!(session.move_view_to(doc, 3));
        assert_eq!(session.caret_position(doc), Some(3));
        assert!(!session.move_view_to(doc, 4));
        assert_eq!(session.view_moves, 1);
    }
}
