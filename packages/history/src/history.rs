//! # Navigation History
//!
//! Browser-style back/forward over positions the user has visited.
//!
//! ## Design
//!
//! - `record_position` is the only way entries are added. It skips repeats
//!   of the entry at the cursor, drops the entries ahead of the cursor when
//!   the user branches off from the middle of the history, and evicts the
//!   oldest entries past the configured length
//! - Going back first records where the caret actually is, so going forward
//!   again returns there
//! - An entry that can no longer be reached is removed when navigation
//!   tries to use it; the call simply reports that the view did not move
//!
//! ## Example
//!
//! ```rust
//! use navtrail_common::{AffordanceState, DocumentService};
//! use navtrail_editor::EditSession;
//! use navtrail_history::{HistoryConfig, NavigationHistory};
//!
//! let mut session = EditSession::new();
//! let doc = session.open("lib.rs", "a\nb\nc\n").unwrap();
//! let mut history = NavigationHistory::new(HistoryConfig::default(), AffordanceState::default());
//!
//! // Jump from the caret (line 1) to line 3
//! assert_eq!(history.goto_line(&mut session, Some(doc), doc, 3), Ok(true));
//! assert!(history.affordances().back);
//!
//! assert!(history.navigate_back(&mut session));
//! assert_eq!(session.caret_position(doc), Some(0));
//!
//! assert!(history.navigate_forward(&mut session));
//! assert_eq!(session.caret_position(doc), Some(4));
//!
//! history.shutdown(&mut session);
//! ```

use crate::anchor::Anchor;
use crate::config::HistoryConfig;
use crate::resolver::Resolution;
use crate::store::AnchorStore;
use crate::HistoryError;
use navtrail_common::{
    Affordances, DocumentHandle, DocumentKey, EditorHost, MarkerId, MarkerLayerId, NoAffordances,
};
use tracing::{debug, warn};

/// Result of [`NavigationHistory::record_position`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new anchor was pushed with this marker
    Recorded(MarkerId),

    /// Same position as the entry at the cursor; nothing recorded
    Duplicate,

    /// The document has no stable key (unsaved or not open)
    Unnamed,
}

/// Bounded back/forward history for one editor session
#[derive(Debug)]
pub struct NavigationHistory<A: Affordances = NoAffordances> {
    store: AnchorStore,

    /// Last marker id handed out; ids are never reused
    last_marker: Option<MarkerId>,

    config: HistoryConfig,

    affordances: A,
}

impl NavigationHistory<NoAffordances> {
    /// History with default config and no buttons to update
    pub fn headless() -> Self {
        Self::new(HistoryConfig::default(), NoAffordances)
    }
}

impl<A: Affordances> NavigationHistory<A> {
    /// Create an empty history. Both affordances start disabled.
    pub fn new(config: HistoryConfig, mut affordances: A) -> Self {
        affordances.set_back_enabled(false);
        affordances.set_forward_enabled(false);

        Self {
            store: AnchorStore::new(config.capacity(), config.cursor_clamp),
            last_marker: None,
            config,
            affordances,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn affordances(&self) -> &A {
        &self.affordances
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Index of the current entry; 0 is the newest
    pub fn cursor(&self) -> usize {
        self.store.cursor()
    }

    /// Anchors, newest first
    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> {
        self.store.iter()
    }

    pub fn anchor_at(&self, index: usize) -> Option<&Anchor> {
        self.store.peek_at(index)
    }

    pub fn can_go_back(&self) -> bool {
        self.store.affordances().back
    }

    pub fn can_go_forward(&self) -> bool {
        self.store.affordances().forward
    }

    /// Number of marker ids handed out so far
    pub fn markers_issued(&self) -> u64 {
        self.last_marker.map_or(0, MarkerId::get)
    }

    /// Live location of the entry at `index`.
    ///
    /// Entries whose marker was lost report their last offset.
    pub fn resolve_at<H: EditorHost + ?Sized>(
        &mut self,
        host: &H,
        index: usize,
    ) -> Option<(DocumentHandle, usize)> {
        let layer = self.layer();
        self.store.peek_at_mut(index)?.resolve(host, layer)
    }

    /// Like [`NavigationHistory::resolve_at`], reporting how the entry resolved
    pub fn refresh_at<H: EditorHost + ?Sized>(&mut self, host: &H, index: usize) -> Option<Resolution> {
        let layer = self.layer();
        Some(self.store.peek_at_mut(index)?.refresh(host, layer))
    }

    /// Record a visited position.
    pub fn record_position<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        handle: DocumentHandle,
        offset: usize,
    ) -> RecordOutcome {
        let Some(key) = host.document_key(handle) else {
            return RecordOutcome::Unnamed;
        };

        if self.cursor_matches(&*host, &key, offset) {
            return RecordOutcome::Duplicate;
        }

        // Branching off from inside the history drops what was ahead
        if self.store.cursor() > 0 {
            let discarded = self.store.discard_newer();
            debug!(count = discarded.len(), "discarding forward history");
            self.release_all(host, discarded);
        }

        let marker = self.next_marker();
        debug!(%key, offset, %marker, "record position");
        let anchor = Anchor::place(host, self.layer(), key, handle, offset, marker);
        self.store.push_head(anchor);

        while let Some(evicted) = self.store.pop_overflow() {
            debug!(key = %evicted.key(), offset = evicted.offset(), "evict oldest anchor");
            evicted.release(host, self.layer());
        }

        self.adjust_affordances();
        RecordOutcome::Recorded(marker)
    }

    /// Record the old caret position and the start of `line` (1-based), then
    /// show the new position.
    ///
    /// Returns whether the view moved. Invalid arguments are rejected before
    /// anything is recorded.
    pub fn goto_line<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        old: Option<DocumentHandle>,
        new: DocumentHandle,
        line: usize,
    ) -> Result<bool, HistoryError> {
        if let Some(old) = old {
            if !host.is_valid(old) {
                return Err(HistoryError::InvalidDocument(old));
            }
        }
        if !host.is_valid(new) {
            return Err(HistoryError::InvalidDocument(new));
        }
        if line < 1 {
            return Err(HistoryError::InvalidLine(line));
        }
        let offset = host
            .position_from_line(new, line - 1)
            .ok_or(HistoryError::LineOutOfRange { line, handle: new })?;

        if let Some(old) = old {
            if let Some(caret) = host.caret_position(old) {
                self.record_position(host, old, caret);
            }
        }
        self.record_position(host, new, offset);

        Ok(host.move_view_to(new, offset))
    }

    /// Step to the next older entry. Returns whether the view moved.
    pub fn navigate_back<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> bool {
        // Sync with where the caret really is, so forward can return to it.
        // Identical to the entry at the cursor means nothing is added.
        match host.current_document() {
            Some(doc) => {
                if let Some(caret) = host.caret_position(doc) {
                    self.record_position(host, doc, caret);
                }
            }
            None => warn!("navigate back with no document open"),
        }

        let cursor = self.store.cursor();
        let len = self.store.len();
        if len < 2 || cursor >= len - 1 {
            self.adjust_affordances();
            return false;
        }

        let moved = self.step_to(host, cursor + 1, cursor + 1);
        self.adjust_affordances();
        moved
    }

    /// Step to the next newer entry. Returns whether the view moved.
    pub fn navigate_forward<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let cursor = self.store.cursor();
        if cursor < 1 || cursor >= self.store.len() {
            self.adjust_affordances();
            return false;
        }

        let moved = self.step_to(host, cursor - 1, cursor - 1);
        self.adjust_affordances();
        moved
    }

    /// Remove every entry for a document, keeping the order of the rest.
    ///
    /// Returns the number of entries removed.
    pub fn remove_document<H: EditorHost + ?Sized>(&mut self, host: &mut H, key: &DocumentKey) -> usize {
        let indices = self.store.find_all_by_document_key(key);
        for &index in indices.iter().rev() {
            if let Some(anchor) = self.store.pop_at(index) {
                anchor.release(host, self.layer());
            }
        }
        if !indices.is_empty() {
            debug!(%key, count = indices.len(), cursor = self.store.cursor(), "removed document from history");
        }

        self.adjust_affordances();
        indices.len()
    }

    /// Destroy every entry, clearing the markers that can still be found.
    pub fn shutdown<H: EditorHost + ?Sized>(mut self, host: &mut H) {
        let anchors = self.store.drain();
        self.release_all(host, anchors);
        self.adjust_affordances();
    }

    /// Try to show the entry at `index`; on success move the cursor to
    /// `target`, otherwise drop the entry.
    fn step_to<H: EditorHost + ?Sized>(&mut self, host: &mut H, index: usize, target: usize) -> bool {
        let layer = self.layer();
        let follow_stale = self.config.follow_stale_anchors;

        let destination = match self.store.peek_at_mut(index) {
            Some(anchor) => {
                let resolution = anchor.refresh(&*host, layer);
                if resolution.is_live() || follow_stale {
                    resolution.location()
                } else {
                    None
                }
            }
            None => return false,
        };

        let moved = match destination {
            Some((handle, offset)) => host.move_view_to(handle, offset),
            None => false,
        };

        if moved {
            self.store.set_cursor(target);
        } else if let Some(anchor) = self.store.pop_at(index) {
            debug!(key = %anchor.key(), offset = anchor.offset(), "dropping unreachable anchor");
            anchor.release(host, layer);
        }
        moved
    }

    /// Whether the entry at the cursor already is this position
    fn cursor_matches<H: EditorHost + ?Sized>(&mut self, host: &H, key: &DocumentKey, offset: usize) -> bool {
        let layer = self.layer();
        let cursor = self.store.cursor();
        match self.store.peek_at_mut(cursor) {
            Some(anchor) if anchor.key() == key => {
                anchor.resolve(host, layer).map(|(_, live)| live) == Some(offset)
            }
            _ => false,
        }
    }

    fn next_marker(&mut self) -> MarkerId {
        let marker = self.last_marker.map_or(MarkerId::FIRST, MarkerId::successor);
        self.last_marker = Some(marker);
        marker
    }

    fn release_all<H: EditorHost + ?Sized>(&self, host: &mut H, anchors: Vec<Anchor>) {
        for anchor in anchors {
            anchor.release(host, self.layer());
        }
    }

    fn adjust_affordances(&mut self) {
        let state = self.store.affordances();
        self.affordances.set_back_enabled(state.back);
        self.affordances.set_forward_enabled(state.forward);
    }

    fn layer(&self) -> MarkerLayerId {
        self.config.marker_layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtrail_common::{AffordanceState, DocumentService, ViewControl};
    use navtrail_editor::EditSession;

    fn history() -> NavigationHistory<AffordanceState> {
        NavigationHistory::new(HistoryConfig::default(), AffordanceState::default())
    }

    fn offsets(history: &NavigationHistory<AffordanceState>) -> Vec<usize> {
        history.anchors().map(Anchor::offset).collect()
    }

    #[test]
    fn test_new_history_is_empty_and_disabled() {
        let history = history();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.markers_issued(), 0);
        assert_eq!(*history.affordances(), AffordanceState::default());
    }

    #[test]
    fn test_record_assigns_increasing_markers() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(10)).unwrap();
        let mut history = history();

        assert_eq!(
            history.record_position(&mut session, doc, 1),
            RecordOutcome::Recorded(MarkerId::new(1).unwrap())
        );
        assert_eq!(
            history.record_position(&mut session, doc, 2),
            RecordOutcome::Recorded(MarkerId::new(2).unwrap())
        );
        assert_eq!(history.markers_issued(), 2);
    }

    #[test]
    fn test_consecutive_duplicates_are_skipped() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(100)).unwrap();
        let mut history = history();

        history.record_position(&mut session, doc, 50);
        assert_eq!(history.record_position(&mut session, doc, 50), RecordOutcome::Duplicate);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_duplicate_check_uses_live_offset() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(100)).unwrap();
        let mut history = history();

        history.record_position(&mut session, doc, 50);
        session.get_mut(doc).unwrap().insert(0, "12345").unwrap();

        assert_eq!(history.record_position(&mut session, doc, 55), RecordOutcome::Duplicate);
        assert!(matches!(
            history.record_position(&mut session, doc, 50),
            RecordOutcome::Recorded(_)
        ));
    }

    #[test]
    fn test_non_adjacent_duplicates_are_kept() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(100)).unwrap();
        let mut history = history();

        history.record_position(&mut session, doc, 10);
        history.record_position(&mut session, doc, 20);
        history.record_position(&mut session, doc, 10);
        assert_eq!(offsets(&history), vec![10, 20, 10]);
    }

    #[test]
    fn test_unsaved_document_is_not_recorded() {
        let mut session = EditSession::new();
        let doc = session.open_untitled("scratch");
        let mut history = history();

        assert_eq!(history.record_position(&mut session, doc, 0), RecordOutcome::Unnamed);
        assert!(history.is_empty());
        assert_eq!(history.markers_issued(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest_and_clears_its_marker() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(10)).unwrap();
        let config = HistoryConfig {
            max_length: 3,
            ..HistoryConfig::default()
        };
        let mut history = NavigationHistory::new(config, AffordanceState::default());

        for offset in 0..4 {
            history.record_position(&mut session, doc, offset);
        }

        assert_eq!(offsets(&history), vec![3, 2, 1]);
        let layer = history.config().marker_layer;
        assert_eq!(session.get(doc).unwrap().marker_at(layer, 0), None);
        assert!(session.get(doc).unwrap().marker_at(layer, 1).is_some());
    }

    #[test]
    fn test_navigate_on_empty_history_is_noop() {
        let mut session = EditSession::new();
        let mut history = history();

        assert!(!history.navigate_back(&mut session));
        assert!(!history.navigate_forward(&mut session));
        assert!(history.is_empty());
        assert_eq!(session.view_moves, 0);
    }

    #[test]
    fn test_back_syncs_caret_position_first() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(100)).unwrap();
        let mut history = history();

        history.record_position(&mut session, doc, 10);
        session.move_view_to(doc, 70);

        assert!(history.navigate_back(&mut session));
        assert_eq!(offsets(&history), vec![70, 10]);
        assert_eq!(history.cursor(), 1);
        assert_eq!(session.caret_position(doc), Some(10));

        assert!(history.navigate_forward(&mut session));
        assert_eq!(session.caret_position(doc), Some(70));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_unreachable_entry_is_dropped_on_back() {
        let mut session = EditSession::new();
        let a = session.open("a.rs", "x".repeat(100)).unwrap();
        let b = session.open("b.rs", "y".repeat(100)).unwrap();
        let mut history = history();

        history.record_position(&mut session, a, 10);
        history.record_position(&mut session, b, 20);
        session.close(a).unwrap();
        session.move_view_to(b, 20);

        assert!(!history.navigate_back(&mut session));
        assert_eq!(offsets(&history), vec![20]);
        assert_eq!(history.cursor(), 0);
        assert_eq!(*history.affordances(), AffordanceState::default());
    }

    #[test]
    fn test_lost_marker_is_dropped_unless_following_stale() {
        for follow_stale_anchors in [false, true] {
            let mut session = EditSession::new();
            let doc = session.open("a.rs", "x".repeat(100)).unwrap();
            let config = HistoryConfig {
                follow_stale_anchors,
                ..HistoryConfig::default()
            };
            let mut history = NavigationHistory::new(config, AffordanceState::default());

            history.record_position(&mut session, doc, 10);
            history.record_position(&mut session, doc, 90);
            session.move_view_to(doc, 90);
            session.get_mut(doc).unwrap().delete(5..15).unwrap();

            let moved = history.navigate_back(&mut session);
            assert_eq!(moved, follow_stale_anchors);
            if follow_stale_anchors {
                assert_eq!(session.caret_position(doc), Some(10));
                assert_eq!(history.len(), 2);
            } else {
                assert_eq!(history.len(), 1);
            }
        }
    }

    #[test]
    fn test_goto_line_rejects_bad_arguments_without_recording() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "one\ntwo\n").unwrap();
        let closed = session.open("b.rs", "").unwrap();
        session.close(closed).unwrap();
        let mut history = history();

        assert_eq!(
            history.goto_line(&mut session, None, doc, 0),
            Err(HistoryError::InvalidLine(0))
        );
        assert_eq!(
            history.goto_line(&mut session, Some(closed), doc, 1),
            Err(HistoryError::InvalidDocument(closed))
        );
        assert_eq!(
            history.goto_line(&mut session, None, closed, 1),
            Err(HistoryError::InvalidDocument(closed))
        );
        assert_eq!(
            history.goto_line(&mut session, None, doc, 9),
            Err(HistoryError::LineOutOfRange { line: 9, handle: doc })
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_goto_line_records_both_positions() {
        let mut session = EditSession::new();
        let a = session.open("a.rs", "one\ntwo\nthree\n").unwrap();
        let b = session.open("b.rs", "alpha\nbeta\n").unwrap();
        session.move_view_to(a, 4);
        let mut history = history();

        assert_eq!(history.goto_line(&mut session, Some(a), b, 2), Ok(true));

        let keys: Vec<_> = history.anchors().map(|a| a.key().to_string()).collect();
        assert_eq!(keys, vec!["b.rs", "a.rs"]);
        assert_eq!(offsets(&history), vec![6, 4]);
        assert_eq!(session.current_document(), Some(b));
        assert_eq!(session.caret_position(b), Some(6));
    }

    #[test]
    fn test_shutdown_clears_markers() {
        let mut session = EditSession::new();
        let doc = session.open("a.rs", "x".repeat(10)).unwrap();
        let mut history = history();
        let layer = history.config().marker_layer;

        history.record_position(&mut session, doc, 1);
        history.record_position(&mut session, doc, 5);
        history.shutdown(&mut session);

        assert!(session.get(doc).unwrap().layer(layer).map_or(true, |l| l.is_empty()));
    }
}
