//! # Anchor Store
//!
//! Bounded double-ended list of anchors plus the history cursor.
//!
//! ## Design
//!
//! - Index 0 is the newest anchor; new anchors are pushed at the head
//! - Eviction happens at the tail
//! - The cursor is the entry the user is "at"; 0 means no back steps taken
//! - Any removal that leaves the cursor past the end clamps it according to
//!   [`CursorClamp`]
//!
//! The store only moves anchors around. Clearing their markers is the
//! caller's job, which is why every removal hands the anchor back by value.

use crate::anchor::Anchor;
use crate::config::CursorClamp;
use navtrail_common::{AffordanceState, DocumentKey};
use std::collections::VecDeque;

#[derive(Debug)]
pub struct AnchorStore {
    anchors: VecDeque<Anchor>,
    cursor: usize,
    capacity: usize,
    clamp: CursorClamp,
}

impl AnchorStore {
    pub fn new(capacity: usize, clamp: CursorClamp) -> Self {
        Self {
            anchors: VecDeque::with_capacity(capacity + 1),
            cursor: 0,
            capacity,
            clamp,
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor; out-of-range values are ignored
    pub fn set_cursor(&mut self, cursor: usize) -> bool {
        if cursor < self.anchors.len() || (cursor == 0 && self.anchors.is_empty()) {
            self.cursor = cursor;
            true
        } else {
            false
        }
    }

    pub fn push_head(&mut self, anchor: Anchor) {
        self.anchors.push_front(anchor);
    }

    pub fn pop_head(&mut self) -> Option<Anchor> {
        let anchor = self.anchors.pop_front();
        self.clamp_cursor();
        anchor
    }

    pub fn pop_tail(&mut self) -> Option<Anchor> {
        let anchor = self.anchors.pop_back();
        self.clamp_cursor();
        anchor
    }

    pub fn pop_at(&mut self, index: usize) -> Option<Anchor> {
        let anchor = self.anchors.remove(index);
        self.clamp_cursor();
        anchor
    }

    /// Pop the tail while the store holds more than its capacity
    pub fn pop_overflow(&mut self) -> Option<Anchor> {
        if self.anchors.len() > self.capacity {
            self.pop_tail()
        } else {
            None
        }
    }

    /// Remove every anchor newer than the cursor and reset the cursor to 0.
    ///
    /// The anchor at the cursor becomes the head.
    pub fn discard_newer(&mut self) -> Vec<Anchor> {
        let discarded = self.anchors.drain(..self.cursor).collect();
        self.cursor = 0;
        discarded
    }

    /// Remove everything, newest first
    pub fn drain(&mut self) -> Vec<Anchor> {
        self.cursor = 0;
        self.anchors.drain(..).collect()
    }

    pub fn peek_at(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    pub fn peek_at_mut(&mut self, index: usize) -> Option<&mut Anchor> {
        self.anchors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    /// Indices of anchors for a document, in ascending order
    pub fn find_all_by_document_key(&self, key: &DocumentKey) -> Vec<usize> {
        self.anchors
            .iter()
            .enumerate()
            .filter(|(_, anchor)| anchor.key() == key)
            .map(|(index, _)| index)
            .collect()
    }

    /// Back/forward sensitivity for the current cursor
    pub fn affordances(&self) -> AffordanceState {
        let len = self.anchors.len();
        if len < 2 {
            return AffordanceState::default();
        }
        AffordanceState {
            back: self.cursor < len - 1,
            forward: self.cursor > 0,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.anchors.len();
        if self.cursor < len {
            return;
        }
        self.cursor = match self.clamp {
            CursorClamp::ResetToZero => 0,
            CursorClamp::ShiftTowardHead => len.saturating_sub(1),
        };
    }
}
