//! # Collaborator Services
//!
//! The history core never owns documents, text or widgets. Everything it
//! needs from the surrounding editor is expressed by the traits below, and an
//! editor host implements them.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ NavigationHistory            │
//! └──────────────────────────────┘
//!        ↓ &mut impl EditorHost      ↓ owned impl Affordances
//! ┌──────────────────────────────┐  ┌──────────────────────┐
//! │ DocumentService              │  │ back / forward       │
//! │ MarkerService                │  │ button sensitivity   │
//! │ ViewControl                  │  └──────────────────────┘
//! └──────────────────────────────┘
//! ```

use crate::ids::{DocumentHandle, DocumentKey, MarkerId, MarkerLayerId};

/// Document lifecycle and lookup.
pub trait DocumentService {
    /// Find the open document with this stable key.
    fn find_by_key(&self, key: &DocumentKey) -> Option<DocumentHandle>;

    /// Whether the handle still refers to a live document.
    fn is_valid(&self, handle: DocumentHandle) -> bool;

    /// Stable key of the document, `None` for unsaved documents or stale
    /// handles.
    fn document_key(&self, handle: DocumentHandle) -> Option<DocumentKey>;

    /// The document currently shown to the user.
    fn current_document(&self) -> Option<DocumentHandle>;

    /// Caret offset inside the document.
    fn caret_position(&self, handle: DocumentHandle) -> Option<usize>;

    /// Offset of the first character of a 0-based line, `None` when the line
    /// does not exist.
    fn position_from_line(&self, handle: DocumentHandle, line: usize) -> Option<usize>;
}

/// Per-document marker layers that follow the text through edits.
///
/// A layer holds runs of positions tagged with a [`MarkerId`]. Positions
/// outside every run carry no tag.
pub trait MarkerService {
    /// Tag `len` positions starting at `offset` with `value`.
    fn fill_marker(
        &mut self,
        handle: DocumentHandle,
        layer: MarkerLayerId,
        offset: usize,
        len: usize,
        value: MarkerId,
    );

    /// Remove any tag from `len` positions starting at `offset`.
    fn clear_marker(&mut self, handle: DocumentHandle, layer: MarkerLayerId, offset: usize, len: usize);

    /// Tag at `offset`, if any.
    fn marker_at(&self, handle: DocumentHandle, layer: MarkerLayerId, offset: usize) -> Option<MarkerId>;

    /// End of the uniformly tagged run containing `offset`. Returns `offset`
    /// itself when there is nothing further to step over.
    fn marker_range_end(&self, handle: DocumentHandle, layer: MarkerLayerId, offset: usize) -> usize;
}

/// Moves the visible editor to a position.
pub trait ViewControl {
    /// Show the document and place the caret at `offset`. Returns `false`
    /// when the document cannot be displayed.
    fn move_view_to(&mut self, handle: DocumentHandle, offset: usize) -> bool;
}

/// Everything the history needs from an editor.
pub trait EditorHost: DocumentService + MarkerService + ViewControl {}

impl<T: DocumentService + MarkerService + ViewControl> EditorHost for T {}

/// Back/forward button sensitivity.
pub trait Affordances {
    fn set_back_enabled(&mut self, enabled: bool);
    fn set_forward_enabled(&mut self, enabled: bool);
}

/// Affordance sink for hosts without navigation buttons.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAffordances;

impl Affordances for NoAffordances {
    fn set_back_enabled(&mut self, _enabled: bool) {}
    fn set_forward_enabled(&mut self, _enabled: bool) {}
}

/// Records the last sensitivity pushed, useful for status bars and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AffordanceState {
    pub back: bool,
    pub forward: bool,
}

impl Affordances for AffordanceState {
    fn set_back_enabled(&mut self, enabled: bool) {
        self.back = enabled;
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        self.forward = enabled;
    }
}

impl<A: Affordances + ?Sized> Affordances for &mut A {
    fn set_back_enabled(&mut self, enabled: bool) {
        (**self).set_back_enabled(enabled);
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        (**self).set_forward_enabled(enabled);
    }
}

impl<A: Affordances + ?Sized> Affordances for Box<A> {
    fn set_back_enabled(&mut self, enabled: bool) {
        (**self).set_back_enabled(enabled);
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        (**self).set_forward_enabled(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordance_state_records_last_value() {
        let mut state = AffordanceState::default();
        state.set_back_enabled(true);
        assert_eq!(state, AffordanceState { back: true, forward: false });

        fn flip<A: Affordances>(mut sink: A) {
            sink.set_forward_enabled(true);
            sink.set_back_enabled(false);
        }
        flip(&mut state);
        assert_eq!(state, AffordanceState { back: false, forward: true });
    }
}
