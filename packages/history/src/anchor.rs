//! # Anchors
//!
//! One recorded (document, position) pair.
//!
//! An anchor does not own its document. It remembers the document's stable
//! key, a handle that may go stale, the marker tag placed in the document
//! when the anchor was recorded, and the last offset it resolved to.
//!
//! Anchors are not `Clone`: each one owns exactly one marker, and
//! [`Anchor::release`] consumes the anchor when that marker is cleared.

use navtrail_common::{DocumentHandle, DocumentKey, EditorHost, MarkerId, MarkerLayerId};
use tracing::trace;

#[derive(Debug, PartialEq, Eq)]
pub struct Anchor {
    pub(crate) key: DocumentKey,

    /// Cached handle; re-validated against `key` before every use
    pub(crate) handle: Option<DocumentHandle>,

    /// `None` once the marker has been lost for good
    pub(crate) marker: Option<MarkerId>,

    /// Last known position. Authoritative only while `marker` resolves.
    pub(crate) offset: usize,
}

impl Anchor {
    /// Record a new anchor and tag its position in the document.
    pub(crate) fn place<H: EditorHost + ?Sized>(
        host: &mut H,
        layer: MarkerLayerId,
        key: DocumentKey,
        handle: DocumentHandle,
        offset: usize,
        marker: MarkerId,
    ) -> Self {
        host.fill_marker(handle, layer, offset, 1, marker);
        Self {
            key,
            handle: Some(handle),
            marker: Some(marker),
            offset,
        }
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    pub fn handle(&self) -> Option<DocumentHandle> {
        self.handle
    }

    pub fn marker_id(&self) -> Option<MarkerId> {
        self.marker
    }

    /// Cached offset, possibly stale until the anchor is resolved
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_invalidated(&self) -> bool {
        self.marker.is_none()
    }

    /// Destroy the anchor, clearing its marker if it can still be found.
    pub(crate) fn release<H: EditorHost + ?Sized>(mut self, host: &mut H, layer: MarkerLayerId) {
        self.refresh(&*host, layer);

        let (Some(handle), Some(marker)) = (self.handle, self.marker) else {
            return;
        };
        if host.marker_at(handle, layer, self.offset) == Some(marker) {
            trace!(%marker, offset = self.offset, "clear anchor marker");
            host.clear_marker(handle, layer, self.offset, 1);
        }
    }
}
