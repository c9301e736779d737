//! # Position Resolver
//!
//! Re-derives an anchor's live offset after the document has been edited.
//!
//! ## Algorithm
//!
//! 1. Re-validate the cached handle against the anchor's key, looking the
//!    document up again if it was closed or its slot reused
//! 2. Fast path: the marker is still at the cached offset
//! 3. Slow path: walk the layer's ranges from position 0 until the marker's
//!    range is found, and cache its start
//! 4. Not found: the marked text is gone, so the marker id is dropped and
//!    the anchor keeps its stale offset forever
//!
//! The scan costs one step per marker range in the document, not per
//! character. History eviction keeps the number of navigation markers small.

use crate::anchor::Anchor;
use navtrail_common::{DocumentHandle, DocumentService, MarkerLayerId, MarkerService};
use tracing::{debug, trace};

/// How an anchor was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The document is not open
    Unresolved,

    /// Marker found at the cached offset
    FastPath {
        handle: DocumentHandle,
        offset: usize,
    },

    /// Marker found elsewhere; the cached offset was updated
    Rescanned {
        handle: DocumentHandle,
        offset: usize,
    },

    /// Marker lost during this resolution; offset is the stale fallback
    Invalidated {
        handle: DocumentHandle,
        offset: usize,
    },

    /// Marker was lost earlier; offset is the frozen fallback
    Stale {
        handle: DocumentHandle,
        offset: usize,
    },
}

impl Resolution {
    /// Document and offset, whether or not the marker backs it
    pub fn location(&self) -> Option<(DocumentHandle, usize)> {
        match *self {
            Resolution::Unresolved => None,
            Resolution::FastPath { handle, offset }
            | Resolution::Rescanned { handle, offset }
            | Resolution::Invalidated { handle, offset }
            | Resolution::Stale { handle, offset } => Some((handle, offset)),
        }
    }

    /// Whether the offset is backed by a live marker
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            Resolution::FastPath { .. } | Resolution::Rescanned { .. }
        )
    }
}

impl Anchor {
    /// Bring the anchor up to date and report how it resolved.
    pub fn refresh<H>(&mut self, host: &H, layer: MarkerLayerId) -> Resolution
    where
        H: DocumentService + MarkerService + ?Sized,
    {
        let Some(handle) = self.revalidate(host) else {
            return Resolution::Unresolved;
        };
        let Some(marker) = self.marker else {
            return Resolution::Stale {
                handle,
                offset: self.offset,
            };
        };

        if host.marker_at(handle, layer, self.offset) == Some(marker) {
            trace!(%marker, offset = self.offset, "anchor unchanged");
            return Resolution::FastPath {
                handle,
                offset: self.offset,
            };
        }

        // Each step either lands on a later range or stops
        let mut pos = 0;
        loop {
            if host.marker_at(handle, layer, pos) == Some(marker) {
                debug!(%marker, from = self.offset, to = pos, "anchor drifted");
                self.offset = pos;
                return Resolution::Rescanned {
                    handle,
                    offset: pos,
                };
            }
            let next = host.marker_range_end(handle, layer, pos);
            if next <= pos {
                break;
            }
            pos = next;
        }

        debug!(%marker, key = %self.key, offset = self.offset, "anchor marker lost");
        self.marker = None;
        Resolution::Invalidated {
            handle,
            offset: self.offset,
        }
    }

    /// Document and live offset, the plain form of [`Anchor::refresh`].
    ///
    /// A lost marker still yields the stale offset.
    pub fn resolve<H>(&mut self, host: &H, layer: MarkerLayerId) -> Option<(DocumentHandle, usize)>
    where
        H: DocumentService + MarkerService + ?Sized,
    {
        self.refresh(host, layer).location()
    }

    /// Current handle for the anchor's document, if it is open
    fn revalidate<H: DocumentService + ?Sized>(&mut self, host: &H) -> Option<DocumentHandle> {
        let current = self.handle.filter(|&handle| {
            host.is_valid(handle) && host.document_key(handle).as_ref() == Some(&self.key)
        });
        if current.is_none() {
            self.handle = host.find_by_key(&self.key);
            if let Some(handle) = self.handle {
                trace!(key = %self.key, %handle, "anchor document re-resolved");
            }
        }
        self.handle
    }
}
