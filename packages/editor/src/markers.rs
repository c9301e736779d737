//! # Marker Layers
//!
//! Run-length tag storage that follows the text through edits.
//!
//! A layer is a sorted list of non-overlapping runs `[start, end)`, each
//! tagged with one [`MarkerId`]. Positions outside every run are untagged.
//!
//! ## Edit semantics
//!
//! - Insertion at or before a run's start shifts the run right
//! - Insertion strictly inside a run grows it
//! - Deletion clips runs; runs that become empty are dropped
//!
//! So a one-position marker placed on a character keeps pointing at that
//! character until the character itself is deleted.

use navtrail_common::MarkerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    end: usize,
    value: MarkerId,
}

/// One independent layer of markers inside a document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MarkerLayer {
    runs: Vec<Run>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct runs in the layer
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate runs as `(start, end, value)` in position order
    pub fn runs(&self) -> impl Iterator<Item = (usize, usize, MarkerId)> + '_ {
        self.runs.iter().map(|r| (r.start, r.end, r.value))
    }

    /// Tag `[start, start + len)` with `value`, replacing whatever was there
    pub fn fill(&mut self, start: usize, len: usize, value: MarkerId) {
        if len == 0 {
            return;
        }
        self.clear(start, len);

        let end = start + len;
        let idx = self.runs.partition_point(|r| r.start < start);
        self.runs.insert(idx, Run { start, end, value });
        self.normalize();
    }

    /// Untag `[start, start + len)`, splitting runs that straddle the edges
    pub fn clear(&mut self, start: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = start + len;

        let mut kept = Vec::with_capacity(self.runs.len() + 1);
        for run in self.runs.drain(..) {
            if run.end <= start || run.start >= end {
                kept.push(run);
                continue;
            }
            if run.start < start {
                kept.push(Run { end: start, ..run });
            }
            if run.end > end {
                kept.push(Run { start: end, ..run });
            }
        }
        self.runs = kept;
    }

    /// Remove every run
    pub fn clear_all(&mut self) {
        self.runs.clear();
    }

    /// Tag at `offset`, if any
    pub fn value_at(&self, offset: usize) -> Option<MarkerId> {
        let idx = self.runs.partition_point(|r| r.end <= offset);
        self.runs
            .get(idx)
            .filter(|r| r.start <= offset)
            .map(|r| r.value)
    }

    /// End of the uniform stretch containing `offset`.
    ///
    /// Inside a run this is the run's end. In an untagged gap it is the start
    /// of the next run. Past the last run it is `extent`, the number of
    /// addressable positions, or `offset` itself if that is already further.
    pub fn range_end(&self, offset: usize, extent: usize) -> usize {
        let idx = self.runs.partition_point(|r| r.end <= offset);
        match self.runs.get(idx) {
            Some(run) if run.start <= offset => run.end,
            Some(run) => run.start,
            None => extent.max(offset),
        }
    }

    /// Shift runs for `len` positions inserted at `at`
    pub fn on_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for run in &mut self.runs {
            if run.start >= at {
                run.start += len;
                run.end += len;
            } else if run.end > at {
                run.end += len;
            }
        }
    }

    /// Clip runs for `len` positions deleted at `at`
    pub fn on_delete(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        let cut_end = at + len;
        let map = |pos: usize| {
            if pos <= at {
                pos
            } else if pos < cut_end {
                at
            } else {
                pos - len
            }
        };

        for run in &mut self.runs {
            run.start = map(run.start);
            run.end = map(run.end);
        }
        self.runs.retain(|r| r.start < r.end);
        self.normalize();
    }

    /// Merge touching runs that carry the same tag
    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.end == run.start && prev.value == run.value => {
                    prev.end = run.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}
