//! Styled run accumulation for one tokenizer call.
//!
//! Runs of the line being scanned stay pending so they can still be
//! recoloured; they are flushed to the accessor when the next line starts
//! and when the scan completes. Flushed runs are final.

use std::ops::Range;

use smallvec::SmallVec;

use crate::{Accessor, Style};

/// A maximal range of bytes sharing one style.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleRun {
    pub range: Range<u32>,
    pub style: Style,
}

impl StyleRun {
    pub fn new(range: Range<u32>, style: Style) -> Self {
        Self { range, style }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Pending runs of the current line.
///
/// Invariant: pending runs are contiguous, start at `flushed_to`, and end
/// at `seg_start`.
#[derive(Debug)]
pub(crate) struct RunBuilder {
    pending: SmallVec<[StyleRun; 8]>,
    /// End of the last run handed to the accessor.
    flushed_to: u32,
    /// Start of the segment not yet committed to a run.
    seg_start: u32,
}

impl RunBuilder {
    pub(crate) fn new(start: u32) -> Self {
        Self {
            pending: SmallVec::new(),
            flushed_to: start,
            seg_start: start,
        }
    }

    /// Commit `seg_start..end` with `style`. Empty segments are ignored;
    /// a segment continuing a run of the same style extends it.
    pub(crate) fn colour_to(&mut self, end: u32, style: Style) {
        if end <= self.seg_start {
            return;
        }
        match self.pending.last_mut() {
            Some(last) if last.style == style => last.range.end = end,
            _ => self.pending.push(StyleRun::new(self.seg_start..end, style)),
        }
        self.seg_start = end;
    }

    /// Replace every pending run, and the uncommitted segment, up to `end`
    /// with a single run of `style`. Reaches back to the start of the
    /// current line, or the start of the scan if it began mid-line.
    pub(crate) fn recolour_line(&mut self, end: u32, style: Style) {
        self.pending.clear();
        self.seg_start = self.flushed_to;
        self.colour_to(end, style);
    }

    /// Hand all pending runs to the accessor.
    pub(crate) fn flush<A: Accessor + ?Sized>(&mut self, accessor: &mut A) {
        for run in self.pending.drain(..) {
            accessor.colour_to(run.range.end, run.style);
            self.flushed_to = run.range.end;
        }
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> &[StyleRun] {
        &self.pending
    }
}
