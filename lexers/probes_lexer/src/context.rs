//! Forward-only scan cursor over an [`Accessor`] with one byte of lookahead.
//!
//! The cursor tracks the current and next byte, the current line, and
//! whether the current byte opens or closes a line. It also owns the
//! lexical state register: changing state commits the bytes scanned so far
//! in the old state as a styled run.
//!
//! # End of Range
//!
//! Advancing at the end of the range does not move the cursor. It reports a
//! space as the current byte and sets `at_line_end`, so whitespace-skipping
//! loops terminate without extra bounds checks.

use crate::runs::RunBuilder;
use crate::{Accessor, Style};

pub(crate) struct ScanContext<'a, A: Accessor + ?Sized> {
    styler: &'a mut A,
    runs: RunBuilder,
    /// Current byte offset.
    pos: u32,
    /// Exclusive end of the range being scanned.
    end: u32,
    /// Current lexical state.
    pub(crate) state: Style,
    /// Byte at `pos`.
    pub(crate) ch: u8,
    /// Byte at `pos + 1`.
    pub(crate) ch_next: u8,
    /// `true` when `pos` is the first byte of a line.
    pub(crate) at_line_start: bool,
    /// `true` when `pos` is the last byte of a line (the `\n` of a line
    /// ending, or the end of the last line).
    pub(crate) at_line_end: bool,
    line: u32,
    /// Line of the document's final position.
    last_line: u32,
    line_start_next: u32,
}

impl<'a, A: Accessor + ?Sized> ScanContext<'a, A> {
    /// Position a cursor at `start`, scanning `length` bytes.
    ///
    /// The caller has already clamped the range to the document.
    pub(crate) fn new(styler: &'a mut A, start: u32, length: u32, init_state: Style) -> Self {
        styler.start_styling(start);
        let line = styler.line_of(start);
        let last_line = styler.line_of(styler.len());
        let line_start_next = styler.line_start(line + 1);
        let at_line_start = styler.line_start(line) == start;
        let ch = styler.byte_at(start);
        let ch_next = styler.byte_at(start + 1);
        let mut cx = Self {
            styler,
            runs: RunBuilder::new(start),
            pos: start,
            end: start + length,
            state: init_state,
            ch,
            ch_next,
            at_line_start,
            at_line_end: false,
            line,
            last_line,
            line_start_next,
        };
        cx.at_line_end = cx.compute_line_end();
        cx
    }

    /// Returns `true` while the cursor is inside the range.
    #[inline]
    pub(crate) fn more(&self) -> bool {
        self.pos < self.end
    }

    /// Advance one byte.
    pub(crate) fn forward(&mut self) {
        if self.pos < self.end {
            self.at_line_start = self.at_line_end;
            if self.at_line_start {
                self.line += 1;
                self.line_start_next = self.styler.line_start(self.line + 1);
            }
            self.pos += 1;
            self.ch = self.ch_next;
            self.ch_next = self.styler.byte_at(self.pos + 1);
            self.at_line_end = self.compute_line_end();
        } else {
            self.at_line_start = false;
            self.ch = b' ';
            self.ch_next = b' ';
            self.at_line_end = true;
        }
    }

    /// Advance `n` bytes.
    pub(crate) fn forward_n(&mut self, n: u32) {
        for _ in 0..n {
            self.forward();
        }
    }

    fn compute_line_end(&self) -> bool {
        if self.line < self.last_line {
            self.pos + 1 >= self.line_start_next
        } else {
            self.pos >= self.styler.len()
        }
    }

    /// Returns `true` if the document continues with `literal` at the
    /// current position. Reads past the end of the range if needed.
    pub(crate) fn matches(&self, literal: &[u8]) -> bool {
        match literal {
            [] => true,
            [first] => self.ch == *first,
            [first, second, rest @ ..] => {
                self.ch == *first
                    && self.ch_next == *second
                    && rest
                        .iter()
                        .zip(self.pos + 2..)
                        .all(|(&b, pos)| self.styler.byte_at(pos) == b)
            }
        }
    }

    /// Commit the bytes before the cursor in the current state, then switch
    /// to `state`. The current byte belongs to the new state.
    pub(crate) fn set_state(&mut self, state: Style) {
        self.runs.colour_to(self.pos, self.state);
        self.state = state;
    }

    /// Restyle the current line, from its start up to the cursor, with
    /// `style`. The current byte and the state are left untouched.
    pub(crate) fn recolour_line(&mut self, style: Style) {
        self.runs.recolour_line(self.pos, style);
    }

    /// Close the previous line and reset the state to [`Style::Default`].
    ///
    /// Runs of the previous line are final from here on.
    pub(crate) fn begin_line(&mut self) {
        self.set_state(Style::Default);
        self.runs.flush(self.styler);
    }

    /// Returns `true` on the bytes ending the line: the last byte of the
    /// line, or the `\r` of a `\r\n` pair.
    pub(crate) fn at_line_terminator(&self) -> bool {
        self.at_line_end || (self.ch == b'\r' && self.ch_next == b'\n')
    }

    /// Skip horizontal and vertical whitespace without leaving the line.
    ///
    /// Does nothing when the current byte already ends the line; otherwise
    /// advances at least once and stops on the first non-whitespace byte or
    /// the line's last byte.
    pub(crate) fn skip_whitespace_in_line(&mut self) {
        if self.at_line_end {
            return;
        }
        loop {
            self.forward();
            if self.at_line_end || !is_space(self.ch) {
                break;
            }
        }
    }

    /// Commit the final run and hand all pending runs to the accessor.
    ///
    /// Returns the state the scan ended in.
    pub(crate) fn complete(mut self) -> Style {
        self.runs.colour_to(self.pos, self.state);
        self.runs.flush(self.styler);
        self.state
    }
}

/// C `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}
