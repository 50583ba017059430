//! In-memory host document: text, line index, per-byte styles and lexer
//! properties.
//!
//! `Document` is the reference [`Accessor`]. It follows the usual editor
//! discipline for incremental highlighting: a range is lexed starting from
//! the style of the byte just before it, and an edit re-lexes from the start
//! of the edited line.

use std::borrow::Cow;
use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::runs::StyleRun;
use crate::tokenizer::{colorize, LexOutcome};
use crate::{Accessor, Style, PROBES};

/// A text buffer with styling state.
#[derive(Clone, Debug, Default)]
pub struct Document {
    text: String,
    /// One style per byte of `text`.
    styles: Vec<Style>,
    /// Offset of the first byte of each line. Always starts with `0`.
    line_starts: Vec<u32>,
    properties: FxHashMap<String, String>,
    /// Next byte to be styled by `colour_to`.
    styling_pos: u32,
}

impl Document {
    /// Create an unstyled document.
    ///
    /// # Document Size
    ///
    /// Offsets are `u32`; text beyond `u32::MAX` bytes is not addressable
    /// and is truncated from the line index.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![Style::Default; text.len()];
        let line_starts = line_starts(text.as_bytes());
        Self {
            text,
            styles,
            line_starts,
            properties: FxHashMap::default(),
            styling_pos: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines. A trailing line terminator opens an empty last line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count is bounded by the u32 document length"
    )]
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Style of the byte at `pos`; [`Style::Default`] out of range.
    pub fn style_at(&self, pos: u32) -> Style {
        self.styles
            .get(pos as usize)
            .copied()
            .unwrap_or(Style::Default)
    }

    /// Per-byte styles.
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Maximal runs of equally-styled bytes, covering the whole document.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "style indices are bounded by the u32 document length"
    )]
    pub fn runs(&self) -> Vec<StyleRun> {
        let mut runs: Vec<StyleRun> = Vec::new();
        for (index, &style) in self.styles.iter().enumerate() {
            let pos = index as u32;
            match runs.last_mut() {
                Some(last) if last.style == style => last.range.end = pos + 1,
                _ => runs.push(StyleRun::new(pos..pos + 1, style)),
            }
        }
        runs
    }

    /// Source text of `range`, clamped to the document.
    ///
    /// Runs are byte ranges and may split a multi-byte character; the
    /// partial bytes come back as U+FFFD.
    pub fn slice(&self, range: Range<u32>) -> Cow<'_, str> {
        let end = (range.end as usize).min(self.text.len());
        let start = (range.start as usize).min(end);
        String::from_utf8_lossy(&self.text.as_bytes()[start..end])
    }

    /// 1-based line and column (in bytes) of `pos`.
    pub fn line_col(&self, pos: u32) -> (u32, u32) {
        let line = self.line_of(pos);
        let column = pos - self.line_start(line);
        (line + 1, column + 1)
    }

    /// Set a lexer property, e.g. [`LexerOptions::STRICT_VALUES`](crate::LexerOptions::STRICT_VALUES).
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Lex the whole document from a fresh start.
    pub fn lex_all(&mut self) -> LexOutcome {
        self.lex(0, self.len(), Style::Default)
    }

    /// Lex `length` bytes from `start`, resuming from the style of the byte
    /// before `start`.
    pub fn lex_range(&mut self, start: u32, length: u32) -> LexOutcome {
        let init_style = match start.checked_sub(1) {
            Some(prev) => self.style_at(prev),
            None => Style::Default,
        };
        self.lex(start, length, init_style)
    }

    /// Lex `length` bytes from `start` in the given initial state.
    pub fn lex(&mut self, start: u32, length: u32, init_style: Style) -> LexOutcome {
        colorize(start, length, init_style, PROBES.keyword_lists, self)
    }

    /// Replace `range` with `text` and re-lex from the start of the edited
    /// line to the end of the document.
    ///
    /// Styles after the edit are shifted with the text before re-lexing, so
    /// hosts that stop early still see consistent positions.
    ///
    /// The range is clamped to the document and widened to whole
    /// characters. An empty range inside a character inserts before it.
    pub fn replace(&mut self, range: Range<u32>, text: &str) -> LexOutcome {
        let (start, end) = self.char_range(range);
        self.text.replace_range(start..end, text);
        let tail = self.styles.split_off(end);
        self.styles.truncate(start);
        self.styles.resize(start + text.len(), Style::Default);
        self.styles.extend(tail);
        self.line_starts = line_starts(self.text.as_bytes());

        #[allow(
            clippy::cast_possible_truncation,
            reason = "edit offset is bounded by the u32 document length"
        )]
        let relex_from = self.line_start(self.line_of(start as u32));
        let length = self.len() - relex_from;
        tracing::trace!(
            edit_start = start,
            edit_end = end,
            inserted = text.len(),
            relex_from,
            "document edited"
        );
        self.lex_range(relex_from, length)
    }

    /// Clamp `range` and snap it outward to `char` boundaries.
    fn char_range(&self, range: Range<u32>) -> (usize, usize) {
        let len = self.text.len();
        let mut end = (range.end as usize).min(len);
        let mut start = (range.start as usize).min(end);
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        if range.is_empty() {
            return (start, start);
        }
        while !self.text.is_char_boundary(end) {
            end += 1;
        }
        (start, end)
    }
}

impl Accessor for Document {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "documents are addressed with u32 offsets"
    )]
    fn len(&self) -> u32 {
        self.text.len().min(u32::MAX as usize) as u32
    }

    fn byte_at(&self, pos: u32) -> u8 {
        self.text.as_bytes().get(pos as usize).copied().unwrap_or(0)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count is bounded by the u32 document length"
    )]
    fn line_of(&self, pos: u32) -> u32 {
        // Index of the last line starting at or before `pos`.
        let after = self.line_starts.partition_point(|&start| start <= pos);
        after.saturating_sub(1) as u32
    }

    fn line_start(&self, line: u32) -> u32 {
        self.line_starts
            .get(line as usize)
            .copied()
            .unwrap_or_else(|| self.len())
    }

    fn property_int(&self, key: &str, default: i32) -> i32 {
        self.properties
            .get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    fn start_styling(&mut self, pos: u32) {
        self.styling_pos = pos;
    }

    fn colour_to(&mut self, end: u32, style: Style) {
        debug_assert!(
            end >= self.styling_pos,
            "styling moved backwards: {end} < {}",
            self.styling_pos
        );
        let from = (self.styling_pos as usize).min(self.styles.len());
        let to = (end as usize).min(self.styles.len());
        self.styles[from..to].fill(style);
        self.styling_pos = end;
    }
}

/// Line start offsets for CR, LF and CRLF line ends.
#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets past u32::MAX are dropped by the bound check"
)]
fn line_starts(bytes: &[u8]) -> Vec<u32> {
    let mut starts = vec![0];
    let mut offset = 0;
    while let Some(found) = memchr::memchr2(b'\n', b'\r', &bytes[offset..]) {
        let mut next = offset + found + 1;
        if bytes[next - 1] == b'\r' && bytes.get(next) == Some(&b'\n') {
            next += 1;
        }
        if next > u32::MAX as usize {
            break;
        }
        starts.push(next as u32);
        offset = next;
    }
    starts
}
