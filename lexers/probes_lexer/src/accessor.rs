//! The host document interface the tokenizer reads from and styles into.
//!
//! Positions are byte offsets. Lines are numbered from 0 and end after a
//! `\n`, a `\r\n` pair, or a lone `\r`.

/// Random-access view of the host's text buffer plus its styling sink.
///
/// The tokenizer borrows an accessor for the duration of one call. Styling
/// is sequential: after [`start_styling`](Accessor::start_styling), each
/// [`colour_to`](Accessor::colour_to) styles the bytes from the end of the
/// previous run up to (excluding) `end`.
pub trait Accessor {
    /// Length of the document in bytes.
    fn len(&self) -> u32;

    /// Returns `true` if the document is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `pos`, or `0` at and beyond the end of the document.
    fn byte_at(&self, pos: u32) -> u8;

    /// Line containing `pos`. Positions at or past the end belong to the
    /// last line.
    fn line_of(&self, pos: u32) -> u32;

    /// Offset of the first byte of `line`, or the document length for lines
    /// past the end.
    fn line_start(&self, line: u32) -> u32;

    /// Integer lexer property, `default` when unset or unparsable.
    fn property_int(&self, key: &str, default: i32) -> i32 {
        let _ = key;
        default
    }

    /// Begin a styling pass at `pos`.
    fn start_styling(&mut self, pos: u32);

    /// Style everything from the end of the previous run up to `end` with
    /// `style`.
    fn colour_to(&mut self, end: u32, style: crate::Style);
}

/// Behavior switches read from lexer properties.
///
/// The defaults reproduce the established highlighting of probe files;
/// each switch opts into a stricter reading of one construct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Flag a directive value as bad unless it starts with a digit.
    pub strict_values: bool,
    /// Accept any alphabetic or `:` character as the first template key,
    /// not just `m`.
    pub any_template_key: bool,
}

impl LexerOptions {
    pub const STRICT_VALUES: &'static str = "lexer.probes.strict.values";
    pub const ANY_TEMPLATE_KEY: &'static str = "lexer.probes.template.any.key";

    /// Read the switches from the accessor's lexer properties.
    pub fn from_accessor<A: Accessor + ?Sized>(accessor: &A) -> Self {
        Self {
            strict_values: accessor.property_int(Self::STRICT_VALUES, 0) != 0,
            any_template_key: accessor.property_int(Self::ANY_TEMPLATE_KEY, 0) != 0,
        }
    }
}
