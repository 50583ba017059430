//! Line-oriented state machine styling Nmap service probe files.
//!
//! # Grammar
//!
//! Every line starts in [`Style::Default`] and is classified by its leading
//! literal:
//!
//! ```text
//! Probe TCP GetRequest q|GET / HTTP/1.0\r\n\r\n|
//! ports 80,8080
//! match ftp m/^220 ([-\w]+) FTP/i p/$1/ cpe:/a:vendor/
//! # comment, case:label
//! ##############################NEXT PROBE##############################
//! ```
//!
//! Anything else is [`Style::ProbeBad`] up to the end of the line. Malformed
//! clauses switch to a bad style and stay there; there is no error channel.
//!
//! # Restarting
//!
//! The delimiter register and the comment-continuation flag are reset at
//! every line start, so any line start is a valid resumption point. A range
//! resuming mid-line in a state that depends on those registers is widened
//! back to its line start (see [`normalize_range`]).

use std::ops::Range;
use std::time::Instant;

use crate::context::{is_space, ScanContext};
use crate::{Accessor, LexerOptions, Style, WordList};

/// Marker announcing the next probe block inside a banner comment.
const NEXT_PROBE: &[u8] = b"NEXT PROBE";

/// Marker for a test-case label inside a comment.
const COMMENT_CASE: &[u8] = b"case:";

/// Line-start directives and the state each one enters.
///
/// Every literal ends with its mandatory separating space.
const DIRECTIVES: &[(&[u8], Directive)] = &[
    (b"Probe ", Directive::Probe),
    (b"totalwaitms ", Directive::Key),
    (b"tcpwrappedms ", Directive::Key),
    (b"ports ", Directive::Key),
    (b"sslports ", Directive::Key),
    (b"rarity ", Directive::Key),
    (b"fallback ", Directive::Key),
    (b"Exclude ", Directive::Key),
    (b"match ", Directive::Match),
    (b"softmatch ", Directive::Match),
    (b"multimatch ", Directive::Match),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Directive {
    Probe,
    Key,
    Match,
}

/// Result of one [`colorize`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOutcome {
    /// Range actually styled, after normalization.
    pub range: Range<u32>,
    /// State at the end of the range. Pass it as the initial state of the
    /// range that follows.
    pub final_style: Style,
    /// Main loop iterations.
    pub cycles: u32,
}

/// Style `length` bytes of `accessor` from `start`, resuming in
/// `init_style`.
///
/// The range is first normalized (clamped to the document, and widened to
/// the enclosing line when `init_style` needs left context). Runs covering
/// exactly the normalized range are handed to
/// [`Accessor::colour_to`] in order.
///
/// `keyword_lists` is part of the lexer entry point shared by all lexers;
/// the probes grammar has no keyword-driven branches.
pub fn colorize<A: Accessor + ?Sized>(
    start: u32,
    length: u32,
    init_style: Style,
    _keyword_lists: &[&WordList],
    accessor: &mut A,
) -> LexOutcome {
    let range = normalize_range(start, length, init_style, &*accessor);
    let options = LexerOptions::from_accessor(&*accessor);

    tracing::debug!(
        start = range.start,
        end = range.end,
        length = range.end - range.start,
        init_style = %init_style,
        line = accessor.line_of(range.start),
        "parsing"
    );
    let began = Instant::now();

    let cx = ScanContext::new(accessor, range.start, range.end - range.start, init_style);
    let mut tokenizer = Tokenizer::new(cx, options);
    let cycles = tokenizer.run();
    let final_style = tokenizer.cx.complete();

    tracing::debug!(
        cycles,
        elapsed_us = began.elapsed().as_secs_f64() * 1_000_000.0,
        final_style = %final_style,
        "cycled"
    );

    LexOutcome {
        range,
        final_style,
        cycles,
    }
}

/// Folding entry point. Probe files have no foldable structure.
pub fn fold<A: Accessor + ?Sized>(
    _start: u32,
    _length: u32,
    _init_style: Style,
    _keyword_lists: &[&WordList],
    _accessor: &mut A,
) {
}

/// Compute the range [`colorize`] actually scans.
///
/// The range is clamped to the document. If `init_style` depends on the
/// line's left context, the start moves back to the start of its line and
/// the end moves forward to at least the start of the next line.
pub fn normalize_range<A: Accessor + ?Sized>(
    start: u32,
    length: u32,
    init_style: Style,
    accessor: &A,
) -> Range<u32> {
    let doc_len = accessor.len();
    let start = start.min(doc_len);
    let end = start.saturating_add(length).min(doc_len);
    if !init_style.needs_line_context() {
        return start..end;
    }

    let line = accessor.line_of(start);
    let line_start = accessor.line_start(line);
    let end = end.max(accessor.line_start(line + 1)).min(doc_len);
    if line_start != start {
        tracing::trace!(
            requested = start,
            line_start,
            init_style = %init_style,
            "restarting from line start"
        );
    }
    line_start..end
}

struct Tokenizer<'a, A: Accessor + ?Sized> {
    cx: ScanContext<'a, A>,
    /// Byte that opened the current query or template field.
    delimiter: Option<u8>,
    /// Set while the leading `#`/space run of a comment line is scanned.
    expecting_more_comment: bool,
    options: LexerOptions,
}

impl<'a, A: Accessor + ?Sized> Tokenizer<'a, A> {
    fn new(cx: ScanContext<'a, A>, options: LexerOptions) -> Self {
        Self {
            cx,
            delimiter: None,
            expecting_more_comment: false,
            options,
        }
    }

    /// Scan to the end of the range. Returns the number of iterations.
    fn run(&mut self) -> u32 {
        let mut cycles = 0;
        while self.cx.more() {
            cycles += 1;
            if self.cx.at_line_start {
                self.expecting_more_comment = false;
                self.delimiter = None;
                self.cx.begin_line();
            }
            self.step();
            self.cx.forward();
        }
        cycles
    }

    /// Handle the current byte in the current state.
    fn step(&mut self) {
        match self.cx.state {
            Style::Default => self.statement(),
            Style::Probe => self.probe(),
            Style::ProbeType => self.probe_type(),
            Style::ProbeName => self.probe_name(),
            Style::ProbeQuery => self.probe_query(),
            Style::ProbeQueryContent => self.probe_query_content(),
            Style::Key => self.key(),
            Style::Service => self.service(),
            Style::TemplateKey => self.template_key(),
            Style::TemplateDemiliter => self.template_demiliter(),
            Style::TemplateFlag => self.template_flag(),
            Style::Template => self.template(),
            Style::CommentLine => self.comment_line(),
            Style::CommentCase => self.comment_case(),
            Style::CommentCaseContent => self.comment_case_content(),
            Style::ProbeScopeBegin => self.scope_begin(),
            // Inert until the next line start.
            Style::ProbeQueryEnd
            | Style::ProbeBad
            | Style::Delimiter
            | Style::Value
            | Style::ValueBad
            | Style::Match
            | Style::TemplateBad => {}
        }
    }

    // ─── Statements ─────────────────────────────────────────────────────

    #[allow(
        clippy::cast_possible_truncation,
        reason = "directive literals are a few bytes long"
    )]
    fn statement(&mut self) {
        if self.cx.ch == b'#' {
            self.expecting_more_comment = true;
            self.cx.set_state(Style::CommentLine);
            return;
        }

        let Some(&(literal, directive)) = DIRECTIVES
            .iter()
            .find(|(literal, _)| self.cx.matches(literal))
        else {
            self.cx.set_state(Style::ProbeBad);
            return;
        };

        // Stop on the separating space; the main loop steps past it.
        let rest = literal.len() as u32 - 1;
        match directive {
            Directive::Probe => {
                self.cx.set_state(Style::Probe);
                self.cx.forward_n(rest);
            }
            Directive::Key => {
                self.cx.set_state(Style::Key);
                self.cx.forward_n(rest);
            }
            Directive::Match => {
                self.cx.set_state(Style::Match);
                self.cx.forward_n(rest);
                self.cx.set_state(Style::Service);
            }
        }
    }

    // ─── Probe ──────────────────────────────────────────────────────────

    fn probe(&mut self) {
        if self.cx.matches(b"TCP ") || self.cx.matches(b"UDP ") {
            self.cx.set_state(Style::ProbeType);
            self.cx.forward_n(3);
        } else {
            self.cx.set_state(Style::ProbeBad);
        }
    }

    fn probe_type(&mut self) {
        if self.cx.ch.is_ascii_alphanumeric() {
            self.cx.set_state(Style::ProbeName);
        } else {
            self.cx.set_state(Style::ProbeBad);
        }
    }

    fn probe_name(&mut self) {
        if self.cx.ch != b' ' || self.cx.at_line_end {
            return;
        }
        self.cx.forward();
        if !self.cx.more() || self.cx.at_line_end {
            return;
        }
        if self.cx.ch == b'q' {
            self.cx.set_state(Style::ProbeQuery);
        } else {
            self.cx.set_state(Style::ProbeBad);
        }
    }

    /// The byte after `q` opens the query; content starts right after it.
    fn probe_query(&mut self) {
        self.cx.set_state(Style::Delimiter);
        self.delimiter = Some(self.cx.ch);
        if self.cx.at_line_end || !self.cx.more() {
            return;
        }
        self.cx.forward();
        self.cx.set_state(Style::ProbeQueryContent);
        self.probe_query_content();
    }

    fn probe_query_content(&mut self) {
        if Some(self.cx.ch) != self.delimiter {
            return;
        }
        self.cx.set_state(Style::Delimiter);
        if self.cx.at_line_end || !self.cx.more() {
            return;
        }
        self.cx.forward();
        self.cx.set_state(Style::ProbeQueryEnd);
    }

    // ─── Key / value ────────────────────────────────────────────────────

    fn key(&mut self) {
        let accepted =
            !self.options.strict_values || self.cx.ch.is_ascii_digit() || self.cx.at_line_end;
        if accepted {
            self.cx.set_state(Style::Value);
        } else {
            self.cx.set_state(Style::ValueBad);
        }
    }

    // ─── Match templates ────────────────────────────────────────────────

    fn service(&mut self) {
        if !is_space(self.cx.ch) {
            return;
        }
        if self.cx.at_line_terminator() {
            // The line ends before any template.
            self.cx.set_state(Style::TemplateBad);
            return;
        }
        self.cx.skip_whitespace_in_line();
        if self.opens_first_template_key() {
            self.cx.set_state(Style::TemplateKey);
        } else {
            self.cx.set_state(Style::TemplateBad);
        }
    }

    /// Only `m` may open the first field unless
    /// [`LexerOptions::any_template_key`] is set.
    fn opens_first_template_key(&self) -> bool {
        if self.options.any_template_key {
            is_template_key_byte(self.cx.ch)
        } else {
            self.cx.ch == b'm'
        }
    }

    fn template_key(&mut self) {
        let ch = self.cx.ch;
        if is_template_key_byte(ch) {
            return;
        }
        if is_space(ch) {
            self.cx.set_state(Style::TemplateBad);
            return;
        }

        self.delimiter = Some(ch);
        self.cx.set_state(Style::TemplateDemiliter);
        if !self.cx.at_line_end && self.cx.more() {
            self.cx.forward();
            // A doubled delimiter is an empty field.
            if Some(self.cx.ch) != self.delimiter {
                self.cx.set_state(Style::Template);
            }
        }
    }

    fn template(&mut self) {
        if Some(self.cx.ch) == self.delimiter {
            self.cx.set_state(Style::TemplateDemiliter);
        }
    }

    fn template_demiliter(&mut self) {
        let ch = self.cx.ch;
        if ch.is_ascii_alphabetic() {
            self.cx.set_state(Style::TemplateFlag);
        } else if is_space(ch) {
            self.next_template_field();
        } else {
            self.cx.set_state(Style::TemplateBad);
        }
    }

    fn template_flag(&mut self) {
        let ch = self.cx.ch;
        if ch.is_ascii_alphabetic() {
            return;
        }
        if is_space(ch) {
            self.next_template_field();
        } else {
            self.cx.set_state(Style::TemplateBad);
        }
    }

    /// After a closed field: skip whitespace, then expect another key.
    fn next_template_field(&mut self) {
        if self.cx.at_line_terminator() {
            return;
        }
        self.cx.skip_whitespace_in_line();
        if is_template_key_byte(self.cx.ch) {
            self.cx.set_state(Style::TemplateKey);
        } else {
            self.cx.set_state(Style::TemplateBad);
        }
    }

    // ─── Comments ───────────────────────────────────────────────────────

    #[allow(
        clippy::cast_possible_truncation,
        reason = "comment markers are a few bytes long"
    )]
    fn comment_line(&mut self) {
        if self.expecting_more_comment {
            if matches!(self.cx.ch, b'#' | b' ') {
                return;
            }
            self.expecting_more_comment = false;
            if self.cx.matches(NEXT_PROBE) {
                self.cx.recolour_line(Style::ProbeScopeBegin);
                self.cx.set_state(Style::ProbeScopeBegin);
                self.cx.forward_n(NEXT_PROBE.len() as u32 - 1);
                return;
            }
        }

        if self.cx.matches(COMMENT_CASE) {
            self.cx.set_state(Style::CommentCase);
            self.cx.forward_n(COMMENT_CASE.len() as u32 - 1);
        }
    }

    fn comment_case(&mut self) {
        if self.cx.ch == b' ' {
            self.cx.set_state(Style::CommentLine);
        } else {
            self.cx.set_state(Style::CommentCaseContent);
        }
    }

    fn comment_case_content(&mut self) {
        if self.cx.ch == b' ' {
            self.cx.set_state(Style::CommentLine);
        }
    }

    /// Banner padding is tolerated; any other text demotes the line back
    /// to a plain comment.
    fn scope_begin(&mut self) {
        match self.cx.ch {
            b'#' | b' ' | b'\r' | b'\n' => {}
            _ => {
                self.cx.recolour_line(Style::CommentLine);
                self.cx.set_state(Style::CommentLine);
            }
        }
    }
}

#[inline]
fn is_template_key_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b':'
}
