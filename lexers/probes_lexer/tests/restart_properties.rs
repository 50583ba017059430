//! Property-based tests for incremental lexing.
//!
//! These tests generate probe files mixing well-formed directives, comments
//! and noise with all three line terminators, and verify:
//! 1. Coverage: the styled runs exactly tile the normalized range
//! 2. Restartability: lexing in pieces split at line starts, threading the
//!    final style, matches a single pass
//! 3. Edits: replacing text and re-lexing matches lexing the result fresh

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    clippy::cast_possible_truncation,
    reason = "Proptest macros generate code with these patterns"
)]

use probes_lexer::{normalize_range, Accessor, Document, Style, PROBES};
use proptest::prelude::*;

// -- Source Generation Strategies --

fn regex(pattern: &str) -> impl Strategy<Value = String> {
    prop::string::string_regex(pattern).expect("valid regex")
}

/// One line of a probe file, without its terminator.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("##############################NEXT PROBE##############################".to_string()),
        Just("# NEXT PROBE".to_string()),
        regex("#[ -~]{0,20}"),
        regex("# [a-z ]{0,6}case:[a-z]{0,6}( [a-z]{0,6})?"),
        regex("Probe (TCP|UDP|SCTP) [A-Za-z0-9-]{0,8} ?q[|/%][ -~]{0,10}[|/%]?( no-payload)?"),
        regex("(ports|sslports|rarity|totalwaitms|tcpwrappedms|fallback|Exclude) ?[0-9A-Za-z,-]{0,12}"),
        regex(
            "(match|softmatch|multimatch) [a-z-]{0,8} ?[mp:][/|=][ -~]{0,12}[/|=][is]{0,2}( [pvi]/[ -~]{0,6}/)?( cpe:/a:[a-z]{1,5}/)? ?"
        ),
        regex("[ -~]{0,20}"),
        Just(String::new()),
    ]
}

fn terminator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n"), Just("\r")]
}

/// A whole document, optionally without a final terminator.
fn source_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((line_strategy(), terminator_strategy()), 0..12),
        any::<bool>(),
    )
        .prop_map(|(lines, trailing)| {
            let mut source = String::new();
            let count = lines.len();
            for (index, (line, terminator)) in lines.into_iter().enumerate() {
                source.push_str(&line);
                if trailing || index + 1 < count {
                    source.push_str(terminator);
                }
            }
            source
        })
}

// -- Helpers --

/// Accessor that forwards to a `Document` and records every styling call.
struct Recorder {
    doc: Document,
    started_at: Option<u32>,
    ends: Vec<u32>,
}

impl Recorder {
    fn new(doc: Document) -> Self {
        Self {
            doc,
            started_at: None,
            ends: Vec::new(),
        }
    }
}

impl Accessor for Recorder {
    fn len(&self) -> u32 {
        self.doc.len()
    }

    fn byte_at(&self, pos: u32) -> u8 {
        self.doc.byte_at(pos)
    }

    fn line_of(&self, pos: u32) -> u32 {
        self.doc.line_of(pos)
    }

    fn line_start(&self, line: u32) -> u32 {
        self.doc.line_start(line)
    }

    fn property_int(&self, key: &str, default: i32) -> i32 {
        self.doc.property_int(key, default)
    }

    fn start_styling(&mut self, pos: u32) {
        self.started_at = Some(pos);
        self.doc.start_styling(pos);
    }

    fn colour_to(&mut self, end: u32, style: Style) {
        self.ends.push(end);
        self.doc.colour_to(end, style);
    }
}

fn lexed(source: &str) -> Document {
    let mut doc = Document::new(source);
    doc.lex_all();
    doc
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Runs start at the normalized start, strictly advance, and end at the
    /// normalized end, for any initial style and any requested range.
    #[test]
    fn prop_runs_tile_normalized_range(
        source in source_strategy(),
        start_pick in any::<prop::sample::Index>(),
        length_pick in any::<prop::sample::Index>(),
        style_pick in any::<prop::sample::Index>(),
    ) {
        let doc = lexed(&source);
        let len = doc.len() as usize;
        let start = start_pick.index(len + 1) as u32;
        let length = length_pick.index(len + 1) as u32;
        let init_style = Style::ALL[style_pick.index(Style::ALL.len())];
        let expected = normalize_range(start, length, init_style, &doc);

        let mut recorder = Recorder::new(doc);
        let outcome = PROBES.colorize(start, length, init_style, &mut recorder);

        prop_assert_eq!(&outcome.range, &expected);
        prop_assert_eq!(recorder.started_at, Some(expected.start));
        let mut previous = expected.start;
        for &end in &recorder.ends {
            prop_assert!(end > previous, "run ending at {} after {}", end, previous);
            previous = end;
        }
        prop_assert_eq!(previous, expected.end);
        prop_assert!(outcome.cycles <= expected.end - expected.start);
    }

    /// Two calls split at any line start equal one call.
    #[test]
    fn prop_split_at_line_start(
        source in source_strategy(),
        line_pick in any::<prop::sample::Index>(),
    ) {
        let whole = lexed(&source);

        let mut parts = Document::new(source.as_str());
        let line = line_pick.index(parts.line_count() as usize) as u32;
        let split = parts.line_start(line);
        let first = parts.lex(0, split, Style::Default);
        let rest = parts.len() - split;
        parts.lex(split, rest, first.final_style);

        prop_assert_eq!(parts.styles(), whole.styles());
    }

    /// Lexing `chunk` lines at a time equals one call.
    #[test]
    fn prop_chunked_lexing(source in source_strategy(), chunk in 1u32..4) {
        let whole = lexed(&source);

        let mut chunked = Document::new(source.as_str());
        let mut style = Style::Default;
        let mut line = 0;
        while line < chunked.line_count() {
            let from = chunked.line_start(line);
            let to = chunked.line_start(line + chunk);
            style = chunked.lex(from, to - from, style).final_style;
            line += chunk;
        }

        prop_assert_eq!(chunked.styles(), whole.styles());
    }

    /// An edit followed by incremental re-lexing equals a fresh lex.
    #[test]
    fn prop_edit_then_relex(
        source in source_strategy(),
        inserted in line_strategy(),
        newline in any::<bool>(),
        start_pick in any::<prop::sample::Index>(),
        end_pick in any::<prop::sample::Index>(),
    ) {
        let mut doc = lexed(&source);
        let len = source.len();
        let a = start_pick.index(len + 1) as u32;
        let b = end_pick.index(len + 1) as u32;
        let mut text = inserted;
        if newline {
            text.push('\n');
        }

        doc.replace(a.min(b)..a.max(b), &text);
        let fresh = lexed(doc.text());

        prop_assert_eq!(doc.text(), fresh.text());
        prop_assert_eq!(doc.styles(), fresh.styles());
    }
}

/// Chunks that split a CRLF pair are not line starts; the index never
/// reports one.
#[test]
fn crlf_is_never_split_by_the_line_index() {
    let doc = Document::new("ports 1\r\nports 2\r\n");
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.line_start(1), 9);
    assert_eq!(doc.line_start(2), 18);
}
