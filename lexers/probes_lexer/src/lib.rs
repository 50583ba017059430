//! Syntax-highlighting lexer for Nmap service probe files
//! (`nmap-service-probes`).
//!
//! The lexer is a single-pass, line-oriented state machine. It reads a
//! host document through the [`Accessor`] trait and styles every byte of a
//! requested range with a [`Style`]. Any line start is a valid point to
//! resume from, so hosts can re-lex only what an edit touched.
//!
//! # Crate Layout
//!
//! - [`colorize`]: the lexer entry point
//! - [`Accessor`]: the host interface (text, line index, properties, styling)
//! - [`Document`]: an in-memory host with incremental re-lexing
//! - [`lint`]: turns bad-style spans into diagnostics
//! - [`PROBES`]: registration metadata for editor integration
//!
//! ```
//! use probes_lexer::{Document, Style};
//!
//! let mut doc = Document::new("ports 21,22,23\n");
//! doc.lex_all();
//! assert_eq!(doc.style_at(0), Style::Key);
//! assert_eq!(doc.style_at(6), Style::Value);
//! ```

mod accessor;
mod context;
mod document;
mod lint;
mod module;
mod runs;
mod style;
mod tokenizer;

pub use accessor::{Accessor, LexerOptions};
pub use document::Document;
pub use lint::{lint, BadSpan};
pub use module::{LexerModule, StyleAttributes, WordList, KEYWORDS, PROBES};
pub use runs::StyleRun;
pub use style::{InvalidStyle, Style};
pub use tokenizer::{colorize, fold, normalize_range, LexOutcome};
