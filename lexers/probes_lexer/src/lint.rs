//! Diagnostics for spans the lexer styled as bad.

use std::fmt;
use std::ops::Range;

use crate::{Accessor, Document, Style, StyleRun};

/// A malformed span found by [`lint`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadSpan {
    pub style: Style,
    /// Byte range, without the trailing line terminator.
    pub range: Range<u32>,
    /// 1-based line of the span start.
    pub line: u32,
    /// 1-based byte column of the span start.
    pub column: u32,
    pub text: String,
}

impl BadSpan {
    pub fn message(&self) -> &'static str {
        match self.style {
            Style::ValueBad => "directive value must start with a digit",
            Style::TemplateBad => "malformed match template",
            _ => "unrecognized probe directive",
        }
    }
}

impl fmt::Display for BadSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: `{}`",
            self.line,
            self.column,
            self.message(),
            self.text
        )
    }
}

/// Collect the bad-styled runs of a lexed document.
///
/// Runs consisting only of line terminators (a bad style carried onto an
/// empty remainder of the line) are skipped.
pub fn lint(doc: &Document) -> Vec<BadSpan> {
    doc.runs()
        .into_iter()
        .filter(|run| run.style.is_bad())
        .filter_map(|run| {
            let run = trim_terminators(doc, run);
            if run.is_empty() {
                return None;
            }
            let (line, column) = doc.line_col(run.range.start);
            Some(BadSpan {
                style: run.style,
                text: doc.slice(run.range.clone()).into_owned(),
                range: run.range,
                line,
                column,
            })
        })
        .collect()
}

/// Drop trailing `\r`/`\n` bytes from `run`.
fn trim_terminators(doc: &Document, mut run: StyleRun) -> StyleRun {
    while !run.is_empty() && matches!(doc.byte_at(run.range.end - 1), b'\r' | b'\n') {
        run.range.end -= 1;
    }
    run
}

#[cfg(test)]
mod tests;
