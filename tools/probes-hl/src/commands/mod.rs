//! Command handlers for the probes highlighter CLI.
//!
//! Each submodule implements one command. Shared helpers (`read_file`,
//! `load_document`) live here.

use probes_lexer::{Accessor, Document, Style};

use crate::config::HighlightConfig;

mod check;
mod runs;
mod styles;

pub use check::check_file;
pub use runs::print_runs;
pub use styles::list_styles;

/// Errors reported by the CLI before exiting with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Usage(String),
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| {
        let path = path.to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => CliError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Io { path, source },
        }
    })
}

/// Read and lex a file with `config`.
pub(crate) fn load_document(path: &str, config: &HighlightConfig) -> Result<Document, CliError> {
    let content = read_file(path)?;
    let mut doc = Document::new(content);
    config.apply(&mut doc);
    tracing::debug!(path, bytes = doc.len(), lines = doc.line_count(), "lexing file");
    lex_document(&mut doc, config.chunk_lines);
    Ok(doc)
}

/// Lex the whole document, `chunk_lines` lines per call when set.
pub(crate) fn lex_document(doc: &mut Document, chunk_lines: Option<u32>) {
    let Some(chunk) = chunk_lines else {
        doc.lex_all();
        return;
    };
    let mut style = Style::Default;
    let mut line = 0;
    while line < doc.line_count() {
        let from = doc.line_start(line);
        let to = doc.line_start(line.saturating_add(chunk));
        style = doc.lex(from, to - from, style).final_style;
        line = line.saturating_add(chunk);
    }
}
