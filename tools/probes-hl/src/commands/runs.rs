//! The `runs` command: print the styled runs of a file.

use probes_lexer::Document;

use super::{load_document, CliError};
use crate::config::HighlightConfig;

/// Print one `line:col  style  "text"` row per styled run.
pub fn print_runs(path: &str, config: &HighlightConfig) -> Result<(), CliError> {
    let doc = load_document(path, config)?;
    for row in format_runs(&doc) {
        println!("{row}");
    }
    Ok(())
}

pub(super) fn format_runs(doc: &Document) -> Vec<String> {
    doc.runs()
        .into_iter()
        .map(|run| {
            let (line, column) = doc.line_col(run.range.start);
            let text = doc.slice(run.range);
            format!("{line}:{column}  {:<20}  {text:?}", run.style.name())
        })
        .collect()
}
