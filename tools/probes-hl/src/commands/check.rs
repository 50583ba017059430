//! The `check` command: report malformed spans of a probes file.

use probes_lexer::lint;

use super::{load_document, CliError};
use crate::config::HighlightConfig;

/// Print a diagnostic for every bad span. Returns `true` if there were none.
pub fn check_file(path: &str, config: &HighlightConfig) -> Result<bool, CliError> {
    let doc = load_document(path, config)?;
    let spans = lint(&doc);

    for span in &spans {
        eprintln!("{path}:{span}");
    }

    if spans.is_empty() {
        println!("OK: {path} ({} lines)", doc.line_count());
        Ok(true)
    } else {
        eprintln!("{path}: {} problem(s) found", spans.len());
        Ok(false)
    }
}
