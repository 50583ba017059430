//! Command-line options shared by the file commands.

use probes_lexer::{Document, LexerOptions};

use crate::commands::CliError;

/// How a file is lexed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Lex this many lines per call, threading the final style between
    /// calls. `None` lexes the whole file at once.
    pub chunk_lines: Option<u32>,
    pub strict_values: bool,
    pub any_template_key: bool,
}

impl HighlightConfig {
    /// Parse options and the optional file path. Flags may come before or
    /// after the path.
    pub fn parse_options(args: &[String]) -> Result<(Self, Option<String>), CliError> {
        let mut config = Self::default();
        let mut path = None;

        for arg in args {
            if let Some(n) = arg.strip_prefix("--chunk-lines=") {
                match n.parse::<u32>() {
                    Ok(n) if n > 0 => config.chunk_lines = Some(n),
                    _ => {
                        return Err(CliError::Usage(format!(
                            "--chunk-lines expects a positive line count, got '{n}'"
                        )))
                    }
                }
            } else if arg == "--strict-values" {
                config.strict_values = true;
            } else if arg == "--any-template-key" {
                config.any_template_key = true;
            } else if arg.starts_with('-') {
                return Err(CliError::Usage(format!("unknown option '{arg}'")));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(CliError::Usage(format!("unexpected argument '{arg}'")));
            }
        }

        Ok((config, path))
    }

    /// Set the lexer properties on `doc`.
    pub fn apply(&self, doc: &mut Document) {
        doc.set_property(LexerOptions::STRICT_VALUES, flag(self.strict_values));
        doc.set_property(LexerOptions::ANY_TEMPLATE_KEY, flag(self.any_template_key));
    }
}

fn flag(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}
