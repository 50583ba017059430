use super::*;
use pretty_assertions::assert_eq;

fn lint_source(source: &str) -> Vec<BadSpan> {
    let mut doc = Document::new(source);
    doc.lex_all();
    lint(&doc)
}

#[test]
fn clean_file_has_no_findings() {
    let source = "\
# NEXT PROBE
Probe TCP NULL q||
totalwaitms 6000
match ftp m/^220 ([-\\w]+) FTP/i p/$1/
";
    assert_eq!(lint_source(source), vec![]);
}

#[test]
fn reports_unknown_directive() {
    let spans = lint_source("ports 21\nbogus line\n");
    assert_eq!(
        spans,
        vec![BadSpan {
            style: Style::ProbeBad,
            range: 9..19,
            line: 2,
            column: 1,
            text: "bogus line".to_owned(),
        }]
    );
    assert_eq!(
        spans[0].to_string(),
        "2:1: unrecognized probe directive: `bogus line`"
    );
}

#[test]
fn reports_template_errors_with_column() {
    let spans = lint_source("match ftp p/x/\r\n");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].style, Style::TemplateBad);
    assert_eq!((spans[0].line, spans[0].column), (1, 11));
    assert_eq!(spans[0].text, "p/x/");
    assert_eq!(spans[0].message(), "malformed match template");
}

#[test]
fn skips_bad_line_terminators() {
    // The template is missing: only the newline is styled bad.
    assert_eq!(lint_source("match ftp\n"), vec![]);
    // Blank lines are styled bad on their terminator only.
    assert_eq!(lint_source("ports 1\n\nports 2\n"), vec![]);
}

#[test]
fn reports_strict_values() {
    let mut doc = Document::new("rarity high\n");
    doc.set_property(crate::LexerOptions::STRICT_VALUES, "1");
    doc.lex_all();
    let spans = lint(&doc);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].style, Style::ValueBad);
    assert_eq!(spans[0].text, "high");
    assert_eq!(
        spans[0].to_string(),
        "1:8: directive value must start with a digit: `high`"
    );
}

#[test]
fn reports_spans_starting_inside_a_character() {
    // `é` (bytes 11..13) opens the field and closes it at bytes 14..16, so the
    // bad span starts on the second byte of the closing `é`.
    let spans = lint_source("match ftp m\u{e9}x\u{e9}!\n");
    assert_eq!(
        spans,
        vec![BadSpan {
            style: Style::TemplateBad,
            range: 15..17,
            line: 1,
            column: 16,
            text: "\u{fffd}!".to_owned(),
        }]
    );
}

#[test]
fn non_ascii_bad_line_keeps_its_text() {
    let spans = lint_source("r\u{e9}sum\u{e9}\r\n");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].range, 0..8);
    assert_eq!(spans[0].text, "r\u{e9}sum\u{e9}");
}
