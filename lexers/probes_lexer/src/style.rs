//! Style identifiers shared with the host's theming layer.
//!
//! Every lexical state of the tokenizer doubles as the style applied to the
//! characters scanned in that state, so a single `#[repr(u8)]` enum serves
//! as both. Discriminants are stable: hosts persist them per character and
//! hand the style of the byte before a range back as the initial state.

/// Lexical state / style of a character range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Style {
    /// Start of statement; every line begins here.
    #[default]
    Default = 0,

    // === Comments: 1-3 ===
    /// `#` comment line.
    CommentLine = 1,
    /// `case:` marker inside a comment.
    CommentCase = 2,
    /// Word following a `case:` marker.
    CommentCaseContent = 3,

    // === Probe directive: 4-12 ===
    /// `Probe ` keyword.
    Probe = 4,
    /// `TCP ` or `UDP ` protocol.
    ProbeType = 5,
    /// Probe name.
    ProbeName = 6,
    /// The `q` opening a probe query.
    ProbeQuery = 7,
    /// Verbatim query payload between delimiters.
    ProbeQueryContent = 8,
    /// Remainder of a probe line after the closing delimiter.
    ProbeQueryEnd = 9,
    /// `NEXT PROBE` banner comment.
    ProbeScopeBegin = 10,
    /// Line that matches no directive, or a malformed probe clause.
    ProbeBad = 11,
    /// Delimiter character of a probe query.
    Delimiter = 12,

    // === Key/value directives: 13-15 ===
    /// `ports `, `rarity `, `fallback `, ... keyword.
    Key = 13,
    /// Directive value.
    Value = 14,
    /// Rejected directive value.
    ValueBad = 15,

    // === Match directives: 16-22 ===
    /// `match`, `softmatch` or `multimatch` keyword.
    Match = 16,
    /// Service name of a match line.
    Service = 17,
    /// Template field key (`m`, `p`, `cpe:`, ...).
    TemplateKey = 18,
    /// Delimiter character of a template field.
    TemplateDemiliter = 19,
    /// Single-letter flags after a field (`i`, `s`).
    TemplateFlag = 20,
    /// Verbatim template field content.
    Template = 21,
    /// Malformed template.
    TemplateBad = 22,
}

/// Raised when a host hands back a style id this lexer never produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown probes style id {0}")]
pub struct InvalidStyle(pub u8);

impl Style {
    /// Every style, in id order.
    pub const ALL: [Style; 23] = [
        Style::Default,
        Style::CommentLine,
        Style::CommentCase,
        Style::CommentCaseContent,
        Style::Probe,
        Style::ProbeType,
        Style::ProbeName,
        Style::ProbeQuery,
        Style::ProbeQueryContent,
        Style::ProbeQueryEnd,
        Style::ProbeScopeBegin,
        Style::ProbeBad,
        Style::Delimiter,
        Style::Key,
        Style::Value,
        Style::ValueBad,
        Style::Match,
        Style::Service,
        Style::TemplateKey,
        Style::TemplateDemiliter,
        Style::TemplateFlag,
        Style::Template,
        Style::TemplateBad,
    ];

    /// Numeric id exposed to the theming layer.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Name used by theme files and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Style::Default => "default",
            Style::CommentLine => "comment-line",
            Style::CommentCase => "comment-case",
            Style::CommentCaseContent => "comment-case-content",
            Style::Probe => "probe",
            Style::ProbeType => "probe-type",
            Style::ProbeName => "probe-name",
            Style::ProbeQuery => "probe-query",
            Style::ProbeQueryContent => "probe-query-content",
            Style::ProbeQueryEnd => "probe-query-end",
            Style::ProbeScopeBegin => "probe-scope-begin",
            Style::ProbeBad => "probe-bad",
            Style::Delimiter => "delimiter",
            Style::Key => "key",
            Style::Value => "value",
            Style::ValueBad => "value-bad",
            Style::Match => "match",
            Style::Service => "service",
            Style::TemplateKey => "template-key",
            Style::TemplateDemiliter => "template-demiliter",
            Style::TemplateFlag => "template-flag",
            Style::Template => "template",
            Style::TemplateBad => "template-bad",
        }
    }

    /// Returns `true` for the styles marking malformed constructs.
    pub const fn is_bad(self) -> bool {
        matches!(self, Style::ProbeBad | Style::ValueBad | Style::TemplateBad)
    }

    /// Returns `true` if resuming in this state needs the enclosing line's
    /// left context (the delimiter register or the comment-continuation
    /// flag), so the scan must restart from the line start.
    pub const fn needs_line_context(self) -> bool {
        matches!(
            self,
            Style::Delimiter
                | Style::ProbeQueryContent
                | Style::TemplateDemiliter
                | Style::Template
                | Style::CommentLine
                | Style::CommentCase
                | Style::CommentCaseContent
                | Style::ProbeScopeBegin
        )
    }
}

impl TryFrom<u8> for Style {
    type Error = InvalidStyle;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Style::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(InvalidStyle(id))
    }
}

impl From<Style> for u8 {
    fn from(style: Style) -> u8 {
        style.id()
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Size assertion: styles are stored per byte by hosts.
const _: () = assert!(std::mem::size_of::<Style>() == 1);
