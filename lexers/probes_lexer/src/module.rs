//! Registration metadata: the lexer descriptor a host editor enumerates,
//! its keyword lists, and the default theme.

use crate::tokenizer::{colorize, fold, LexOutcome};
use crate::{Accessor, Style};

/// Sorted, immutable word set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordList {
    words: &'static [&'static str],
}

impl WordList {
    /// Wrap a word slice. `words` must be sorted and free of duplicates.
    pub const fn new(words: &'static [&'static str]) -> Self {
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search(&word).is_ok()
    }

    pub fn words(&self) -> &'static [&'static str] {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Keyword list shipped with the lexer. The grammar does not consult it.
pub static KEYWORDS: WordList = WordList::new(&["break", "continue"]);

/// Default display attributes of one style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleAttributes {
    pub bold: bool,
    /// Foreground colour as `0xRRGGBB`; `None` inherits the editor default.
    pub fore: Option<u32>,
}

impl StyleAttributes {
    const fn fore(rgb: u32) -> Self {
        Self {
            bold: false,
            fore: Some(rgb),
        }
    }

    const fn bold(rgb: u32) -> Self {
        Self {
            bold: true,
            fore: Some(rgb),
        }
    }
}

impl std::fmt::Display for StyleAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.bold, self.fore) {
            (false, None) => Ok(()),
            (true, None) => f.write_str("bold"),
            (false, Some(rgb)) => write!(f, "fore:#{rgb:06X}"),
            (true, Some(rgb)) => write!(f, "bold; fore:#{rgb:06X}"),
        }
    }
}

/// Descriptor a host uses to register the lexer.
#[derive(Clone, Copy, Debug)]
pub struct LexerModule {
    /// Short name used in configuration (`lexer=probes`).
    pub name: &'static str,
    /// Name shown in language menus.
    pub display_name: &'static str,
    pub keyword_lists: &'static [&'static WordList],
}

impl LexerModule {
    /// Style a range. See [`colorize`].
    pub fn colorize<A: Accessor + ?Sized>(
        &self,
        start: u32,
        length: u32,
        init_style: Style,
        accessor: &mut A,
    ) -> LexOutcome {
        colorize(start, length, init_style, self.keyword_lists, accessor)
    }

    /// Fold a range. See [`fold`].
    pub fn fold<A: Accessor + ?Sized>(
        &self,
        start: u32,
        length: u32,
        init_style: Style,
        accessor: &mut A,
    ) {
        fold(start, length, init_style, self.keyword_lists, accessor);
    }

    /// Style ids and names, in id order.
    pub fn style_names(&self) -> impl Iterator<Item = (u8, &'static str)> {
        Style::ALL.iter().map(|style| (style.id(), style.name()))
    }

    /// Default display attributes of `style`.
    pub const fn default_attributes(&self, style: Style) -> StyleAttributes {
        match style {
            Style::Default => StyleAttributes {
                bold: false,
                fore: None,
            },
            Style::CommentLine => StyleAttributes::fore(0x60_80_60),
            Style::CommentCase | Style::Probe | Style::Key | Style::Match => {
                StyleAttributes::fore(0x00_00_FF)
            }
            Style::CommentCaseContent | Style::ProbeQueryContent | Style::Template => {
                StyleAttributes::fore(0xFF_80_00)
            }
            Style::ProbeScopeBegin => StyleAttributes::fore(0x00_7F_7F),
            Style::ProbeType => StyleAttributes::fore(0x00_80_FF),
            Style::ProbeBad | Style::ValueBad | Style::TemplateBad => {
                StyleAttributes::fore(0xEE_EE_EE)
            }
            Style::ProbeName => StyleAttributes::bold(0x1E_90_FF),
            Style::ProbeQuery | Style::TemplateKey => StyleAttributes::fore(0xA4_60_00),
            Style::TemplateFlag => StyleAttributes::fore(0xFF_80_FF),
            Style::Delimiter | Style::TemplateDemiliter => StyleAttributes::fore(0xB0_00_B0),
            Style::ProbeQueryEnd => StyleAttributes::fore(0x40_80_40),
            Style::Value | Style::Service => StyleAttributes::bold(0xFF_0E_0E),
        }
    }
}

/// The Nmap service probes lexer.
pub static PROBES: LexerModule = LexerModule {
    name: "probes",
    display_name: "Nmap Service Probes",
    keyword_lists: &[&KEYWORDS],
};
