//! Line classification.

use std::iter::FusedIterator;

use once_cell::sync::Lazy;
use ratatui::style::Style;
use regex::Regex;

use crate::inline::{InlineSpan, parse_inline};

static ORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s").expect("valid ordered item pattern"));
static UNORDERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•]\s").expect("valid unordered item pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockKind {
    Quote,
    OrderedItem,
    UnorderedItem,
    Blank,
    Paragraph,
}

impl BlockKind {
    pub fn is_list_item(self) -> bool {
        matches!(self, BlockKind::OrderedItem | BlockKind::UnorderedItem)
    }
}

/// One classified source line.
///
/// `marker` is the leading prefix that decided the kind (`"> "`, `"3. "`, `"- "`), empty for
/// blanks and paragraphs. `text` is the rest of the line and `spans` its inline parse. Blank
/// blocks keep their whitespace in `text` and carry no spans.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub line: usize,
    pub marker: &'a str,
    pub text: &'a str,
    pub spans: Vec<InlineSpan<'a>>,
}

impl<'a> Block<'a> {
    pub fn parse(raw: &'a str, line: usize) -> Self {
        let (kind, marker_len) = classify_line(raw);
        let (marker, text) = raw.split_at(marker_len);
        let spans = if kind == BlockKind::Blank {
            Vec::new()
        } else {
            parse_inline(text)
        };
        Self {
            kind,
            line,
            marker,
            text,
            spans,
        }
    }

    /// The number written in an ordered item's marker.
    pub fn ordinal(&self) -> Option<u64> {
        if self.kind != BlockKind::OrderedItem {
            return None;
        }
        self.marker.trim_end().strip_suffix('.')?.parse().ok()
    }
}

/// Classifies a single line (without its newline) and returns the kind together with the
/// byte length of the leading marker.
///
/// Rules are tried in order and the first match wins: `"> "`, a decimal number followed by
/// `.` and one whitespace character, one of `-`, `*`, `•` followed by one whitespace
/// character, whitespace only (including the empty line), and finally paragraph.
pub fn classify_line(line: &str) -> (BlockKind, usize) {
    if line.starts_with("> ") {
        return (BlockKind::Quote, 2);
    }
    if let Some(m) = ORDERED.find(line) {
        return (BlockKind::OrderedItem, m.end());
    }
    if let Some(m) = UNORDERED.find(line) {
        return (BlockKind::UnorderedItem, m.end());
    }
    if line.trim().is_empty() {
        return (BlockKind::Blank, 0);
    }
    (BlockKind::Paragraph, 0)
}

/// Iterator over the blocks of a text, one per `\n`-separated line.
///
/// A `\r` before the newline is dropped. The iterator is `Clone`, so a sequence can be walked
/// again from any point.
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    rest: Option<&'a str>,
    line: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        let rest = self.rest?;
        let (raw, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        self.rest = next;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let block = Block::parse(raw, self.line);
        self.line += 1;
        Some(block)
    }
}

impl FusedIterator for Blocks<'_> {}

/// Splits `input` into classified blocks.
///
/// Empty input yields nothing. Otherwise every line yields a block, so `"a\n"` gives a
/// paragraph followed by a blank.
pub fn blocks(input: &str) -> Blocks<'_> {
    Blocks {
        rest: (!input.is_empty()).then_some(input),
        line: 0,
    }
}

/// Source text plus an opaque style applied underneath everything it renders to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormattedText<'a> {
    source: &'a str,
    class: Style,
}

impl<'a> FormattedText<'a> {
    /// `None` is treated as empty text.
    pub fn new(source: impl Into<Option<&'a str>>) -> Self {
        Self {
            source: source.into().unwrap_or(""),
            class: Style::default(),
        }
    }

    pub fn with_class(mut self, class: Style) -> Self {
        self.class = class;
        self
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn class(&self) -> Style {
        self.class
    }

    pub fn blocks(&self) -> Blocks<'a> {
        blocks(self.source)
    }
}
