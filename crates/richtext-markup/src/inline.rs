//! Inline emphasis parsing.
//!
//! A line is scanned independently for each marker family (`**bold**`, `*italic*`,
//! `__underline__`). The matches are then merged into one left-to-right sequence: italic
//! matches nested in a bold match are dropped, and of two overlapping matches the one that
//! starts first wins. Whatever is left between matches is plain text.
//!
//! Kept matches are not parsed recursively, so `**a *b* c**` is one bold span whose text
//! still contains the asterisks.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));
static UNDERLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid underline pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Emphasis {
    Plain,
    Bold,
    Italic,
    Underline,
}

impl Emphasis {
    /// The delimiter written on both sides of the text, empty for plain text.
    pub fn marker(self) -> &'static str {
        match self {
            Emphasis::Plain => "",
            Emphasis::Bold => "**",
            Emphasis::Italic => "*",
            Emphasis::Underline => "__",
        }
    }

    pub fn is_plain(self) -> bool {
        self == Emphasis::Plain
    }
}

/// A run of text with one emphasis kind.
///
/// `text` is the inner text with markers stripped and borrows from the parsed line. `source`
/// is the byte range of the line the span covers, markers included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InlineSpan<'a> {
    pub emphasis: Emphasis,
    pub text: &'a str,
    pub source: Range<usize>,
}

impl<'a> InlineSpan<'a> {
    fn plain(line: &'a str, range: Range<usize>) -> Self {
        Self {
            emphasis: Emphasis::Plain,
            text: &line[range.clone()],
            source: range,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct MarkerMatch {
    emphasis: Emphasis,
    start: usize,
    len: usize,
    inner: Range<usize>,
}

impl MarkerMatch {
    fn end(&self) -> usize {
        self.start + self.len
    }

    fn contains(&self, other: &MarkerMatch) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }
}

/// Parses one line into emphasis spans.
///
/// The spans are ordered, never overlap and their `source` ranges tile the line exactly. An
/// empty line yields no spans; a line without (valid) markers yields one plain span.
/// Unterminated or empty marker pairs (`**open`, `****`) stay as literal text.
pub fn parse_inline(line: &str) -> Vec<InlineSpan<'_>> {
    if line.is_empty() {
        return Vec::new();
    }

    let kept = resolve(collect_matches(line));

    let mut spans = Vec::with_capacity(kept.len() * 2 + 1);
    let mut pos = 0usize;
    for m in kept {
        if m.start > pos {
            spans.push(InlineSpan::plain(line, pos..m.start));
        }
        spans.push(InlineSpan {
            emphasis: m.emphasis,
            text: &line[m.inner.clone()],
            source: m.start..m.end(),
        });
        pos = m.end();
    }
    if pos < line.len() {
        spans.push(InlineSpan::plain(line, pos..line.len()));
    }
    spans
}

/// Writes `spans` back out with their markers. For spans produced by [`parse_inline`] this
/// returns the original line.
pub fn reconstruct(spans: &[InlineSpan<'_>]) -> String {
    let mut out = String::new();
    for span in spans {
        let marker = span.emphasis.marker();
        out.push_str(marker);
        out.push_str(span.text);
        out.push_str(marker);
    }
    out
}

/// The visible text of a line: the concatenated span texts, markers removed.
pub fn plain_text(line: &str) -> String {
    parse_inline(line).iter().map(|s| s.text).collect()
}

fn collect_matches(line: &str) -> Vec<MarkerMatch> {
    let mut matches = regex_matches(&BOLD, Emphasis::Bold, line);
    matches.extend(italic_matches(line));
    matches.extend(regex_matches(&UNDERLINE, Emphasis::Underline, line));
    matches
}

fn regex_matches(re: &Regex, emphasis: Emphasis, line: &str) -> Vec<MarkerMatch> {
    re.captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(MarkerMatch {
                emphasis,
                start: whole.start(),
                len: whole.len(),
                inner: inner.range(),
            })
        })
        .collect()
}

/// Single-asterisk emphasis: an opening `*` and a closing `*` that are neither preceded nor
/// followed by another `*`, around at least one character, shortest match first.
///
/// `regex` has no look-around, so this is a byte scanner. `*` is ASCII and never appears
/// inside a multi-byte UTF-8 sequence, so byte offsets are always char boundaries.
fn italic_matches(line: &str) -> Vec<MarkerMatch> {
    let b = line.as_bytes();
    let star = |i: Option<usize>| i.and_then(|i| b.get(i)) == Some(&b'*');
    let lone_star = |i: usize| b[i] == b'*' && !star(i.checked_sub(1)) && !star(Some(i + 1));

    let mut out = Vec::new();
    let mut pos = 0usize;
    while pos < b.len() {
        if !lone_star(pos) {
            pos += 1;
            continue;
        }

        let mut close = None;
        for q in pos + 1..b.len() {
            if b[q] == b'\n' {
                break;
            }
            if q > pos + 1 && lone_star(q) {
                close = Some(q);
                break;
            }
        }

        match close {
            Some(q) => {
                out.push(MarkerMatch {
                    emphasis: Emphasis::Italic,
                    start: pos,
                    len: q + 1 - pos,
                    inner: pos + 1..q,
                });
                pos = q + 1;
            }
            None => pos += 1,
        }
    }
    out
}

fn resolve(mut matches: Vec<MarkerMatch>) -> Vec<MarkerMatch> {
    let bold: Vec<MarkerMatch> = matches
        .iter()
        .filter(|m| m.emphasis == Emphasis::Bold)
        .cloned()
        .collect();
    matches.retain(|m| {
        let nested = m.emphasis == Emphasis::Italic && bold.iter().any(|b| b.contains(m));
        if nested {
            log::trace!("dropping italic at {}..{} nested in bold", m.start, m.end());
        }
        !nested
    });

    matches.sort_by_key(|m| m.start);

    let mut kept: Vec<MarkerMatch> = Vec::with_capacity(matches.len());
    for m in matches {
        if let Some(prev) = kept.last()
            && m.start < prev.end()
        {
            log::trace!(
                "dropping {:?} at {}..{} overlapping {:?} at {}..{}",
                m.emphasis,
                m.start,
                m.end(),
                prev.emphasis,
                prev.start,
                prev.end()
            );
            continue;
        }
        kept.push(m);
    }
    kept
}
