//! Render core: turn formatted text into styled, wrapped terminal lines.
//!
//! [`FormattedDocument`] owns the source; [`FormattedDocument::render`] lays it out for one
//! width and [`Theme`] and returns an owned [`RenderedText`] that callers can cache across
//! frames. [`crate::view::FormattedTextView`] is built on the same layout code.

use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use richtext_core::theme::Theme;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::block::{Block, BlockKind, blocks};
use crate::inline::Emphasis;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatRenderOptions {
    /// Word-wrap lines to the render width. When off, lines are emitted at full length and the
    /// caller scrolls horizontally.
    pub wrap: bool,
    pub quote_prefix: String,
    pub bullet: String,
    /// Number ordered items 1, 2, 3… within each run of consecutive items instead of using the
    /// numbers written in the source.
    pub renumber_ordered: bool,
}

impl Default for FormatRenderOptions {
    fn default() -> Self {
        Self {
            wrap: true,
            quote_prefix: "│ ".to_string(),
            bullet: "• ".to_string(),
            renumber_ordered: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormattedDocument {
    source: String,
}

impl FormattedDocument {
    /// Keeps `source`. Blocks are classified again on every render, nothing else is cached.
    pub fn parse(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn blocks(&self) -> crate::block::Blocks<'_> {
        blocks(&self.source)
    }

    /// Renders the document for a terminal `width`.
    ///
    /// `class` is the base style of the whole document. Theme styles for blocks and emphasis
    /// are patched on top of it.
    pub fn render(
        &self,
        width: u16,
        theme: &Theme,
        options: &FormatRenderOptions,
        class: Style,
    ) -> RenderedText {
        if width == 0 {
            return RenderedText::default();
        }
        let rendered = layout(&self.source, width, theme, options, class);
        RenderedText::from_lines(rendered)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderedText {
    text: Text<'static>,
    content_width: u32,
    content_height: u32,
}

impl RenderedText {
    fn from_lines(lines: Vec<RenderedLine>) -> Self {
        let content_height = lines.len() as u32;
        let content_width = lines.iter().map(RenderedLine::width).max().unwrap_or(0);
        let text = Text::from(
            lines
                .into_iter()
                .map(|l| Line::from(l.spans))
                .collect::<Vec<_>>(),
        );
        Self {
            text,
            content_width,
            content_height,
        }
    }

    pub fn text(&self) -> &Text<'static> {
        &self.text
    }

    pub fn into_text(self) -> Text<'static> {
        self.text
    }

    /// `(content_width, content_height)` in terminal cells.
    pub fn content_size(&self) -> (u32, u32) {
        (self.content_width, self.content_height)
    }

    /// The rendered lines without styles.
    pub fn plain_lines(&self) -> Vec<String> {
        self.text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RenderedLine {
    pub(crate) spans: Vec<Span<'static>>,
    pub(crate) plain: String,
}

impl RenderedLine {
    pub(crate) fn width(&self) -> u32 {
        UnicodeWidthStr::width(self.plain.as_str()) as u32
    }
}

#[derive(Clone, Debug)]
struct Segment {
    text: String,
    style: Style,
}

impl Segment {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub(crate) fn layout(
    source: &str,
    width: u16,
    theme: &Theme,
    options: &FormatRenderOptions,
    class: Style,
) -> Vec<RenderedLine> {
    let width = if options.wrap { width as usize } else { usize::MAX };
    let mut out = Vec::new();
    let mut run = 0u64;
    for block in blocks(source) {
        run = if block.kind == BlockKind::OrderedItem {
            run + 1
        } else {
            0
        };
        if block.kind == BlockKind::Blank {
            out.push(RenderedLine::default());
            continue;
        }
        let (initial, subsequent, base) = prefixes(&block, run, theme, options, class);
        let segments = segments_for(&block, base, theme);
        out.extend(wrap_segments(&initial, &subsequent, segments, width));
    }
    out
}

fn prefixes(
    block: &Block<'_>,
    run: u64,
    theme: &Theme,
    options: &FormatRenderOptions,
    class: Style,
) -> (Vec<Segment>, Vec<Segment>, Style) {
    let text = class.patch(theme.text_primary);
    match block.kind {
        BlockKind::Quote => {
            let marker = vec![Segment::new(
                options.quote_prefix.as_str(),
                class.patch(theme.quote_marker),
            )];
            (marker.clone(), marker, class.patch(theme.quote))
        }
        BlockKind::OrderedItem => {
            let number = if options.renumber_ordered {
                run.to_string()
            } else {
                block.marker.trim_end().trim_end_matches('.').to_string()
            };
            let label = format!("{number}. ");
            hanging(label, class.patch(theme.list_marker), text)
        }
        BlockKind::UnorderedItem => {
            hanging(options.bullet.clone(), class.patch(theme.list_marker), text)
        }
        BlockKind::Blank | BlockKind::Paragraph => (Vec::new(), Vec::new(), text),
    }
}

/// A list label on the first line and the same number of blank columns on the rest.
fn hanging(label: String, label_style: Style, text: Style) -> (Vec<Segment>, Vec<Segment>, Style) {
    let indent = " ".repeat(UnicodeWidthStr::width(label.as_str()));
    (
        vec![Segment::new(label, label_style)],
        vec![Segment::new(indent, text)],
        text,
    )
}

fn segments_for(block: &Block<'_>, base: Style, theme: &Theme) -> Vec<Segment> {
    block
        .spans
        .iter()
        .map(|span| Segment::new(span.text, emphasis_style(base, span.emphasis, theme)))
        .collect()
}

pub(crate) fn emphasis_style(base: Style, emphasis: Emphasis, theme: &Theme) -> Style {
    match emphasis {
        Emphasis::Plain => base,
        Emphasis::Bold => base.patch(theme.bold),
        Emphasis::Italic => base.patch(theme.italic),
        Emphasis::Underline => base.patch(theme.underline),
    }
}

fn wrap_segments(
    initial_prefix: &[Segment],
    subsequent_prefix: &[Segment],
    segments: Vec<Segment>,
    width: usize,
) -> Vec<RenderedLine> {
    let mut out: Vec<RenderedLine> = Vec::new();
    let mut cur: Vec<Segment> = Vec::new();
    let mut prefix = initial_prefix;
    let mut cur_cols = segments_width(prefix);

    let tokens = segments.iter().flat_map(split_segment_ws);
    for tok in tokens {
        if cur.is_empty() && is_all_ws(&tok.text) {
            continue;
        }
        let tok_cols = UnicodeWidthStr::width(tok.text.as_str());
        if cur_cols.saturating_add(tok_cols) <= width {
            cur_cols += tok_cols;
            cur.push(tok);
            continue;
        }
        if is_all_ws(&tok.text) {
            out.push(finish_line(prefix, &mut cur));
            prefix = subsequent_prefix;
            cur_cols = segments_width(prefix);
            continue;
        }
        if !cur.is_empty() {
            out.push(finish_line(prefix, &mut cur));
            prefix = subsequent_prefix;
            cur_cols = segments_width(prefix);
        }

        let mut remaining = tok;
        loop {
            let remaining_cols = UnicodeWidthStr::width(remaining.text.as_str());
            if cur_cols + remaining_cols <= width {
                cur_cols += remaining_cols;
                cur.push(remaining);
                break;
            }
            let max = width.saturating_sub(cur_cols).max(1);
            let (head, tail) = split_to_width(&remaining, max);
            cur.push(head);
            out.push(finish_line(prefix, &mut cur));
            prefix = subsequent_prefix;
            cur_cols = segments_width(prefix);
            if tail.text.is_empty() {
                break;
            }
            remaining = tail;
        }
    }

    if !cur.is_empty() || out.is_empty() {
        out.push(finish_line(prefix, &mut cur));
    }
    out
}

fn finish_line(prefix: &[Segment], cur: &mut Vec<Segment>) -> RenderedLine {
    while cur.last().is_some_and(|s| is_all_ws(&s.text)) {
        cur.pop();
    }
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut plain = String::new();
    for seg in prefix.iter().chain(cur.iter()) {
        if seg.text.is_empty() {
            continue;
        }
        plain.push_str(&seg.text);
        match spans.last_mut() {
            Some(last) if last.style == seg.style => last.content.to_mut().push_str(&seg.text),
            _ => spans.push(Span::styled(seg.text.clone(), seg.style)),
        }
    }
    cur.clear();
    RenderedLine { spans, plain }
}

fn split_segment_ws(seg: &Segment) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut buf = String::new();
    let mut last_was_ws: Option<bool> = None;
    for ch in seg.text.chars() {
        let is_ws = ch.is_whitespace();
        if last_was_ws.is_some_and(|prev| prev != is_ws) {
            out.push(Segment::new(std::mem::take(&mut buf), seg.style));
        }
        buf.push(ch);
        last_was_ws = Some(is_ws);
    }
    if !buf.is_empty() {
        out.push(Segment::new(buf, seg.style));
    }
    out
}

/// Splits off the longest head that fits in `max_cols`. The head always holds at least one
/// character so that a glyph wider than the line still makes progress.
fn split_to_width(seg: &Segment, max_cols: usize) -> (Segment, Segment) {
    let mut cols = 0usize;
    let mut idx = 0usize;
    for (byte_idx, ch) in seg.text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if idx > 0 && cols + w > max_cols {
            break;
        }
        cols += w;
        idx = byte_idx + ch.len_utf8();
    }
    let (a, b) = seg.text.split_at(idx);
    (Segment::new(a, seg.style), Segment::new(b, seg.style))
}

fn segments_width(segs: &[Segment]) -> usize {
    segs.iter()
        .map(|s| UnicodeWidthStr::width(s.text.as_str()))
        .sum()
}

fn is_all_ws(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use ratatui::style::Modifier;

    fn plain(source: &str, width: u16) -> Vec<String> {
        FormattedDocument::parse(source)
            .render(
                width,
                &Theme::monochrome(),
                &FormatRenderOptions::default(),
                Style::default(),
            )
            .plain_lines()
    }

    fn find_span<'a>(text: &'a Text<'static>, content: &str) -> &'a Span<'static> {
        text.lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == content)
            .unwrap_or_else(|| panic!("no span {content:?}"))
    }

    #[test]
    fn renders_each_block_kind() {
        let got = plain("> quoted\n3. third\n- item\n\nplain", 40);
        assert_eq!(got, vec!["│ quoted", "3. third", "• item", "", "plain"]);
    }

    #[test]
    fn emphasis_maps_to_modifiers() {
        let rendered = FormattedDocument::parse("a **b** *c* __d__").render(
            40,
            &Theme::default(),
            &FormatRenderOptions::default(),
            Style::default(),
        );
        let text = rendered.text();
        assert!(
            find_span(text, "b")
                .style
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            find_span(text, "c")
                .style
                .add_modifier
                .contains(Modifier::ITALIC)
        );
        assert!(
            find_span(text, "d")
                .style
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
    }

    #[test]
    fn wraps_with_hanging_indent() {
        let got = plain("- one two three four", 10);
        assert_eq!(got, vec!["• one two", "  three", "  four"]);
        let got = plain("12. alpha beta gamma", 12);
        assert_eq!(got, vec!["12. alpha", "    beta", "    gamma"]);
        let got = plain("> aa bb cc", 6);
        assert_eq!(got, vec!["│ aa", "│ bb", "│ cc"]);
    }

    #[test]
    fn splits_words_longer_than_the_line() {
        assert_eq!(plain("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(plain("你好世界", 3), vec!["你", "好", "世", "界"]);
    }

    #[test]
    fn no_wrap_keeps_full_lines() {
        let options = FormatRenderOptions {
            wrap: false,
            ..Default::default()
        };
        let rendered = FormattedDocument::parse("one two three\n- x").render(
            5,
            &Theme::monochrome(),
            &options,
            Style::default(),
        );
        assert_eq!(rendered.plain_lines(), vec!["one two three", "• x"]);
        assert_eq!(rendered.content_size(), (13, 2));
    }

    #[test]
    fn renumbers_consecutive_ordered_items() {
        let options = FormatRenderOptions {
            renumber_ordered: true,
            ..Default::default()
        };
        let rendered = FormattedDocument::parse("5. a\n9. b\n\n7. c").render(
            20,
            &Theme::monochrome(),
            &options,
            Style::default(),
        );
        assert_eq!(rendered.plain_lines(), vec!["1. a", "2. b", "", "1. c"]);
        assert_eq!(plain("5. a\n9. b", 20), vec!["5. a", "9. b"]);
    }

    #[test]
    fn ordered_label_keeps_source_digits() {
        assert_eq!(plain("007. x\n1.\ty", 20), vec!["007. x", "1. y"]);
        assert_eq!(
            plain("99999999999999999999999. big", 40),
            vec!["99999999999999999999999. big"]
        );
    }

    #[test]
    fn into_text_yields_the_rendered_lines() {
        let rendered = FormattedDocument::parse("> q\n- i").render(
            20,
            &Theme::monochrome(),
            &FormatRenderOptions::default(),
            Style::default(),
        );
        let plain_lines = rendered.plain_lines();
        let text = rendered.into_text();
        assert_eq!(text.lines.len(), 2);
        let first: String = text.lines[0]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(first, plain_lines[0]);
    }

    #[test]
    fn empty_quote_keeps_its_prefix() {
        assert_eq!(plain("> ", 10), vec!["│ "]);
        assert_eq!(plain("- ", 10), vec!["• "]);
    }

    #[test]
    fn class_is_the_base_style() {
        let class = Style::default().bg(Color::Blue);
        let rendered = FormattedDocument::parse("x **y**").render(
            20,
            &Theme::default(),
            &FormatRenderOptions::default(),
            class,
        );
        let y = find_span(rendered.text(), "y");
        assert_eq!(y.style.bg, Some(Color::Blue));
        assert!(y.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn zero_width_and_empty_source() {
        let r = FormattedDocument::parse("text").render(
            0,
            &Theme::default(),
            &FormatRenderOptions::default(),
            Style::default(),
        );
        assert_eq!(r.content_size(), (0, 0));
        assert!(plain("", 10).is_empty());
    }

    #[test]
    fn adjacent_same_style_segments_merge() {
        let rendered = FormattedDocument::parse("one two").render(
            40,
            &Theme::monochrome(),
            &FormatRenderOptions::default(),
            Style::default(),
        );
        assert_eq!(rendered.text().lines[0].spans.len(), 1);
    }
}
