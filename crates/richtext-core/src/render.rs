use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

const TAB_COLS: usize = 4;

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes characters into one buffer row, skipping `start_col` cells and stopping after
/// `max_cols` cells. Wide characters that straddle either edge are dropped.
struct RowWriter<'b> {
    buf: &'b mut Buffer,
    x: u16,
    y: u16,
    start_col: usize,
    max_cols: usize,
    col: usize,
    out_cols: usize,
}

impl RowWriter<'_> {
    /// Returns `false` once the row is full.
    fn put(&mut self, ch: char, style: Style) -> bool {
        if ch == '\t' {
            for _ in 0..TAB_COLS {
                if !self.put(' ', style) {
                    return false;
                }
            }
            return true;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            return true;
        }
        if self.col < self.start_col {
            self.col += w;
            return true;
        }
        if self.out_cols + w > self.max_cols {
            return false;
        }

        let mut tmp = [0u8; 4];
        let dx = self.out_cols as u16;
        if let Some(cell) = self.buf.cell_mut((self.x + dx, self.y)) {
            cell.set_style(style);
            cell.set_symbol(ch.encode_utf8(&mut tmp));
        }
        for pad in 1..w {
            if let Some(cell) = self.buf.cell_mut((self.x + dx + pad as u16, self.y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        self.col += w;
        self.out_cols += w;
        true
    }
}

/// Renders `spans` on row `y`, horizontally scrolled by `start_col`.
///
/// Spans with the default style are drawn with `fallback_style`.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let mut w = RowWriter {
        buf,
        x,
        y,
        start_col: start_col as usize,
        max_cols: max_cols as usize,
        col: 0,
        out_cols: 0,
    };
    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            span.style
        };
        for ch in span.content.chars() {
            if !w.put(ch, style) {
                return;
            }
        }
    }
}

pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    render_spans_clipped(
        x,
        y,
        start_col,
        max_cols,
        buf,
        &[Span::styled(input, style)],
        style,
    );
}

/// Maps the cell range `[start_col, end_col)` of `spans` to a byte range of their
/// concatenated content.
///
/// A wide character partially covered at either edge is excluded.
pub fn byte_range_for_cols_in_spans(
    spans: &[Span<'_>],
    start_col: u32,
    end_col: u32,
) -> Option<(usize, usize)> {
    let start_col = start_col as usize;
    let end_col = end_col as usize;
    if start_col >= end_col {
        return None;
    }

    let mut col = 0usize;
    let mut start_b: Option<usize> = None;
    let mut end_b: Option<usize> = None;
    let mut global_b = 0usize;

    'spans: for span in spans {
        let s = span.content.as_ref();
        for (local_b, ch) in s.char_indices() {
            let abs_b = global_b + local_b;
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }

            if start_b.is_none() && col >= start_col {
                start_b = Some(abs_b);
            }
            if col + w > end_col {
                end_b = Some(abs_b);
                break 'spans;
            }
            col += w;
        }
        global_b += s.len();
    }

    let start_b = start_b.unwrap_or(global_b);
    let end_b = end_b.unwrap_or(global_b);
    (start_b < end_b).then_some((start_b, end_b))
}

pub fn slice_spans_by_bytes(spans: &[Span<'_>], start_b: usize, end_b: usize) -> String {
    let mut out = String::new();
    let mut global = 0usize;

    for span in spans {
        let s = span.content.as_ref();
        let span_start = global;
        let span_end = global + s.len();
        global = span_end;

        if end_b <= span_start {
            break;
        }
        if start_b >= span_end {
            continue;
        }

        let lo = start_b.saturating_sub(span_start).min(s.len());
        let hi = end_b.saturating_sub(span_start).min(s.len());
        if lo < hi {
            out.push_str(&s[lo..hi]);
        }
    }

    out
}

/// Patches `overlay` onto the bytes `[start_b, end_b)` of `spans`, splitting spans at the edges.
pub fn patch_style_in_byte_range(
    spans: &[Span<'static>],
    start_b: usize,
    end_b: usize,
    overlay: Style,
) -> Vec<Span<'static>> {
    let mut out: Vec<Span<'static>> = Vec::with_capacity(spans.len() + 2);
    let mut global = 0usize;

    for span in spans {
        let s = span.content.as_ref();
        let span_start = global;
        global += s.len();

        let lo = start_b.saturating_sub(span_start).min(s.len());
        let hi = end_b.saturating_sub(span_start).min(s.len());
        if lo >= hi {
            out.push(span.clone());
            continue;
        }
        if lo > 0 {
            out.push(Span::styled(s[..lo].to_string(), span.style));
        }
        out.push(Span::styled(
            s[lo..hi].to_string(),
            span.style.patch(overlay),
        ));
        if hi < s.len() {
            out.push(Span::styled(s[hi..].to_string(), span.style));
        }
    }

    out
}

pub fn spans_plain(spans: &[Span<'_>]) -> String {
    spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn render_spans_clipped_expands_tabs() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let spans = vec![Span::raw("\t1")];
        render_spans_clipped(0, 0, 0, 6, &mut buf, &spans, Style::default());
        assert!(row(&buf, 6).starts_with("    1"));
    }

    #[test]
    fn render_spans_clipped_scrolls_horizontally() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        let spans = vec![Span::raw("ab"), Span::raw("cdef")];
        render_spans_clipped(0, 0, 1, 3, &mut buf, &spans, Style::default());
        assert_eq!(row(&buf, 3), "bcd");
    }

    #[test]
    fn byte_range_skips_partial_wide_chars() {
        let spans = vec![Span::raw("你好")];
        let slice = |a: u32, b: u32| {
            byte_range_for_cols_in_spans(&spans, a, b)
                .map(|(s, e)| slice_spans_by_bytes(&spans, s, e))
        };
        assert_eq!(slice(0, 2).as_deref(), Some("你"));
        assert_eq!(slice(2, 4).as_deref(), Some("好"));
        assert_eq!(slice(1, 4).as_deref(), Some("好"));
        assert_eq!(slice(1, 3), None);
    }

    #[test]
    fn byte_range_works_across_span_boundaries() {
        let spans = vec![Span::raw("ab"), Span::raw("cd")];
        let (a, b) = byte_range_for_cols_in_spans(&spans, 1, 3).unwrap();
        assert_eq!(slice_spans_by_bytes(&spans, a, b), "bc");
        let (a, b) = byte_range_for_cols_in_spans(&spans, 2, u32::MAX).unwrap();
        assert_eq!(slice_spans_by_bytes(&spans, a, b), "cd");
    }

    #[test]
    fn style_overlay_splits_spans() {
        let spans = vec![Span::raw("abc"), Span::raw("def")];
        let overlay = Style::default().add_modifier(Modifier::REVERSED);
        let out = patch_style_in_byte_range(&spans, 2, 4, overlay);
        let parts: Vec<&str> = out.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["ab", "c", "d", "ef"]);
        assert!(out[1].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!out[3].style.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(spans_plain(&out), "abcdef");
    }

    #[test]
    fn render_scrollbar_does_not_panic() {
        let mut state = ViewportState::default();
        state.set_viewport(10, 5);
        state.set_content(10, 50);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &state, Style::default());
    }
}
