use crate::keymap::Binding;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug)]
pub struct ToolbarOptions {
    pub style: Style,
    pub key_style: Style,
    pub active_style: Style,
    pub separator: String,
    pub space: String,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default().add_modifier(Modifier::BOLD),
            active_style: Style::default().add_modifier(Modifier::REVERSED),
            separator: " │ ".to_string(),
            space: " ".to_string(),
        }
    }
}

/// A one-line strip of bindings, each shown as `key desc`.
///
/// Items can be flagged active (drawn with `active_style`) and hit-tested by column so a mouse
/// click can be turned back into the binding's action.
#[derive(Clone, Debug, Default)]
pub struct Toolbar {
    bindings: Vec<Binding>,
    active: Vec<bool>,
    options: ToolbarOptions,
}

impl Toolbar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self::with_options(bindings, ToolbarOptions::default())
    }

    pub fn with_options(bindings: Vec<Binding>, options: ToolbarOptions) -> Self {
        let active = vec![false; bindings.len()];
        Self {
            bindings,
            active,
            options,
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn set_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.active.get_mut(index) {
            *slot = active;
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Index of the item drawn at column `x` (relative to the toolbar's left edge).
    pub fn item_at(&self, x: u16) -> Option<usize> {
        let x = x as usize;
        let sep = UnicodeWidthStr::width(self.options.separator.as_str());
        let space = UnicodeWidthStr::width(self.options.space.as_str());
        let mut col = 0usize;
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                col += sep;
            }
            let w = UnicodeWidthStr::width(b.label_key.as_str())
                + space
                + UnicodeWidthStr::width(b.label_desc.as_str());
            if x >= col && x < col + w {
                return Some(i);
            }
            col += w;
        }
        None
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let spans = self.to_spans();
        buf.set_style(area, self.options.style);
        render::render_spans_clipped(
            area.x,
            area.y,
            0,
            area.width,
            buf,
            &spans,
            self.options.style,
        );
    }

    fn to_spans(&self) -> Vec<Span<'static>> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.options.separator.clone(),
                    self.options.style,
                ));
            }
            let (key_style, style) = if self.is_active(i) {
                (
                    self.options.key_style.patch(self.options.active_style),
                    self.options.style.patch(self.options.active_style),
                )
            } else {
                (self.options.key_style, self.options.style)
            };
            spans.push(Span::styled(b.label_key.clone(), key_style));
            spans.push(Span::styled(self.options.space.clone(), style));
            spans.push(Span::styled(b.label_desc.clone(), style));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;

    fn toolbar() -> Toolbar {
        Toolbar::new(vec![
            Binding::new("B", "bold", vec![keymap::key_alt('b')]),
            Binding::new("I", "italic", vec![keymap::key_alt('i')]),
        ])
    }

    #[test]
    fn renders_narrow_width() {
        let tb = toolbar();
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        tb.render_ref(Rect::new(0, 0, 3, 1), &mut buf);
    }

    #[test]
    fn item_at_maps_columns_to_items() {
        // "B bold │ I italic"
        let tb = toolbar();
        assert_eq!(tb.item_at(0), Some(0));
        assert_eq!(tb.item_at(5), Some(0));
        assert_eq!(tb.item_at(6), None);
        assert_eq!(tb.item_at(9), Some(1));
        assert_eq!(tb.item_at(16), Some(1));
        assert_eq!(tb.item_at(17), None);
    }

    #[test]
    fn active_items_use_active_style() {
        let mut tb = toolbar();
        tb.set_active(1, true);
        let spans = tb.to_spans();
        assert!(!spans[0].style.add_modifier.contains(Modifier::REVERSED));
        let italic = spans.iter().find(|s| s.content == "italic").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::REVERSED));
    }
}
