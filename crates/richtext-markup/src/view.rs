use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Text;
use richtext_core::input::InputEvent;
use richtext_core::input::MouseButton;
use richtext_core::input::MouseEvent;
use richtext_core::input::MouseEventKind;
use richtext_core::render;
use richtext_core::scroll::ScrollBindings;
use richtext_core::selection::CellPos;
use richtext_core::selection::SelectionAction;
use richtext_core::selection::SelectionBindings;
use richtext_core::selection::columns_on_line;
use richtext_core::selection::normalize_inclusive;
use richtext_core::theme::Theme;
use richtext_core::viewport::ViewportState;
use richtext_core::viewport::inset_h;
use richtext_core::viewport::split_scrollbar;

use crate::document::FormatRenderOptions;
use crate::document::RenderedLine;
use crate::document::layout;

#[derive(Clone, Debug)]
pub struct FormattedTextViewOptions {
    pub wrap: bool,
    pub show_scrollbar: bool,
    pub padding_left: u16,
    pub padding_right: u16,
    pub quote_prefix: String,
    pub bullet: String,
    pub renumber_ordered: bool,
    /// Base style of the whole text, see [`crate::document::FormattedDocument::render`].
    pub class: Style,
    pub scroll: ScrollBindings,
    pub enable_selection: bool,
    pub selection: SelectionBindings,
}

impl Default for FormattedTextViewOptions {
    fn default() -> Self {
        let render = FormatRenderOptions::default();
        Self {
            wrap: render.wrap,
            show_scrollbar: true,
            padding_left: 0,
            padding_right: 0,
            quote_prefix: render.quote_prefix,
            bullet: render.bullet,
            renumber_ordered: render.renumber_ordered,
            class: Style::default(),
            scroll: ScrollBindings::default(),
            enable_selection: true,
            selection: SelectionBindings::default(),
        }
    }
}

impl From<&FormattedTextViewOptions> for FormatRenderOptions {
    fn from(value: &FormattedTextViewOptions) -> Self {
        Self {
            wrap: value.wrap,
            quote_prefix: value.quote_prefix.clone(),
            bullet: value.bullet.clone(),
            renumber_ordered: value.renumber_ordered,
        }
    }
}

/// A scrollable read-only view of formatted text with mouse selection and copy.
///
/// Layout is cached per width and theme, so calling [`Self::render_ref`] every frame only
/// re-wraps after a resize or a text change.
#[derive(Clone, Debug, Default)]
pub struct FormattedTextView {
    source: String,
    rendered: Vec<RenderedLine>,
    cached: Option<(u16, Theme)>,
    pub state: ViewportState,
    options: FormattedTextViewOptions,
    selection_anchor: Option<CellPos>,
    selection: Option<(CellPos, CellPos)>,
}

impl FormattedTextView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormattedTextViewOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &FormattedTextViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FormattedTextViewOptions) {
        self.options = options;
        self.invalidate();
    }

    /// Replaces the text. Selection is cleared and the scroll position kept (clamped on the
    /// next layout).
    pub fn set_text(&mut self, input: &str) {
        if self.source == input {
            return;
        }
        self.source = input.to_string();
        self.clear_selection();
        self.invalidate();
    }

    pub fn text(&self) -> &str {
        &self.source
    }

    /// Updates viewport size for `area`, minus the scrollbar column and padding.
    pub fn set_viewport(&mut self, area: Rect) {
        let inner = self.inner_area(area);
        self.state.set_viewport(inner.width, inner.height);
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        self.state.scroll_y_by(delta);
    }

    pub fn scroll_x_by(&mut self, delta: i32) {
        self.state.scroll_x_by(delta);
    }

    pub fn handle_event_action(&mut self, event: InputEvent) -> SelectionAction {
        match event {
            InputEvent::Paste(_) => SelectionAction::None,
            InputEvent::Mouse(m) => match m.kind {
                MouseEventKind::ScrollUp => {
                    self.state.scroll_y_by(-self.options.scroll.wheel_step);
                    SelectionAction::Redraw
                }
                MouseEventKind::ScrollDown => {
                    self.state.scroll_y_by(self.options.scroll.wheel_step);
                    SelectionAction::Redraw
                }
                _ => SelectionAction::None,
            },
            InputEvent::Key(key) => {
                if self.options.enable_selection && self.options.selection.is_clear(&key) {
                    self.clear_selection();
                    return SelectionAction::Redraw;
                }
                if self.options.enable_selection && self.options.selection.is_copy(&key) {
                    return self
                        .selected_text()
                        .map(SelectionAction::CopyRequested)
                        .unwrap_or(SelectionAction::None);
                }
                let Some(action) = self.options.scroll.action_for(&key) else {
                    return SelectionAction::None;
                };
                self.options.scroll.apply(&mut self.state, action);
                SelectionAction::Redraw
            }
        }
    }

    /// Like [`Self::handle_event_action`], but routes mouse events through
    /// [`Self::handle_mouse_event`] for `area`.
    pub fn handle_event_action_in_area(
        &mut self,
        area: Rect,
        event: InputEvent,
    ) -> SelectionAction {
        match event {
            InputEvent::Mouse(m) => {
                if self.handle_mouse_event(area, m) {
                    SelectionAction::Redraw
                } else {
                    SelectionAction::None
                }
            }
            other => self.handle_event_action(other),
        }
    }

    /// Handles wheel scrolling and left-button drag selection. Returns whether anything
    /// changed.
    pub fn handle_mouse_event(&mut self, area: Rect, event: MouseEvent) -> bool {
        if area.width == 0 || area.height == 0 {
            return false;
        }
        self.set_viewport(area);

        match event.kind {
            MouseEventKind::ScrollUp => {
                self.state.scroll_y_by(-self.options.scroll.wheel_step);
                return true;
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_y_by(self.options.scroll.wheel_step);
                return true;
            }
            _ => {}
        }

        if !self.options.enable_selection {
            return false;
        }

        let inner = self.inner_area(area);
        if inner.width == 0 || inner.height == 0 {
            return false;
        }
        let theme = self.cached_theme();
        self.ensure_layout(inner.width, &theme);

        let x_end = inner.x + inner.width - 1;
        let y_end = inner.y + inner.height - 1;
        let inside =
            event.x >= inner.x && event.x <= x_end && event.y >= inner.y && event.y <= y_end;

        let (x, y) = match event.kind {
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Up(MouseButton::Left) => {
                if self.selection_anchor.is_none() {
                    return false;
                }
                (event.x.clamp(inner.x, x_end), event.y.clamp(inner.y, y_end))
            }
            _ => {
                if !inside {
                    return false;
                }
                (event.x, event.y)
            }
        };

        let line = self
            .state
            .y
            .saturating_add((y - inner.y) as u32)
            .min(self.rendered.len().saturating_sub(1) as u32) as usize;
        let col = self.state.x.saturating_add((x - inner.x) as u32);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.selection_anchor = Some((line, col));
                self.selection = Some(((line, col), (line, col)));
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(anchor) = self.selection_anchor else {
                    return false;
                };
                self.selection = Some((anchor, (line, col)));
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(anchor) = self.selection_anchor.take() else {
                    return false;
                };
                self.selection = Some((anchor, (line, col)));
                true
            }
            _ => false,
        }
    }

    /// Sets the selection directly, in rendered `(line, column)` cells, both ends inclusive.
    pub fn set_selection(&mut self, from: CellPos, to: CellPos) {
        self.selection_anchor = None;
        self.selection = Some((from, to));
    }

    pub fn clear_selection(&mut self) {
        self.selection_anchor = None;
        self.selection = None;
    }

    /// The selected rendered text, one `\n` between lines. Markers are not part of it since
    /// they never reach the rendered output.
    pub fn selected_text(&mut self) -> Option<String> {
        let (a, b) = self.selection?;
        let (start, end) = normalize_inclusive(a, b);

        let theme = self.cached_theme();
        let width = self.cached.as_ref().map(|(w, _)| *w).unwrap_or(80);
        self.ensure_layout(width, &theme);

        let mut out = String::new();
        for idx in start.0..=end.0 {
            let line = self.rendered.get(idx)?;
            if idx > start.0 {
                out.push('\n');
            }
            let Some((from, to)) = columns_on_line(idx, start, end) else {
                continue;
            };
            if let Some((bs, be)) = render::byte_range_for_cols_in_spans(&line.spans, from, to) {
                out.push_str(&render::slice_spans_by_bytes(&line.spans, bs, be));
            }
        }
        Some(out)
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (content_area, scrollbar) = split_scrollbar(area, self.options.show_scrollbar);
        self.set_viewport(area);
        let inner = self.inner_area(area);
        self.ensure_layout(inner.width, theme);

        let base = self.options.class.patch(theme.text_primary);
        let selection = self
            .selection
            .filter(|_| self.options.enable_selection)
            .map(|(a, b)| normalize_inclusive(a, b));

        for row in 0..content_area.height {
            let y = content_area.y + row;
            buf.set_style(Rect::new(content_area.x, y, content_area.width, 1), base);
            let idx = (self.state.y as usize).saturating_add(row as usize);
            let Some(line) = self.rendered.get(idx) else {
                continue;
            };

            let highlighted = selection
                .and_then(|(start, end)| columns_on_line(idx, start, end))
                .and_then(|(from, to)| render::byte_range_for_cols_in_spans(&line.spans, from, to))
                .map(|(bs, be)| {
                    render::patch_style_in_byte_range(&line.spans, bs, be, theme.selection)
                });
            let spans = highlighted.as_deref().unwrap_or(line.spans.as_slice());
            render::render_spans_clipped(
                inner.x,
                y,
                self.state.x,
                inner.width,
                buf,
                spans,
                base,
            );
        }

        if let Some(sb) = scrollbar {
            render::render_scrollbar(sb, buf, &self.state, theme.text_muted);
        }
    }

    /// All lines laid out for `width` (padding included), e.g. for printing outside a
    /// viewport.
    pub fn lines_for_width(&mut self, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        let width = width
            .saturating_sub(self.options.padding_left)
            .saturating_sub(self.options.padding_right);
        self.ensure_layout(width, theme);
        self.rendered
            .iter()
            .map(|l| Line::from(l.spans.clone()))
            .collect()
    }

    pub fn as_text(&mut self, theme: &Theme) -> Text<'static> {
        let width = self.cached.as_ref().map(|(w, _)| *w).unwrap_or(80);
        self.ensure_layout(width, theme);
        Text::from(
            self.rendered
                .iter()
                .map(|l| Line::from(l.spans.clone()))
                .collect::<Vec<_>>(),
        )
    }

    fn inner_area(&self, area: Rect) -> Rect {
        let (content_area, _) = split_scrollbar(area, self.options.show_scrollbar);
        inset_h(
            content_area,
            self.options.padding_left,
            self.options.padding_right,
        )
    }

    fn cached_theme(&self) -> Theme {
        self.cached
            .as_ref()
            .map(|(_, theme)| theme.clone())
            .unwrap_or_default()
    }

    fn invalidate(&mut self) {
        self.cached = None;
        self.rendered.clear();
    }

    fn ensure_layout(&mut self, width: u16, theme: &Theme) {
        if let Some((w, t)) = &self.cached
            && *w == width
            && t == theme
        {
            return;
        }
        log::debug!(
            "relayout {} bytes at width {width}",
            self.source.len()
        );
        self.cached = Some((width, theme.clone()));
        self.rendered = if width == 0 {
            Vec::new()
        } else {
            layout(
                &self.source,
                width,
                theme,
                &FormatRenderOptions::from(&self.options),
                self.options.class,
            )
        };
        let content_h = self.rendered.len() as u32;
        let content_w = self
            .rendered
            .iter()
            .map(RenderedLine::width)
            .max()
            .unwrap_or(0);
        self.state.set_content(content_w, content_h);
    }
}
