use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::viewport;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterBehavior {
    Newline,
    Submit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitRule {
    Never,
    #[default]
    EnterSubmitsShiftNewline,
    ShiftEnterSubmitsEnterNewline,
}

#[derive(Clone, Debug)]
pub struct TextAreaOptions {
    pub show_scrollbar: bool,
    pub style: Style,
    pub selection_style: Style,
    pub submit_rule: SubmitRule,
}

impl Default for TextAreaOptions {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            style: Style::default(),
            selection_style: Style::default().add_modifier(Modifier::REVERSED),
            submit_rule: SubmitRule::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    pub row: usize,
    pub col: usize, // char index within line
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextAreaAction {
    None,
    Changed,
    Submitted(String),
}

/// Multi-line text input.
///
/// Besides the usual editing keys it keeps an optional selection (extended with
/// `Shift`+movement) which [`TextArea::surround_selection`] and the line accessors operate on.
#[derive(Clone, Debug)]
pub struct TextArea {
    lines: Vec<String>,
    cursor: Cursor,
    anchor: Option<Cursor>,
    preferred_x: Option<usize>, // display columns
    pub state: ViewportState,
    options: TextAreaOptions,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            anchor: None,
            preferred_x: None,
            state: ViewportState::default(),
            options: TextAreaOptions::default(),
        }
    }

    pub fn with_options(options: TextAreaOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = normalize_newlines(&text.into());
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor = Cursor::default();
        self.anchor = None;
        self.preferred_x = None;
        self.recompute_content_size();
        self.state.clamp();
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Replaces one line, keeping the cursor on the same row and clamping its column.
    pub fn replace_line(&mut self, row: usize, text: impl Into<String>) {
        let text: String = text.into();
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        *line = text.replace(['\r', '\n'], " ");
        let len = line.chars().count();
        if self.cursor.row == row {
            self.cursor.col = self.cursor.col.min(len);
        }
        if let Some(anchor) = self.anchor.as_mut()
            && anchor.row == row
        {
            anchor.col = anchor.col.min(len);
        }
        self.preferred_x = None;
        self.recompute_content_size();
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = self.clamp_cursor(cursor);
        self.anchor = None;
        self.preferred_x = None;
        self.ensure_cursor_visible();
    }

    /// Selects from `anchor` to `cursor` (the cursor ends up at `cursor`).
    pub fn set_selection(&mut self, anchor: Cursor, cursor: Cursor) {
        self.anchor = Some(self.clamp_cursor(anchor));
        self.cursor = self.clamp_cursor(cursor);
        self.preferred_x = None;
        self.ensure_cursor_visible();
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Returns the selection as an ordered `(start, end)` pair, end exclusive.
    ///
    /// An empty selection (anchor at the cursor) is reported as `None`.
    pub fn selection(&self) -> Option<(Cursor, Cursor)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        let mut out = String::new();
        for row in start.row..=end.row {
            let line = &self.lines[row];
            let from = if row == start.row { start.col } else { 0 };
            let to = if row == end.row {
                end.col
            } else {
                line.chars().count()
            };
            if row > start.row {
                out.push('\n');
            }
            out.push_str(char_slice(line, from, to));
        }
        Some(out)
    }

    /// Rows touched by the selection, or the cursor row.
    pub fn selected_rows(&self) -> std::ops::RangeInclusive<usize> {
        match self.selection() {
            Some((start, end)) => start.row..=end.row,
            None => self.cursor.row..=self.cursor.row,
        }
    }

    /// Wraps the selection in `open`/`close`.
    ///
    /// - No selection: inserts `open` + `close` and places the cursor between them.
    /// - Single-line selection already wrapped (inside or just outside): removes the markers,
    ///   unless they belong to a longer run of the same char (`*` against `**bold**`).
    /// - Multi-line selection: wraps the selected part of every line separately, skipping
    ///   lines whose selected part is blank.
    ///
    /// Returns `true` when the text changed.
    pub fn surround_selection(&mut self, open: &str, close: &str) -> bool {
        let open_n = open.chars().count();
        let close_n = close.chars().count();

        let Some((start, end)) = self.selection() else {
            let row = self.cursor.row;
            let col = self.cursor.col;
            let line = &mut self.lines[row];
            let at = byte_index_from_char_index(line, col);
            line.insert_str(at, &format!("{open}{close}"));
            self.cursor.col = col + open_n;
            self.anchor = None;
            self.after_edit();
            return true;
        };

        if start.row == end.row {
            let row = start.row;
            let line = self.lines[row].clone();
            let (c0, c1) = (start.col, end.col);
            let before = c0.checked_sub(open_n).map(|b| char_slice(&line, b, c0));
            let after = char_slice(&line, c1, c1 + close_n);
            let selected = char_slice(&line, c0, c1);

            let wrapped_outside = before == Some(open)
                && after == close
                && !continues_run(&line, (c0 - open_n).checked_sub(1), open.chars().next())
                && !continues_run(&line, Some(c1 + close_n), close.chars().last());
            let wrapped_inside = selected.chars().count() > open_n + close_n
                && selected.starts_with(open)
                && selected.ends_with(close)
                && !continues_run(selected, Some(open_n), open.chars().last())
                && !continues_run(
                    selected,
                    (selected.chars().count() - close_n).checked_sub(1),
                    close.chars().next(),
                );

            if wrapped_outside {
                let new_line = format!(
                    "{}{}{}",
                    char_slice(&line, 0, c0 - open_n),
                    selected,
                    char_slice(&line, c1 + close_n, usize::MAX)
                );
                self.lines[row] = new_line;
                self.anchor = Some(Cursor::new(row, c0 - open_n));
                self.cursor = Cursor::new(row, c1 - open_n);
            } else if wrapped_inside {
                let inner = &selected[open.len()..selected.len() - close.len()];
                let new_line = format!(
                    "{}{}{}",
                    char_slice(&line, 0, c0),
                    inner,
                    char_slice(&line, c1, usize::MAX)
                );
                self.lines[row] = new_line;
                self.anchor = Some(Cursor::new(row, c0));
                self.cursor = Cursor::new(row, c1 - open_n - close_n);
            } else {
                let new_line = format!(
                    "{}{open}{selected}{close}{}",
                    char_slice(&line, 0, c0),
                    char_slice(&line, c1, usize::MAX)
                );
                self.lines[row] = new_line;
                self.anchor = Some(Cursor::new(row, c0 + open_n));
                self.cursor = Cursor::new(row, c1 + open_n);
            }
            self.after_edit();
            return true;
        }

        let mut changed = false;
        let mut end_col = end.col;
        for row in start.row..=end.row {
            let line = self.lines[row].clone();
            let len = line.chars().count();
            let from = if row == start.row { start.col } else { 0 };
            let to = if row == end.row { end.col } else { len };
            let selected = char_slice(&line, from, to);
            if selected.trim().is_empty() {
                continue;
            }
            self.lines[row] = format!(
                "{}{open}{selected}{close}{}",
                char_slice(&line, 0, from),
                char_slice(&line, to, usize::MAX)
            );
            if row == end.row {
                end_col += open_n + close_n;
            }
            changed = true;
        }
        if changed {
            self.anchor = Some(start);
            self.cursor = Cursor::new(end.row, end_col);
            self.after_edit();
        }
        changed
    }

    pub fn set_viewport(&mut self, area: Rect) {
        let (content_area, _) = viewport::split_scrollbar(area, self.options.show_scrollbar);
        self.state
            .set_viewport(content_area.width, content_area.height);
        self.recompute_content_size();
        self.ensure_cursor_visible();
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let (content_area, _) = viewport::split_scrollbar(area, self.options.show_scrollbar);
        let (cx, cy) = self.cursor_screen_pos();
        let x = cx.checked_sub(self.state.x)?;
        let y = cy.checked_sub(self.state.y)?;
        if x >= content_area.width as u32 || y >= content_area.height as u32 {
            return None;
        }
        Some((content_area.x + x as u16, content_area.y + y as u16))
    }

    pub fn input(&mut self, event: InputEvent) -> TextAreaAction {
        match event {
            InputEvent::Paste(s) => {
                self.delete_selection();
                self.insert_str(&s);
                self.after_edit();
                TextAreaAction::Changed
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => TextAreaAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.set_viewport(area);
        let (content_area, scrollbar) =
            viewport::split_scrollbar(area, self.options.show_scrollbar);
        let selection = self.selection();

        for row in 0..content_area.height {
            let y = content_area.y + row;
            let idx = (self.state.y as usize).saturating_add(row as usize);
            buf.set_style(
                Rect::new(content_area.x, y, content_area.width, 1),
                self.options.style,
            );
            let Some(line) = self.lines.get(idx) else {
                continue;
            };
            let spans = self.line_spans(idx, line, selection);
            render::render_spans_clipped(
                content_area.x,
                y,
                self.state.x,
                content_area.width,
                buf,
                &spans,
                self.options.style,
            );
        }

        if let Some(bar) = scrollbar {
            render::render_scrollbar(bar, buf, &self.state, self.options.style);
        }
    }

    fn line_spans(
        &self,
        idx: usize,
        line: &str,
        selection: Option<(Cursor, Cursor)>,
    ) -> Vec<Span<'static>> {
        let plain = vec![Span::styled(line.to_string(), self.options.style)];
        let Some((start, end)) = selection else {
            return plain;
        };
        if idx < start.row || idx > end.row {
            return plain;
        }
        let from = if idx == start.row { start.col } else { 0 };
        let to = if idx == end.row { end.col } else { usize::MAX };
        let from_b = byte_index_from_char_index(line, from);
        let to_b = byte_index_from_char_index(line, to);
        render::patch_style_in_byte_range(&plain, from_b, to_b, self.options.selection_style)
    }

    fn handle_key(&mut self, key: KeyEvent) -> TextAreaAction {
        let extend = key.modifiers.shift;
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.ctrl || key.modifiers.alt {
                    return TextAreaAction::None;
                }
                self.delete_selection();
                self.insert_char(c);
                self.after_edit();
                TextAreaAction::Changed
            }
            KeyCode::Enter => match self.enter_behavior(&key) {
                EnterBehavior::Newline => {
                    self.delete_selection();
                    self.insert_newline();
                    self.after_edit();
                    TextAreaAction::Changed
                }
                EnterBehavior::Submit => {
                    let submitted = self.text();
                    self.set_text("");
                    TextAreaAction::Submitted(submitted)
                }
            },
            KeyCode::Backspace => {
                if self.delete_selection() || self.backspace() {
                    self.after_edit();
                    TextAreaAction::Changed
                } else {
                    TextAreaAction::None
                }
            }
            KeyCode::Delete => {
                if self.delete_selection() || self.delete() {
                    self.after_edit();
                    TextAreaAction::Changed
                } else {
                    TextAreaAction::None
                }
            }
            KeyCode::Left => self.move_with(extend, Self::move_left),
            KeyCode::Right => self.move_with(extend, Self::move_right),
            KeyCode::Up => self.move_with(extend, Self::move_up),
            KeyCode::Down => self.move_with(extend, Self::move_down),
            KeyCode::Home => self.move_with(extend, |ta| {
                ta.cursor.col = 0;
                ta.preferred_x = Some(0);
            }),
            KeyCode::End => self.move_with(extend, |ta| {
                ta.cursor.col = ta.current_line_char_len();
                ta.preferred_x = Some(ta.cursor_display_x());
            }),
            KeyCode::PageDown => {
                self.state.page_down();
                TextAreaAction::None
            }
            KeyCode::PageUp => {
                self.state.page_up();
                TextAreaAction::None
            }
            KeyCode::Esc => {
                self.anchor = None;
                TextAreaAction::None
            }
            KeyCode::Tab | KeyCode::BackTab => TextAreaAction::None,
        }
    }

    fn move_with(&mut self, extend: bool, f: impl FnOnce(&mut Self)) -> TextAreaAction {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        f(self);
        self.ensure_cursor_visible();
        TextAreaAction::None
    }

    fn enter_behavior(&self, key: &KeyEvent) -> EnterBehavior {
        match self.options.submit_rule {
            SubmitRule::Never => EnterBehavior::Newline,
            SubmitRule::EnterSubmitsShiftNewline if key.modifiers.shift => EnterBehavior::Newline,
            SubmitRule::EnterSubmitsShiftNewline => EnterBehavior::Submit,
            SubmitRule::ShiftEnterSubmitsEnterNewline if key.modifiers.shift => {
                EnterBehavior::Submit
            }
            SubmitRule::ShiftEnterSubmitsEnterNewline => EnterBehavior::Newline,
        }
    }

    fn after_edit(&mut self) {
        self.preferred_x = None;
        self.recompute_content_size();
        self.ensure_cursor_visible();
    }

    fn clamp_cursor(&self, cursor: Cursor) -> Cursor {
        let row = cursor.row.min(self.lines.len() - 1);
        let col = cursor.col.min(self.lines[row].chars().count());
        Cursor { row, col }
    }

    fn recompute_content_size(&mut self) {
        let content_h = self.lines.len() as u32;
        let content_w = self
            .lines
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()) as u32)
            .max()
            .unwrap_or(0);
        // One extra column so the cursor fits after the longest line.
        self.state.set_content(content_w + 1, content_h);
    }

    fn ensure_cursor_visible(&mut self) {
        let (cx, cy) = self.cursor_screen_pos();
        self.state.reveal(cx, cy);
    }

    fn cursor_screen_pos(&self) -> (u32, u32) {
        let y = self.cursor.row.min(self.lines.len().saturating_sub(1)) as u32;
        (self.cursor_display_x() as u32, y)
    }

    fn cursor_display_x(&self) -> usize {
        self.current_line()
            .chars()
            .take(self.cursor.col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    fn current_line(&self) -> &str {
        self.line(self.cursor.row).unwrap_or("")
    }

    fn current_line_char_len(&self) -> usize {
        self.current_line().chars().count()
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.current_line_char_len();
        }
        self.preferred_x = Some(self.cursor_display_x());
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.current_line_char_len() {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
        self.preferred_x = Some(self.cursor_display_x());
    }

    fn move_up(&mut self) {
        if self.cursor.row == 0 {
            return;
        }
        let target_x = self.preferred_x.unwrap_or_else(|| self.cursor_display_x());
        self.cursor.row -= 1;
        self.cursor.col = col_from_display_x(self.current_line(), target_x);
        self.preferred_x = Some(target_x);
    }

    fn move_down(&mut self) {
        if self.cursor.row + 1 >= self.lines.len() {
            return;
        }
        let target_x = self.preferred_x.unwrap_or_else(|| self.cursor_display_x());
        self.cursor.row += 1;
        self.cursor.col = col_from_display_x(self.current_line(), target_x);
        self.preferred_x = Some(target_x);
    }

    /// Removes the selected text, leaving the cursor at its start.
    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        let head = char_slice(&self.lines[start.row], 0, start.col).to_string();
        let tail = char_slice(&self.lines[end.row], end.col, usize::MAX).to_string();
        self.lines.drain(start.row..=end.row);
        self.lines.insert(start.row, format!("{head}{tail}"));
        self.cursor = start;
        self.anchor = None;
        true
    }

    fn insert_char(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor.row];
        let byte_idx = byte_index_from_char_index(line, self.cursor.col);
        line.insert(byte_idx, ch);
        self.cursor.col += 1;
    }

    fn insert_newline(&mut self) {
        let row = self.cursor.row;
        let line = &mut self.lines[row];
        let byte_idx = byte_index_from_char_index(line, self.cursor.col);
        let tail = line.split_off(byte_idx);
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor::new(row + 1, 0);
    }

    fn insert_str(&mut self, s: &str) {
        let s = normalize_newlines(s);
        let mut parts = s.split('\n');
        let first = parts.next().unwrap_or("");

        let row = self.cursor.row;
        let byte_idx = byte_index_from_char_index(&self.lines[row], self.cursor.col);
        let tail = self.lines[row].split_off(byte_idx);
        self.lines[row].push_str(first);
        self.cursor.col += first.chars().count();

        for part in parts {
            self.cursor.row += 1;
            self.lines.insert(self.cursor.row, part.to_string());
            self.cursor.col = part.chars().count();
        }
        self.lines[self.cursor.row].push_str(&tail);
    }

    fn backspace(&mut self) -> bool {
        if self.cursor.col > 0 {
            let line = &mut self.lines[self.cursor.row];
            let start = byte_index_from_char_index(line, self.cursor.col - 1);
            let end = byte_index_from_char_index(line, self.cursor.col);
            line.replace_range(start..end, "");
            self.cursor.col -= 1;
            return true;
        }
        if self.cursor.row > 0 {
            let cur = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            let prev = &mut self.lines[self.cursor.row];
            self.cursor.col = prev.chars().count();
            prev.push_str(&cur);
            return true;
        }
        false
    }

    fn delete(&mut self) -> bool {
        let row = self.cursor.row;
        let line_len = self.lines[row].chars().count();
        if self.cursor.col < line_len {
            let line = &mut self.lines[row];
            let start = byte_index_from_char_index(line, self.cursor.col);
            let end = byte_index_from_char_index(line, self.cursor.col + 1);
            line.replace_range(start..end, "");
            return true;
        }
        if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            return true;
        }
        false
    }
}

fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Chars `[from, to)` of `s`; `to` past the end is clamped.
fn char_slice(s: &str, from: usize, to: usize) -> &str {
    let a = byte_index_from_char_index(s, from);
    let b = byte_index_from_char_index(s, to).max(a);
    &s[a..b]
}

/// Whether the char at `col` repeats `marker_char`, making the adjacent marker part of a
/// longer run (`*` next to `**`).
fn continues_run(s: &str, col: Option<usize>, marker_char: Option<char>) -> bool {
    match (col, marker_char) {
        (Some(col), Some(m)) => s.chars().nth(col) == Some(m),
        _ => false,
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code))
    }

    fn shift(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code).with_modifiers(KeyModifiers::shift()))
    }

    #[test]
    fn inserts_and_moves_cursor() {
        let mut ta = TextArea::new();
        assert_eq!(ta.input(key(KeyCode::Char('a'))), TextAreaAction::Changed);
        assert_eq!(ta.text(), "a");
        assert_eq!(ta.cursor(), Cursor::new(0, 1));
        ta.input(key(KeyCode::Left));
        assert_eq!(ta.cursor(), Cursor::new(0, 0));
        ta.input(key(KeyCode::Char('b')));
        assert_eq!(ta.text(), "ba");
    }

    #[test]
    fn enter_submits_by_default() {
        let mut ta = TextArea::new();
        ta.input(key(KeyCode::Char('x')));
        let act = ta.input(key(KeyCode::Enter));
        assert_eq!(act, TextAreaAction::Submitted("x".to_string()));
        assert_eq!(ta.text(), "");
    }

    #[test]
    fn shift_enter_inserts_newline_by_default() {
        let mut ta = TextArea::new();
        ta.input(key(KeyCode::Char('x')));
        assert_eq!(ta.input(shift(KeyCode::Enter)), TextAreaAction::Changed);
        assert_eq!(ta.text(), "x\n");
    }

    #[test]
    fn backspace_joins_lines() {
        let mut ta = TextArea::new();
        ta.set_text("a\nb");
        ta.set_cursor(Cursor::new(1, 0));
        assert_eq!(ta.input(key(KeyCode::Backspace)), TextAreaAction::Changed);
        assert_eq!(ta.text(), "ab");
        assert_eq!(ta.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn paste_multiline_inserts_before_tail() {
        let mut ta = TextArea::new();
        ta.set_text("xy");
        ta.set_cursor(Cursor::new(0, 1));
        ta.input(InputEvent::Paste("a\nb\nc".to_string()));
        assert_eq!(ta.text(), "xa\nb\ncy");
        assert_eq!(ta.cursor(), Cursor::new(2, 1));
    }

    #[test]
    fn shift_arrows_select_and_typing_replaces() {
        let mut ta = TextArea::new();
        ta.set_text("hello world");
        ta.input(shift(KeyCode::Right));
        ta.input(shift(KeyCode::Right));
        assert_eq!(ta.selected_text().as_deref(), Some("he"));
        ta.input(key(KeyCode::Char('J')));
        assert_eq!(ta.text(), "Jllo world");
        assert_eq!(ta.selection(), None);
    }

    #[test]
    fn plain_movement_clears_selection() {
        let mut ta = TextArea::new();
        ta.set_text("abc");
        ta.input(shift(KeyCode::End));
        assert_eq!(ta.selected_text().as_deref(), Some("abc"));
        ta.input(key(KeyCode::Left));
        assert_eq!(ta.selection(), None);
    }

    #[test]
    fn surround_without_selection_places_cursor_inside() {
        let mut ta = TextArea::new();
        ta.set_text("ab");
        ta.set_cursor(Cursor::new(0, 1));
        assert!(ta.surround_selection("**", "**"));
        assert_eq!(ta.text(), "a****b");
        assert_eq!(ta.cursor(), Cursor::new(0, 3));
    }

    #[test]
    fn surround_toggles_on_and_off() {
        let mut ta = TextArea::new();
        ta.set_text("make this bold");
        ta.set_selection(Cursor::new(0, 10), Cursor::new(0, 14));
        ta.surround_selection("**", "**");
        assert_eq!(ta.text(), "make this **bold**");
        assert_eq!(ta.selected_text().as_deref(), Some("bold"));

        ta.surround_selection("**", "**");
        assert_eq!(ta.text(), "make this bold");
        assert_eq!(ta.selected_text().as_deref(), Some("bold"));
    }

    #[test]
    fn surround_unwraps_selection_that_includes_markers() {
        let mut ta = TextArea::new();
        ta.set_text("x __u__ y");
        ta.set_selection(Cursor::new(0, 2), Cursor::new(0, 7));
        ta.surround_selection("__", "__");
        assert_eq!(ta.text(), "x u y");
        assert_eq!(ta.selected_text().as_deref(), Some("u"));
    }

    #[test]
    fn surround_ignores_markers_that_are_part_of_a_longer_run() {
        let mut ta = TextArea::new();
        ta.set_text("a **b** c");
        ta.set_selection(Cursor::new(0, 4), Cursor::new(0, 5));
        ta.surround_selection("*", "*");
        assert_eq!(ta.text(), "a ***b*** c");
        assert_eq!(ta.selected_text().as_deref(), Some("b"));

        ta.set_text("___u___");
        ta.set_selection(Cursor::new(0, 0), Cursor::new(0, 7));
        ta.surround_selection("__", "__");
        assert_eq!(ta.text(), "_____u_____");
    }

    #[test]
    fn surround_multiline_wraps_each_line() {
        let mut ta = TextArea::new();
        ta.set_text("one two\n\nthree four");
        ta.set_selection(Cursor::new(0, 4), Cursor::new(2, 5));
        assert!(ta.surround_selection("*", "*"));
        assert_eq!(ta.text(), "one *two*\n\n*three* four");
        assert_eq!(ta.cursor(), Cursor::new(2, 7));
    }

    #[test]
    fn replace_line_clamps_cursor() {
        let mut ta = TextArea::new();
        ta.set_text("> a long quote");
        ta.set_cursor(Cursor::new(0, 14));
        ta.replace_line(0, "short");
        assert_eq!(ta.text(), "short");
        assert_eq!(ta.cursor(), Cursor::new(0, 5));
    }

    #[test]
    fn render_highlights_selection() {
        let mut ta = TextArea::with_options(TextAreaOptions {
            show_scrollbar: false,
            ..TextAreaOptions::default()
        });
        ta.set_text("abcd");
        ta.set_selection(Cursor::new(0, 1), Cursor::new(0, 3));
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        ta.render_ref(area, &mut buf);
        let reversed = |x: u16| {
            buf.cell((x, 0))
                .map(|c| c.modifier.contains(Modifier::REVERSED))
                .unwrap_or(false)
        };
        assert!(!reversed(0));
        assert!(reversed(1));
        assert!(reversed(2));
        assert!(!reversed(3));
    }
}
