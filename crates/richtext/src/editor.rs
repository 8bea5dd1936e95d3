//! An editor for formatted text: a [`TextArea`] with format commands, a toolbar and a live
//! [`FormattedTextView`] preview.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use richtext_core::input::InputEvent;
use richtext_core::input::KeyCode;
use richtext_core::input::KeyEvent;
use richtext_core::input::MouseButton;
use richtext_core::input::MouseEventKind;
use richtext_core::keymap;
use richtext_core::keymap::Binding;
use richtext_core::render;
use richtext_core::selection::SelectionAction;
use richtext_core::textarea::Cursor;
use richtext_core::textarea::SubmitRule;
use richtext_core::textarea::TextArea;
use richtext_core::textarea::TextAreaAction;
use richtext_core::textarea::TextAreaOptions;
use richtext_core::theme::Theme;
use richtext_core::toolbar::Toolbar;
use richtext_core::toolbar::ToolbarOptions;
use richtext_markup::Block;
use richtext_markup::BlockKind;
use richtext_markup::Emphasis;
use richtext_markup::classify_line;
use richtext_markup::view::FormattedTextView;
use richtext_markup::view::FormattedTextViewOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Quote,
    OrderedList,
    BulletList,
}

impl FormatCommand {
    pub const ALL: [FormatCommand; 6] = [
        FormatCommand::Bold,
        FormatCommand::Italic,
        FormatCommand::Underline,
        FormatCommand::Quote,
        FormatCommand::OrderedList,
        FormatCommand::BulletList,
    ];

    /// The emphasis an inline command wraps the selection in.
    pub fn emphasis(self) -> Option<Emphasis> {
        match self {
            FormatCommand::Bold => Some(Emphasis::Bold),
            FormatCommand::Italic => Some(Emphasis::Italic),
            FormatCommand::Underline => Some(Emphasis::Underline),
            _ => None,
        }
    }

    /// The line kind a line command toggles.
    pub fn block_kind(self) -> Option<BlockKind> {
        match self {
            FormatCommand::Quote => Some(BlockKind::Quote),
            FormatCommand::OrderedList => Some(BlockKind::OrderedItem),
            FormatCommand::BulletList => Some(BlockKind::UnorderedItem),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Quote => "quote",
            FormatCommand::OrderedList => "numbered",
            FormatCommand::BulletList => "bullets",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorLayout {
    #[default]
    Split,
    EditOnly,
    PreviewOnly,
}

impl EditorLayout {
    pub fn next(self) -> Self {
        match self {
            EditorLayout::Split => EditorLayout::EditOnly,
            EditorLayout::EditOnly => EditorLayout::PreviewOnly,
            EditorLayout::PreviewOnly => EditorLayout::Split,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorFocus {
    #[default]
    Editor,
    Preview,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Changed,
    Submitted(String),
    CopyRequested(String),
}

#[derive(Clone, Debug)]
pub struct EditorBindings {
    pub bold: Vec<KeyEvent>,
    pub italic: Vec<KeyEvent>,
    pub underline: Vec<KeyEvent>,
    pub quote: Vec<KeyEvent>,
    pub ordered_list: Vec<KeyEvent>,
    pub bullet_list: Vec<KeyEvent>,
    pub cycle_layout: Vec<KeyEvent>,
    pub switch_focus: Vec<KeyEvent>,
}

impl Default for EditorBindings {
    fn default() -> Self {
        Self {
            bold: vec![keymap::key_alt('b')],
            italic: vec![keymap::key_alt('i')],
            underline: vec![keymap::key_alt('u')],
            quote: vec![keymap::key_alt('q')],
            ordered_list: vec![keymap::key_alt('o')],
            bullet_list: vec![keymap::key_alt('l')],
            cycle_layout: vec![keymap::key_alt('p')],
            switch_focus: vec![KeyEvent::new(KeyCode::Tab), KeyEvent::new(KeyCode::BackTab)],
        }
    }
}

impl EditorBindings {
    pub fn keys_for(&self, command: FormatCommand) -> &[KeyEvent] {
        match command {
            FormatCommand::Bold => &self.bold,
            FormatCommand::Italic => &self.italic,
            FormatCommand::Underline => &self.underline,
            FormatCommand::Quote => &self.quote,
            FormatCommand::OrderedList => &self.ordered_list,
            FormatCommand::BulletList => &self.bullet_list,
        }
    }

    pub fn command_for(&self, key: &KeyEvent) -> Option<FormatCommand> {
        FormatCommand::ALL
            .into_iter()
            .find(|c| keymap::any_matches(self.keys_for(*c), key))
    }

    /// Toolbar items: one per [`FormatCommand::ALL`] entry, then the layout switch.
    fn toolbar_bindings(&self) -> Vec<Binding> {
        let mut out: Vec<Binding> = FormatCommand::ALL
            .into_iter()
            .map(|c| {
                let keys = self.keys_for(c).to_vec();
                Binding::new(key_label(keys.first()), c.label(), keys)
            })
            .collect();
        out.push(Binding::new(
            key_label(self.cycle_layout.first()),
            "layout",
            self.cycle_layout.clone(),
        ));
        out
    }
}

fn key_label(key: Option<&KeyEvent>) -> String {
    let Some(key) = key else {
        return String::new();
    };
    let mut out = String::new();
    if key.modifiers.ctrl {
        out.push_str("C-");
    }
    if key.modifiers.alt {
        out.push_str("M-");
    }
    match &key.code {
        KeyCode::Char(c) => out.push(*c),
        other => out.push_str(&format!("{other:?}")),
    }
    out
}

#[derive(Clone, Debug)]
pub struct RichTextEditorOptions {
    pub textarea: TextAreaOptions,
    pub preview: FormattedTextViewOptions,
    pub toolbar: ToolbarOptions,
    pub bindings: EditorBindings,
    pub show_toolbar: bool,
    pub layout: EditorLayout,
}

impl Default for RichTextEditorOptions {
    fn default() -> Self {
        Self {
            textarea: TextAreaOptions {
                submit_rule: SubmitRule::ShiftEnterSubmitsEnterNewline,
                ..TextAreaOptions::default()
            },
            preview: FormattedTextViewOptions::default(),
            toolbar: ToolbarOptions::default(),
            bindings: EditorBindings::default(),
            show_toolbar: true,
            layout: EditorLayout::default(),
        }
    }
}

/// Screen areas of the editor's parts for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorAreas {
    pub toolbar: Option<Rect>,
    pub editor: Option<Rect>,
    pub divider: Option<Rect>,
    pub preview: Option<Rect>,
}

/// Editable source on one side, its rendering on the other.
///
/// Format commands come from key bindings or toolbar clicks. Toolbar items light up for the
/// line kind of the cursor row and the emphasis under the cursor.
#[derive(Clone, Debug)]
pub struct RichTextEditor {
    textarea: TextArea,
    preview: FormattedTextView,
    toolbar: Toolbar,
    layout: EditorLayout,
    focus: EditorFocus,
    options: RichTextEditorOptions,
}

impl Default for RichTextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextEditor {
    pub fn new() -> Self {
        Self::with_options(RichTextEditorOptions::default())
    }

    pub fn with_options(options: RichTextEditorOptions) -> Self {
        let toolbar = Toolbar::with_options(
            options.bindings.toolbar_bindings(),
            options.toolbar.clone(),
        );
        let mut editor = Self {
            textarea: TextArea::with_options(options.textarea.clone()),
            preview: FormattedTextView::with_options(options.preview.clone()),
            toolbar,
            layout: options.layout,
            focus: EditorFocus::default(),
            options,
        };
        editor.set_layout(editor.layout);
        editor
    }

    pub fn set_text(&mut self, text: &str) {
        self.textarea.set_text(text);
        self.sync();
    }

    pub fn text(&self) -> String {
        self.textarea.text()
    }

    pub fn textarea(&self) -> &TextArea {
        &self.textarea
    }

    /// Direct access to the text area. Call [`Self::sync`] after changing the text.
    pub fn textarea_mut(&mut self) -> &mut TextArea {
        &mut self.textarea
    }

    pub fn preview(&self) -> &FormattedTextView {
        &self.preview
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn layout(&self) -> EditorLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: EditorLayout) {
        self.layout = layout;
        self.focus = match layout {
            EditorLayout::EditOnly => EditorFocus::Editor,
            EditorLayout::PreviewOnly => EditorFocus::Preview,
            EditorLayout::Split => self.focus,
        };
    }

    pub fn cycle_layout(&mut self) {
        self.set_layout(self.layout.next());
    }

    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    /// Refreshes the preview and the toolbar state from the text area.
    pub fn sync(&mut self) {
        self.preview.set_text(&self.textarea.text());
        let active = self.active_commands();
        for (i, command) in FormatCommand::ALL.into_iter().enumerate() {
            self.toolbar.set_active(i, active.contains(&command));
        }
    }

    /// Commands whose format applies at the cursor.
    pub fn active_commands(&self) -> Vec<FormatCommand> {
        let cursor = self.textarea.cursor();
        let Some(line) = self.textarea.line(cursor.row) else {
            return Vec::new();
        };
        let block = Block::parse(line, cursor.row);
        let mut out: Vec<FormatCommand> = FormatCommand::ALL
            .into_iter()
            .filter(|c| c.block_kind() == Some(block.kind))
            .collect();

        let byte = line
            .char_indices()
            .nth(cursor.col)
            .map(|(b, _)| b)
            .unwrap_or(line.len());
        if let Some(pos) = byte.checked_sub(block.marker.len())
            && let Some(span) = block
                .spans
                .iter()
                .find(|s| {
                    !s.emphasis.is_plain() && s.source.start < pos && pos < s.source.end
                })
            && let Some(command) = FormatCommand::ALL
                .into_iter()
                .find(|c| c.emphasis() == Some(span.emphasis))
        {
            out.push(command);
        }
        out
    }

    /// Applies a format command to the selection (or the cursor position / row). Returns
    /// `true` when the text changed.
    pub fn apply(&mut self, command: FormatCommand) -> bool {
        let changed = match (command.emphasis(), command.block_kind()) {
            (Some(emphasis), _) => {
                let marker = emphasis.marker();
                self.textarea.surround_selection(marker, marker)
            }
            (None, Some(kind)) => self.toggle_line_kind(kind),
            (None, None) => false,
        };
        log::debug!("applied {command:?}, changed: {changed}");
        if changed {
            self.sync();
        }
        changed
    }

    /// Toggles a line prefix on every selected row.
    ///
    /// When all non-blank rows already have `kind` the prefixes are removed; otherwise each
    /// row's quote or list prefix is replaced. Blank rows are skipped unless they are the only
    /// row.
    fn toggle_line_kind(&mut self, kind: BlockKind) -> bool {
        let rows = self.textarea.selected_rows();
        let single = rows.start() == rows.end();
        let targets: Vec<(usize, String)> = rows
            .filter_map(|row| self.textarea.line(row).map(|l| (row, l.to_string())))
            .filter(|(_, line)| single || !line.trim().is_empty())
            .collect();
        if targets.is_empty() {
            return false;
        }
        let remove = targets
            .iter()
            .all(|(_, line)| classify_line(line).0 == kind);

        let selection = self.textarea.selection();
        let cursor = self.textarea.cursor();
        let mut cursor_col = cursor.col;
        let mut number = 0usize;
        for (row, line) in &targets {
            let (current, marker_len) = classify_line(line);
            let body = if current == BlockKind::Quote || current.is_list_item() {
                &line[marker_len..]
            } else {
                line.as_str()
            };
            let prefix = if remove {
                String::new()
            } else {
                number += 1;
                line_prefix(kind, number)
            };
            if *row == cursor.row {
                let old_n = line[..line.len() - body.len()].chars().count();
                cursor_col = prefix.chars().count() + cursor_col.saturating_sub(old_n);
            }
            self.textarea.replace_line(*row, format!("{prefix}{body}"));
        }

        match selection {
            Some((start, end)) => {
                let end_len = self
                    .textarea
                    .line(end.row)
                    .map(|l| l.chars().count())
                    .unwrap_or(0);
                self.textarea
                    .set_selection(Cursor::new(start.row, 0), Cursor::new(end.row, end_len));
            }
            None => self
                .textarea
                .set_cursor(Cursor::new(cursor.row, cursor_col)),
        }
        true
    }

    /// Splits `area` into toolbar, editor, divider and preview for the current layout.
    pub fn areas(&self, area: Rect) -> EditorAreas {
        let mut out = EditorAreas::default();
        if area.width == 0 || area.height == 0 {
            return out;
        }
        let mut body = area;
        if self.options.show_toolbar && area.height >= 2 {
            out.toolbar = Some(Rect::new(area.x, area.y, area.width, 1));
            body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        }
        match self.layout {
            EditorLayout::EditOnly => out.editor = Some(body),
            EditorLayout::PreviewOnly => out.preview = Some(body),
            EditorLayout::Split if body.width < 3 => out.editor = Some(body),
            EditorLayout::Split => {
                let left = (body.width - 1) / 2;
                out.editor = Some(Rect::new(body.x, body.y, left, body.height));
                out.divider = Some(Rect::new(body.x + left, body.y, 1, body.height));
                out.preview = Some(Rect::new(
                    body.x + left + 1,
                    body.y,
                    body.width - left - 1,
                    body.height,
                ));
            }
        }
        out
    }

    pub fn input(&mut self, area: Rect, event: InputEvent) -> EditorAction {
        if let InputEvent::Key(key) = &event {
            let bindings = &self.options.bindings;
            if let Some(command) = bindings.command_for(key) {
                if self.focus == EditorFocus::Preview {
                    return EditorAction::None;
                }
                return if self.apply(command) {
                    EditorAction::Changed
                } else {
                    EditorAction::None
                };
            }
            if keymap::any_matches(&bindings.cycle_layout, key) {
                self.cycle_layout();
                return EditorAction::None;
            }
            if self.layout == EditorLayout::Split
                && keymap::any_matches(&bindings.switch_focus, key)
            {
                self.focus = match self.focus {
                    EditorFocus::Editor => EditorFocus::Preview,
                    EditorFocus::Preview => EditorFocus::Editor,
                };
                return EditorAction::None;
            }
        }

        if let InputEvent::Mouse(mouse) = event {
            return self.handle_mouse(area, event, mouse.x, mouse.y, mouse.kind);
        }

        match self.focus {
            EditorFocus::Editor => self.editor_input(event),
            EditorFocus::Preview => preview_action(self.preview.handle_event_action(event)),
        }
    }

    fn editor_input(&mut self, event: InputEvent) -> EditorAction {
        match self.textarea.input(event) {
            TextAreaAction::None => {
                self.sync_toolbar_only();
                EditorAction::None
            }
            TextAreaAction::Changed => {
                self.sync();
                EditorAction::Changed
            }
            TextAreaAction::Submitted(text) => {
                self.sync();
                EditorAction::Submitted(text)
            }
        }
    }

    fn handle_mouse(
        &mut self,
        area: Rect,
        event: InputEvent,
        x: u16,
        y: u16,
        kind: MouseEventKind,
    ) -> EditorAction {
        let areas = self.areas(area);
        let hit = |r: Option<Rect>| r.is_some_and(|r| r.contains((x, y).into()));

        if hit(areas.toolbar) {
            if kind != MouseEventKind::Down(MouseButton::Left) {
                return EditorAction::None;
            }
            let Some(toolbar) = areas.toolbar else {
                return EditorAction::None;
            };
            return match self.toolbar.item_at(x - toolbar.x) {
                Some(i) if i < FormatCommand::ALL.len() => {
                    if self.apply(FormatCommand::ALL[i]) {
                        EditorAction::Changed
                    } else {
                        EditorAction::None
                    }
                }
                Some(_) => {
                    self.cycle_layout();
                    EditorAction::None
                }
                None => EditorAction::None,
            };
        }

        if let Some(preview) = areas.preview
            && (hit(areas.preview) || self.focus == EditorFocus::Preview)
        {
            if matches!(kind, MouseEventKind::Down(_)) {
                self.focus = EditorFocus::Preview;
            }
            return preview_action(self.preview.handle_event_action_in_area(preview, event));
        }

        if hit(areas.editor) && matches!(kind, MouseEventKind::Down(_)) {
            self.focus = EditorFocus::Editor;
        }
        EditorAction::None
    }

    fn sync_toolbar_only(&mut self) {
        let active = self.active_commands();
        for (i, command) in FormatCommand::ALL.into_iter().enumerate() {
            self.toolbar.set_active(i, active.contains(&command));
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let areas = self.areas(area);
        if let Some(toolbar) = areas.toolbar {
            self.toolbar.render_ref(toolbar, buf);
        }
        if let Some(editor) = areas.editor {
            self.textarea.render_ref(editor, buf);
        }
        if let Some(divider) = areas.divider {
            for row in 0..divider.height {
                render::render_str_clipped(
                    divider.x,
                    divider.y + row,
                    0,
                    1,
                    buf,
                    "│",
                    theme.text_muted,
                );
            }
        }
        if let Some(preview) = areas.preview {
            self.preview.render_ref(preview, buf, theme);
        }
    }

    /// Terminal cursor position when the text area has focus.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if self.focus != EditorFocus::Editor {
            return None;
        }
        self.textarea.cursor_pos(self.areas(area).editor?)
    }
}

fn line_prefix(kind: BlockKind, number: usize) -> String {
    match kind {
        BlockKind::Quote => "> ".to_string(),
        BlockKind::OrderedItem => format!("{number}. "),
        BlockKind::UnorderedItem => "- ".to_string(),
        BlockKind::Blank | BlockKind::Paragraph => String::new(),
    }
}

fn preview_action(action: SelectionAction) -> EditorAction {
    match action {
        SelectionAction::CopyRequested(text) => EditorAction::CopyRequested(text),
        SelectionAction::None | SelectionAction::Redraw => EditorAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use richtext_core::input::KeyModifiers;
    use richtext_core::input::MouseEvent;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 41,
        height: 10,
    };

    fn editor(text: &str) -> RichTextEditor {
        let mut e = RichTextEditor::new();
        e.set_text(text);
        e
    }

    fn key(e: &mut RichTextEditor, k: KeyEvent) -> EditorAction {
        e.input(AREA, InputEvent::Key(k))
    }

    fn click(x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            x,
            y,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        })
    }

    #[test]
    fn alt_b_bolds_selection_and_toggles_back() {
        let mut e = editor("make this bold");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 10), Cursor::new(0, 14));
        assert_eq!(key(&mut e, keymap::key_alt('b')), EditorAction::Changed);
        assert_eq!(e.text(), "make this **bold**");
        assert_eq!(key(&mut e, keymap::key_alt('b')), EditorAction::Changed);
        assert_eq!(e.text(), "make this bold");
    }

    #[test]
    fn italic_inside_bold_wraps_instead_of_unwrapping() {
        let mut e = editor("make **bold** here");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 7), Cursor::new(0, 11));
        e.apply(FormatCommand::Italic);
        assert_eq!(e.text(), "make ***bold*** here");

        let mut e = editor("**bold**");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 0), Cursor::new(0, 8));
        e.apply(FormatCommand::Italic);
        assert_eq!(e.text(), "***bold***");
    }

    #[test]
    fn italic_unwraps_single_markers() {
        let mut e = editor("an *aside* here");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 4), Cursor::new(0, 9));
        e.apply(FormatCommand::Italic);
        assert_eq!(e.text(), "an aside here");

        let mut e = editor("*aside*");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 0), Cursor::new(0, 7));
        e.apply(FormatCommand::Italic);
        assert_eq!(e.text(), "aside");
    }

    #[test]
    fn inline_command_without_selection_inserts_pair() {
        let mut e = editor("");
        key(&mut e, keymap::key_alt('u'));
        assert_eq!(e.text(), "____");
        assert_eq!(e.textarea().cursor(), Cursor::new(0, 2));
        key(&mut e, keymap::key_char('x'));
        assert_eq!(e.text(), "__x__");
    }

    #[test]
    fn bullet_list_toggles_on_cursor_row() {
        let mut e = editor("item");
        e.textarea_mut().set_cursor(Cursor::new(0, 2));
        e.apply(FormatCommand::BulletList);
        assert_eq!(e.text(), "- item");
        assert_eq!(e.textarea().cursor(), Cursor::new(0, 4));
        e.apply(FormatCommand::BulletList);
        assert_eq!(e.text(), "item");
        assert_eq!(e.textarea().cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn ordered_list_numbers_selected_rows_and_skips_blanks() {
        let mut e = editor("a\n\nb\nc");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 0), Cursor::new(3, 1));
        e.apply(FormatCommand::OrderedList);
        assert_eq!(e.text(), "1. a\n\n2. b\n3. c");
        e.apply(FormatCommand::OrderedList);
        assert_eq!(e.text(), "a\n\nb\nc");
    }

    #[test]
    fn line_command_replaces_other_prefix() {
        let mut e = editor("> quoted\n- listed");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 0), Cursor::new(1, 3));
        e.apply(FormatCommand::BulletList);
        assert_eq!(e.text(), "- quoted\n- listed");
    }

    #[test]
    fn preview_follows_edits() {
        let mut e = editor("");
        for c in "**hi**".chars() {
            key(&mut e, keymap::key_char(c));
        }
        assert_eq!(e.preview().text(), "**hi**");
    }

    #[test]
    fn toolbar_reflects_cursor_context() {
        let mut e = editor("> some **bold** text");
        e.textarea_mut().set_cursor(Cursor::new(0, 10));
        e.sync();
        let active = e.active_commands();
        assert!(active.contains(&FormatCommand::Quote));
        assert!(active.contains(&FormatCommand::Bold));
        assert!(e.toolbar().is_active(0));
        assert!(e.toolbar().is_active(3));
        assert!(!e.toolbar().is_active(1));
    }

    #[test]
    fn toolbar_click_applies_command() {
        let mut e = editor("word");
        e.textarea_mut()
            .set_selection(Cursor::new(0, 0), Cursor::new(0, 4));
        // "M-b bold │ M-i italic": column 0 is the bold item.
        assert_eq!(e.input(AREA, click(0, 0)), EditorAction::Changed);
        assert_eq!(e.text(), "**word**");
    }

    #[test]
    fn layout_cycles_and_forces_focus() {
        let mut e = editor("x");
        assert_eq!(e.layout(), EditorLayout::Split);
        key(&mut e, keymap::key_alt('p'));
        assert_eq!(e.layout(), EditorLayout::EditOnly);
        assert_eq!(e.focus(), EditorFocus::Editor);
        key(&mut e, keymap::key_alt('p'));
        assert_eq!(e.layout(), EditorLayout::PreviewOnly);
        assert_eq!(e.focus(), EditorFocus::Preview);
        let areas = e.areas(AREA);
        assert!(areas.editor.is_none());
        assert!(areas.preview.is_some());
    }

    #[test]
    fn tab_switches_focus_in_split_layout() {
        let mut e = editor("x");
        key(&mut e, KeyEvent::new(KeyCode::Tab));
        assert_eq!(e.focus(), EditorFocus::Preview);
        // Typing goes nowhere while the preview has focus.
        key(&mut e, keymap::key_char('z'));
        assert_eq!(e.text(), "x");
        key(&mut e, KeyEvent::new(KeyCode::Tab));
        assert_eq!(e.focus(), EditorFocus::Editor);
    }

    #[test]
    fn split_areas_share_the_body() {
        let e = editor("");
        let areas = e.areas(AREA);
        assert_eq!(areas.toolbar, Some(Rect::new(0, 0, 41, 1)));
        assert_eq!(areas.editor, Some(Rect::new(0, 1, 20, 9)));
        assert_eq!(areas.divider, Some(Rect::new(20, 1, 1, 9)));
        assert_eq!(areas.preview, Some(Rect::new(21, 1, 20, 9)));
    }

    #[test]
    fn shift_enter_submits() {
        let mut e = editor("done");
        let action = key(
            &mut e,
            KeyEvent::new(KeyCode::Enter).with_modifiers(KeyModifiers::shift()),
        );
        assert_eq!(action, EditorAction::Submitted("done".to_string()));
        assert_eq!(e.text(), "");
        assert_eq!(e.preview().text(), "");
    }

    #[test]
    fn renders_every_layout_without_panicking() {
        let mut e = editor("> q\n1. **a**\n- b");
        for _ in 0..3 {
            for w in [1u16, 2, 3, 10, 41] {
                let area = Rect::new(0, 0, w, 4);
                let mut buf = Buffer::empty(area);
                e.render_ref(area, &mut buf, &Theme::default());
            }
            e.cycle_layout();
        }
    }
}
