use ratatui::style::Modifier;
use ratatui::style::Style;

/// Styles used by the viewer, the editor and the toolbar.
///
/// Emphasis styles are patched on top of the style of the block they appear in, so they should
/// usually only carry modifiers (or a foreground color).
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub bold: Style,
    pub italic: Style,
    pub underline: Style,
    pub quote: Style,
    pub quote_marker: Style,
    pub list_marker: Style,
    pub selection: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            bold: Style::default().add_modifier(Modifier::BOLD),
            italic: Style::default().add_modifier(Modifier::ITALIC),
            underline: Style::default().add_modifier(Modifier::UNDERLINED),
            quote: Style::default().dark_gray().add_modifier(Modifier::ITALIC),
            quote_marker: Style::default().dark_gray(),
            list_marker: Style::default().cyan(),
            selection: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl Theme {
    /// A theme without colors, only text modifiers. Useful for snapshot tests and `NO_COLOR`.
    pub fn monochrome() -> Self {
        Self {
            text_primary: Style::default(),
            text_muted: Style::default(),
            accent: Style::default(),
            quote: Style::default().add_modifier(Modifier::ITALIC),
            quote_marker: Style::default(),
            list_marker: Style::default(),
            ..Self::default()
        }
    }
}
