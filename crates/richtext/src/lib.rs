//! `richtext`: inline rich-text formatting for `ratatui` apps.
//!
//! Text uses a small markup: `**bold**`, `*italic*`, `__underline__`, and per-line quotes
//! (`> `), ordered items (`1. `) and unordered items (`- `, `* `, `• `). Markers never nest;
//! see [`markup::inline`] for the exact rules.
//!
//! ## Entry points
//!
//! - [`markup::FormattedText`] / [`markup::blocks`]: classify text into lines with spans.
//! - [`markup::document::FormattedDocument`]: render core, text into wrapped styled `Text`.
//! - [`markup::view::FormattedTextView`]: read-only viewer with scrolling and selection/copy.
//! - [`editor::RichTextEditor`]: editor with format commands, toolbar and live preview.
//! - [`config::Config`]: render options and theme from YAML.
//!
//! Widgets never touch the clipboard; they return `CopyRequested(String)` and the app decides.
pub mod config;
pub mod editor;
pub mod error;

pub use error::Error;
pub use error::Result;
pub use richtext_core::input;
pub use richtext_core::keymap;
pub use richtext_core::selection;
pub use richtext_core::textarea;
pub use richtext_core::theme;
pub use richtext_core::toolbar;

#[cfg(feature = "crossterm")]
pub use richtext_core::crossterm_input;

/// Parsing, rendering and viewing of formatted text.
pub mod markup {
    pub use richtext_markup::*;
}
