//! `richtext-core` provides the terminal building blocks shared by the richtext viewer and
//! editor.
//!
//! Nothing here knows about the inline markup syntax; the formatter lives in
//! `richtext-markup` and the editor in the `richtext` facade.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - Selection/copy is app-controlled: widgets emit [`selection::SelectionAction::CopyRequested`]
//!   and the caller decides how to integrate with a clipboard.
//!
//! Useful entry points:
//! - [`textarea::TextArea`]: multi-line input with a selection and surround editing.
//! - [`toolbar::Toolbar`]: a one-line strip of key bindings.
//! - [`render::render_spans_clipped`]: draw styled spans into a buffer with horizontal scroll.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod render;
pub mod scroll;
pub mod selection;
pub mod textarea;
pub mod toolbar;
pub mod viewport;
