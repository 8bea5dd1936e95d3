//! Lightweight inline markup for terminal text: `**bold**`, `*italic*`, `__underline__`, plus
//! quotes (`> `), ordered items (`1. `) and unordered items (`- `, `* `, `• `).
//!
//! ## Layers
//!
//! - [`inline`]: one line into emphasis spans.
//! - [`block`]: a text into classified lines, each with its spans.
//! - [`document`]: render core, classified lines into wrapped and styled `Text`.
//! - [`view::FormattedTextView`]: interactive widget (viewport, scrolling, selection/copy).
//!
//! ```rust
//! use richtext_markup::{BlockKind, Emphasis, blocks};
//!
//! let all: Vec<_> = blocks("> **note**\n- item").collect();
//! assert_eq!(all[0].kind, BlockKind::Quote);
//! assert_eq!(all[0].spans[0].emphasis, Emphasis::Bold);
//! assert_eq!(all[1].text, "item");
//! ```
pub mod block;
pub mod document;
pub mod inline;
pub mod view;

pub use block::Block;
pub use block::BlockKind;
pub use block::Blocks;
pub use block::FormattedText;
pub use block::blocks;
pub use block::classify_line;
pub use inline::Emphasis;
pub use inline::InlineSpan;
pub use inline::parse_inline;
