use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;

/// Actions produced by selection-capable widgets.
///
/// No widget talks to a system clipboard. They emit `CopyRequested(String)` and the app decides
/// what to do with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    None,
    Redraw,
    CopyRequested(String),
}

/// Key bindings for selection interactions (`y` copies, `Esc` clears).
#[derive(Clone, Debug)]
pub struct SelectionBindings {
    pub copy: Vec<KeyEvent>,
    pub clear: Vec<KeyEvent>,
}

impl Default for SelectionBindings {
    fn default() -> Self {
        Self {
            copy: vec![keymap::key_char('y')],
            clear: vec![KeyEvent::new(KeyCode::Esc)],
        }
    }
}

impl SelectionBindings {
    pub fn is_copy(&self, key: &KeyEvent) -> bool {
        keymap::any_matches(&self.copy, key)
    }

    pub fn is_clear(&self, key: &KeyEvent) -> bool {
        keymap::any_matches(&self.clear, key)
    }
}

/// A `(line, column)` position in rendered output, column in terminal cells.
pub type CellPos = (usize, u32);

/// Orders two positions and makes the end column exclusive.
pub fn normalize_inclusive(a: CellPos, b: CellPos) -> (CellPos, CellPos) {
    let (start, end) = if a.0 < b.0 || (a.0 == b.0 && a.1 <= b.1) {
        (a, b)
    } else {
        (b, a)
    };
    (start, (end.0, end.1.saturating_add(1)))
}

/// Column range selected on `line` for a normalized selection, `None` when the line is outside.
pub fn columns_on_line(line: usize, start: CellPos, end: CellPos) -> Option<(u32, u32)> {
    if line < start.0 || line > end.0 {
        return None;
    }
    let from = if line == start.0 { start.1 } else { 0 };
    let to = if line == end.0 { end.1 } else { u32::MAX };
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_swaps_backwards_drag() {
        let (s, e) = normalize_inclusive((3, 1), (1, 4));
        assert_eq!(s, (1, 4));
        assert_eq!(e, (3, 2));
    }

    #[test]
    fn middle_lines_are_fully_selected() {
        let (s, e) = normalize_inclusive((0, 2), (2, 0));
        assert_eq!(columns_on_line(0, s, e), Some((2, u32::MAX)));
        assert_eq!(columns_on_line(1, s, e), Some((0, u32::MAX)));
        assert_eq!(columns_on_line(2, s, e), Some((0, 1)));
        assert_eq!(columns_on_line(3, s, e), None);
    }
}
