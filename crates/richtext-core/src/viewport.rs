use ratatui::layout::Rect;

/// Scroll offsets of a viewport over a content area, both in terminal cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn scroll_x_by(&mut self, delta: i32) {
        let next = self.x as i64 + delta as i64;
        self.x = next.clamp(0, self.max_x() as i64) as u32;
    }

    pub fn page_down(&mut self) {
        self.scroll_y_by(self.viewport_h.saturating_sub(1) as i32);
    }

    pub fn page_up(&mut self) {
        self.scroll_y_by(-(self.viewport_h.saturating_sub(1) as i32));
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    /// Scrolls the minimum amount needed for the cell `(x, y)` to be visible.
    pub fn reveal(&mut self, x: u32, y: u32) {
        if y < self.y {
            self.y = y;
        } else if y >= self.y.saturating_add(self.viewport_h as u32) {
            self.y = y.saturating_sub(self.viewport_h.saturating_sub(1) as u32);
        }

        if x < self.x {
            self.x = x;
        } else if x >= self.x.saturating_add(self.viewport_w as u32) {
            self.x = x.saturating_sub(self.viewport_w.saturating_sub(1) as u32);
        }

        self.clamp();
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    fn max_x(&self) -> u32 {
        self.content_w.saturating_sub(self.viewport_w as u32)
    }
}

/// Splits `area` into a content area and an optional one-column scrollbar on the right.
pub fn split_scrollbar(area: Rect, show_scrollbar: bool) -> (Rect, Option<Rect>) {
    if show_scrollbar && area.width >= 2 {
        (
            Rect::new(area.x, area.y, area.width - 1, area.height),
            Some(Rect::new(area.x + area.width - 1, area.y, 1, area.height)),
        )
    } else {
        (area, None)
    }
}

/// Shrinks `area` horizontally by the given paddings.
pub fn inset_h(area: Rect, left: u16, right: u16) -> Rect {
    let left = left.min(area.width);
    let right = right.min(area.width.saturating_sub(left));
    Rect::new(
        area.x.saturating_add(left),
        area.y,
        area.width.saturating_sub(left).saturating_sub(right),
        area.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_both_axes() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 5);
        s.set_content(12, 6);
        s.x = 99;
        s.y = 99;
        s.clamp();
        assert_eq!(s.x, 2);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn reveal_scrolls_down_and_back_up() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 3);
        s.set_content(10, 20);
        s.reveal(0, 7);
        assert_eq!(s.y, 5);
        s.reveal(0, 2);
        assert_eq!(s.y, 2);
    }

    #[test]
    fn split_scrollbar_needs_two_columns() {
        let (content, bar) = split_scrollbar(Rect::new(0, 0, 1, 4), true);
        assert_eq!(content.width, 1);
        assert!(bar.is_none());

        let (content, bar) = split_scrollbar(Rect::new(2, 0, 10, 4), true);
        assert_eq!(content.width, 9);
        assert_eq!(bar.map(|r| r.x), Some(11));
    }

    #[test]
    fn inset_never_underflows() {
        let r = inset_h(Rect::new(0, 0, 3, 1), 2, 5);
        assert_eq!(r.width, 0);
        assert_eq!(r.x, 2);
    }
}
