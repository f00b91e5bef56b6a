// Scroll state for the logs panel
//
// The panel follows new entries until the user scrolls up, and resumes
// following once they scroll back to the bottom.

#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the first visible line
    offset: usize,
    total: usize,
    viewport: usize,
    pub auto_follow: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Call every frame with the current content and viewport sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if self.offset > 0 {
            self.offset = self.offset.saturating_sub(lines);
            self.auto_follow = false;
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.max(1));
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// (start, end) indices of the visible lines
    pub fn visible_range(&self) -> (usize, usize) {
        (self.offset, (self.offset + self.viewport).min(self.total))
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn scrolling_up_pins_the_view() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_up(1);
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);

        scroll.update_dimensions(30, 5);
        assert_eq!(scroll.offset(), 14);
        assert_eq!(scroll.visible_range(), (14, 19));
    }

    #[test]
    fn reaching_the_bottom_resumes_following() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.page_up();
        assert_eq!(scroll.offset(), 10);

        scroll.page_down();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(3, 10);
        scroll.scroll_up(1);
        assert_eq!(scroll.offset(), 0);
        assert!(scroll.auto_follow);
        assert!(!scroll.needs_scrollbar());
    }
}
