/// Keyboard highlight over the filtered rows, with the scroll window that
/// keeps it visible.
#[derive(Debug, Clone, Default)]
pub(crate) struct Highlight {
    cursor: usize,
    offset: usize,
    count: usize,
    visible: usize,
}

impl Highlight {
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            count,
            visible,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        (self.count > 0).then_some(self.cursor)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if count == 0 {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
        self.offset = self.offset.min(count.saturating_sub(self.visible));
        self.scroll_into_view();
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.scroll_into_view();
    }

    pub fn up(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = self.cursor.checked_sub(1).unwrap_or(self.count - 1);
        self.scroll_into_view();
    }

    pub fn down(&mut self) {
        if self.count == 0 {
            return;
        }
        self.cursor = if self.cursor + 1 >= self.count { 0 } else { self.cursor + 1 };
        self.scroll_into_view();
    }

    pub fn first(&mut self) {
        self.select(0);
    }

    pub fn last(&mut self) {
        self.select(self.count.saturating_sub(1));
    }

    pub fn select(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        self.cursor = index.min(self.count - 1);
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        if self.count == 0 || self.visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible {
            self.offset = self.cursor + 1 - self.visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_cursor() {
        let mut h = Highlight::new(0, 5);
        h.down();
        h.up();
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn wraps_both_ways() {
        let mut h = Highlight::new(3, 5);
        h.up();
        assert_eq!(h.cursor(), Some(2));
        h.down();
        assert_eq!(h.cursor(), Some(0));
    }

    #[test]
    fn window_follows_cursor() {
        let mut h = Highlight::new(10, 3);
        h.select(5);
        assert_eq!(h.offset(), 3);
        h.first();
        assert_eq!(h.offset(), 0);
        h.last();
        assert_eq!(h.cursor(), Some(9));
        assert_eq!(h.offset(), 7);
    }

    #[test]
    fn shrinking_clamps() {
        let mut h = Highlight::new(10, 3);
        h.last();
        h.set_count(4);
        assert_eq!(h.cursor(), Some(3));
        assert_eq!(h.offset(), 1);
        h.set_count(0);
        assert_eq!(h.cursor(), None);
        assert_eq!(h.offset(), 0);
    }
}
