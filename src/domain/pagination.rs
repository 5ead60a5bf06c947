use std::ops::Range;

/// Zero-based page cursor over the filtered order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total: usize,
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    len.div_ceil(per_page).max(1)
}

pub fn page_range(page: usize, per_page: usize, len: usize) -> Range<usize> {
    let start = page.saturating_mul(per_page).min(len);
    let end = start.saturating_add(per_page).min(len);
    start..end
}

impl Default for Pager {
    fn default() -> Self {
        Self { current: 0, total: 1 }
    }
}

impl Pager {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total
    }

    /// Rotation only makes sense with more than one page.
    pub fn rotates(&self) -> bool {
        self.total > 1
    }

    /// Resizes the page set and puts the cursor back on the first page.
    pub fn reset(&mut self, total: usize) {
        self.total = total.max(1);
        self.current = 0;
    }

    /// Resizes the page set, keeping the cursor unless it now points past the end.
    pub fn resize(&mut self, total: usize) {
        self.total = total.max(1);
        if self.current >= self.total {
            self.current = 0;
        }
    }

    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Advances one page, wrapping from the last page to the first.
    pub fn rotate(&mut self) {
        self.current = (self.current + 1) % self.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_entries_two_per_page() {
        assert_eq!(total_pages(5, 2), 3);
        assert_eq!(page_range(0, 2, 5), 0..2);
        assert_eq!(page_range(1, 2, 5), 2..4);
        assert_eq!(page_range(2, 2, 5), 4..5);
    }

    #[test]
    fn empty_list_has_one_page() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(page_range(0, 20, 0), 0..0);
    }

    #[test]
    fn range_past_end_is_empty() {
        assert_eq!(page_range(7, 2, 5), 5..5);
    }

    #[test]
    fn rotation_has_period_equal_to_page_count() {
        let mut pager = Pager::default();
        pager.reset(4);
        pager.next();
        let start = pager.current();
        for _ in 0..4 {
            pager.rotate();
        }
        assert_eq!(pager.current(), start);
    }

    #[test]
    fn manual_navigation_is_clamped() {
        let mut pager = Pager::default();
        pager.reset(2);
        assert!(!pager.prev());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn resize_keeps_cursor_in_bounds() {
        let mut pager = Pager::default();
        pager.reset(5);
        pager.next();
        pager.next();
        pager.resize(6);
        assert_eq!(pager.current(), 2);
        pager.resize(2);
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn single_page_does_not_rotate() {
        let mut pager = Pager::default();
        pager.reset(1);
        assert!(!pager.rotates());
        pager.rotate();
        assert_eq!(pager.current(), 0);
    }
}
