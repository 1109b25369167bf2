/// Items revealed per page.
pub const BASE_PAGE_SIZE: usize = 12;

/// Extra items kept visible past a deep-linked slide.
pub const DEEP_LINK_BUFFER: usize = 5;

/// Growing visible-prefix window over the filtered item list.
///
/// `visible_count` never decreases while the filter stays the same; it can exceed the
/// filtered length (a deep-link seed does) and is clamped by [`Pagination::window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    buffer: usize,
    visible_count: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(BASE_PAGE_SIZE, DEEP_LINK_BUFFER)
    }
}

impl Pagination {
    /// Both sizes are at least 1, so a seeded window always contains its slide.
    pub fn new(page_size: usize, buffer: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            buffer: buffer.max(1),
            visible_count: page_size,
        }
    }

    /// Widen the initial window so the slide at `index` and `buffer` items past it are visible.
    pub fn seed_for_slide(&mut self, index: usize) {
        self.visible_count = self.page_size.max(index.saturating_add(self.buffer));
        tracing::trace!(index, visible = self.visible_count, "pagination seeded from deep link");
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items actually rendered for a filtered list of `filtered_len`.
    pub fn window(&self, filtered_len: usize) -> usize {
        self.visible_count.min(filtered_len)
    }

    /// True while some filtered items are still hidden, i.e. a sentinel is mounted.
    pub fn has_more(&self, filtered_len: usize) -> bool {
        self.visible_count < filtered_len
    }

    /// Reveal the next page. Returns whether the window grew.
    pub fn load_more(&mut self, filtered_len: usize) -> bool {
        let next = self.visible_count.saturating_add(self.page_size).min(filtered_len);
        if next > self.visible_count {
            tracing::trace!(from = self.visible_count, to = next, "load more");
            self.visible_count = next;
            true
        } else {
            false
        }
    }

    /// Back to the first page. Called on every filter change.
    pub fn reset(&mut self) {
        self.visible_count = self.page_size;
    }
}

/// Edge detector for the sentinel placed after the last rendered item.
///
/// Visibility callbacks arrive whenever the environment re-evaluates intersection; only a
/// hidden-to-visible crossing while the sentinel is mounted counts as a trigger.
#[derive(Debug, Default, Clone)]
pub struct Sentinel {
    was_visible: bool,
}

impl Sentinel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a visibility report. Returns true when it should trigger a page load.
    pub fn observe(&mut self, mounted: bool, visible: bool) -> bool {
        let visible = mounted && visible;
        let crossed = visible && !self.was_visible;
        self.was_visible = visible;
        crossed
    }

    /// Forget the last observation, as when the sentinel element is remounted.
    pub fn reset(&mut self) {
        self.was_visible = false;
    }
}
