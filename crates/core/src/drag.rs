/// Scroll distance per pixel of pointer travel.
const WALK_FACTOR: f32 = 1.5;

/// Pointer travel beyond which a release is a drag, not a click.
const CLICK_SLOP: f32 = 5.0;

/// Pointer-drag-to-scroll for any horizontally scrollable strip (the filter buttons).
#[derive(Debug, Clone, Default)]
pub struct DragScroll {
    max_scroll: f32,
    origin: Option<(f32, f32)>,
    moved: f32,
    suppress_click: bool,
}

impl DragScroll {
    /// `max_scroll` is content width minus viewport width.
    pub fn new(max_scroll: f32) -> Self {
        Self {
            max_scroll: max_scroll.max(0.0),
            ..Self::default()
        }
    }

    pub fn set_max_scroll(&mut self, max_scroll: f32) {
        self.max_scroll = max_scroll.max(0.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, scroll_left: f32) {
        self.origin = Some((x, scroll_left));
        self.moved = 0.0;
        self.suppress_click = false;
    }

    /// New scroll offset for the container, or `None` when no drag is active.
    pub fn pointer_move(&mut self, x: f32) -> Option<f32> {
        let (start_x, start_scroll) = self.origin?;
        let walk = (x - start_x) * WALK_FACTOR;
        self.moved = self.moved.max((x - start_x).abs());
        Some((start_scroll - walk).clamp(0.0, self.max_scroll))
    }

    /// End the drag (pointer up or leave).
    pub fn pointer_up(&mut self) {
        if self.origin.take().is_some() {
            self.suppress_click = self.moved > CLICK_SLOP;
        }
    }

    /// Whether the click that follows a release should be ignored. Consumes the flag.
    pub fn take_click_suppressed(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_scrolls_opposite_to_pointer() {
        let mut drag = DragScroll::new(500.0);
        drag.pointer_down(200.0, 100.0);
        assert_eq!(drag.pointer_move(180.0), Some(130.0));
        assert_eq!(drag.pointer_move(220.0), Some(70.0));
    }

    #[test]
    fn test_drag_clamps_to_bounds() {
        let mut drag = DragScroll::new(50.0);
        drag.pointer_down(0.0, 10.0);
        assert_eq!(drag.pointer_move(100.0), Some(0.0));
        assert_eq!(drag.pointer_move(-100.0), Some(50.0));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut drag = DragScroll::new(50.0);
        assert_eq!(drag.pointer_move(10.0), None);
        drag.pointer_down(0.0, 0.0);
        drag.pointer_up();
        assert_eq!(drag.pointer_move(10.0), None);
    }

    #[test]
    fn test_long_drag_suppresses_click() {
        let mut drag = DragScroll::new(500.0);
        drag.pointer_down(0.0, 0.0);
        drag.pointer_move(-40.0);
        drag.pointer_up();
        assert!(drag.take_click_suppressed());
        assert!(!drag.take_click_suppressed());
    }

    #[test]
    fn test_tap_keeps_click() {
        let mut drag = DragScroll::new(500.0);
        drag.pointer_down(0.0, 0.0);
        drag.pointer_move(2.0);
        drag.pointer_up();
        assert!(!drag.take_click_suppressed());
    }
}
