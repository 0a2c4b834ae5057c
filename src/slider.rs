//! Split-slider controller — a single scalar position (percent of the
//! preview width) driven by an explicit Idle/Dragging state machine.
//!
//! egui input is polled globally per frame, so once a drag starts the
//! pointer is tracked across the whole viewport and the drag ends on the
//! release, wherever it happens. Leaving the Dragging state is the only
//! "deregistration" there is, and it is unconditional.

use eframe::egui;
use egui::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging,
}

/// The reveal boundary between the light and dark images.
pub struct SplitSlider {
    /// Percent of the container width, always in `[0, 100]`.
    position: f32,
    drag: DragState,
}

impl Default for SplitSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitSlider {
    pub const DEFAULT_POSITION: f32 = 50.0;

    pub fn new() -> Self {
        Self {
            position: Self::DEFAULT_POSITION,
            drag: DragState::Idle,
        }
    }

    /// Current split position in percent of the container width.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    /// Pointer-down on the handle: start tracking.
    pub fn begin_drag(&mut self) {
        self.drag = DragState::Dragging;
    }

    /// Pointer release anywhere: stop tracking. Safe to call when idle.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Recompute the position from a pointer x-coordinate.
    /// No-op while idle or when the container is degenerate.
    pub fn drag_to(&mut self, pointer_x: f32, container: Rect) {
        if self.drag != DragState::Dragging || container.width() <= 0.0 {
            return;
        }
        self.position = Self::position_for(pointer_x, container.left(), container.width());
    }

    /// Pure position math: clamp to the container *before* dividing, so a
    /// pointer outside the container pins the result to 0 or 100.
    pub fn position_for(pointer_x: f32, container_left: f32, container_width: f32) -> f32 {
        let x = (pointer_x - container_left).clamp(0.0, container_width);
        x / container_width * 100.0
    }

    /// Screen x-coordinate of the split boundary inside `container`.
    /// The clip edge and the handle are both drawn at this exact value.
    pub fn split_x(&self, container: Rect) -> f32 {
        container.left() + container.width() * self.position / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn container_400() -> Rect {
        // 400 px wide, starting at x = 100
        Rect::from_min_size(pos2(100.0, 0.0), vec2(400.0, 225.0))
    }

    #[test]
    fn test_position_math_inside_container() {
        // 400 px container: x=40 from the left edge → 10 %, x=360 → 90 %
        assert_eq!(SplitSlider::position_for(140.0, 100.0, 400.0), 10.0);
        assert_eq!(SplitSlider::position_for(460.0, 100.0, 400.0), 90.0);
        assert_eq!(SplitSlider::position_for(300.0, 100.0, 400.0), 50.0);
    }

    #[test]
    fn test_position_pins_at_edges() {
        // At or beyond the right edge → 100; at or before the left edge → 0
        assert_eq!(SplitSlider::position_for(500.0, 100.0, 400.0), 100.0);
        assert_eq!(SplitSlider::position_for(9999.0, 100.0, 400.0), 100.0);
        assert_eq!(SplitSlider::position_for(100.0, 100.0, 400.0), 0.0);
        assert_eq!(SplitSlider::position_for(-50.0, 100.0, 400.0), 0.0);
    }

    #[test]
    fn test_position_always_in_range() {
        for x in (-1000..2000).step_by(37) {
            let p = SplitSlider::position_for(x as f32, 100.0, 400.0);
            assert!((0.0..=100.0).contains(&p), "x={x} gave {p}");
        }
    }

    #[test]
    fn test_drag_scenario() {
        let mut slider = SplitSlider::new();
        assert_eq!(slider.position(), 50.0);

        slider.begin_drag();
        assert!(slider.is_dragging());

        slider.drag_to(140.0, container_400());
        assert_eq!(slider.position(), 10.0);
        slider.drag_to(460.0, container_400());
        assert_eq!(slider.position(), 90.0);

        // Release: back to idle, further moves have no effect
        slider.end_drag();
        assert!(!slider.is_dragging());
        slider.drag_to(300.0, container_400());
        assert_eq!(slider.position(), 90.0);
    }

    #[test]
    fn test_drag_ignored_while_idle() {
        let mut slider = SplitSlider::new();
        slider.drag_to(460.0, container_400());
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn test_degenerate_container_is_a_no_op() {
        let mut slider = SplitSlider::new();
        slider.begin_drag();
        slider.drag_to(140.0, Rect::from_min_size(pos2(100.0, 0.0), vec2(0.0, 225.0)));
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn test_split_x_matches_position() {
        let mut slider = SplitSlider::new();
        slider.begin_drag();
        slider.drag_to(140.0, container_400());
        // 10 % of 400 px, offset by the container origin
        assert_eq!(slider.split_x(container_400()), 140.0);
    }

    #[test]
    fn test_end_drag_when_idle_is_harmless() {
        let mut slider = SplitSlider::new();
        slider.end_drag();
        slider.end_drag();
        assert!(!slider.is_dragging());
        assert_eq!(slider.position(), 50.0);
    }
}
