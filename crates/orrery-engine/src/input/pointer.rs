use glam::Vec2;

/// Input events the controller understands. Coordinates are viewport
/// pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y), pressed or not.
    PointerMove { x: f32, y: f32 },
    /// The press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// Scroll wheel. Positive `delta_y` zooms out.
    Wheel { delta_y: f32 },
}

/// Tells a click from a drag and turns moves into deltas.
///
/// A press that never strays further than `click_threshold` pixels from
/// where it began is a click; anything else is a drag.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    click_threshold: f32,
    /// Where the current press began.
    origin: Option<Vec2>,
    last: Vec2,
    /// Furthest distance from `origin` during the current press.
    max_travel: f32,
}

impl PointerTracker {
    pub fn new(click_threshold: f32) -> Self {
        Self {
            click_threshold: click_threshold.max(0.0),
            origin: None,
            last: Vec2::ZERO,
            max_travel: 0.0,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    pub fn last_position(&self) -> Vec2 {
        self.last
    }

    pub fn down(&mut self, pos: Vec2) {
        self.origin = Some(pos);
        self.last = pos;
        self.max_travel = 0.0;
    }

    /// Returns the drag delta since the previous event if a press is active.
    pub fn moved(&mut self, pos: Vec2) -> Option<Vec2> {
        let delta = pos - self.last;
        self.last = pos;
        let origin = self.origin?;
        self.max_travel = self.max_travel.max(pos.distance(origin));
        Some(delta)
    }

    /// Ends the press. Returns the click position if it was a click.
    pub fn up(&mut self, pos: Vec2) -> Option<Vec2> {
        self.last = pos;
        let origin = self.origin.take()?;
        let travel = self.max_travel.max(pos.distance(origin));
        (travel < self.click_threshold).then_some(pos)
    }

    /// Forget any active press.
    pub fn reset(&mut self) {
        self.origin = None;
        self.max_travel = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_press_is_a_click() {
        let mut p = PointerTracker::new(5.0);
        p.down(Vec2::new(100.0, 100.0));
        assert_eq!(p.moved(Vec2::new(102.0, 101.0)), Some(Vec2::new(2.0, 1.0)));
        assert_eq!(p.up(Vec2::new(102.0, 101.0)), Some(Vec2::new(102.0, 101.0)));
        assert!(!p.is_pressed());
    }

    #[test]
    fn long_drag_is_not_a_click() {
        let mut p = PointerTracker::new(5.0);
        p.down(Vec2::ZERO);
        p.moved(Vec2::new(30.0, 0.0));
        // Returning to the start does not turn it back into a click.
        p.moved(Vec2::ZERO);
        assert_eq!(p.up(Vec2::ZERO), None);
    }

    #[test]
    fn moves_without_press_give_no_delta() {
        let mut p = PointerTracker::new(5.0);
        assert_eq!(p.moved(Vec2::new(10.0, 10.0)), None);
        assert_eq!(p.last_position(), Vec2::new(10.0, 10.0));
        assert_eq!(p.up(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn deltas_are_relative_to_previous_move() {
        let mut p = PointerTracker::new(5.0);
        p.down(Vec2::new(10.0, 10.0));
        assert_eq!(p.moved(Vec2::new(20.0, 5.0)), Some(Vec2::new(10.0, -5.0)));
        assert_eq!(p.moved(Vec2::new(25.0, 5.0)), Some(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn reset_drops_press() {
        let mut p = PointerTracker::new(5.0);
        p.down(Vec2::ZERO);
        p.reset();
        assert_eq!(p.up(Vec2::ZERO), None);
    }
}
