// extensions/tween.rs
//
// Time-boxed interpolation between two values.
// Independent of the scene: the camera fly-to uses it, and so can any other
// animation that needs "from A to B over N milliseconds with a curve".
//
// Usage:
//   let mut tween = Tween::new(from, to, now_ms, 2000.0, Easing::CubicInOut);
//   if tween.step(now_ms, |value| apply(value)) == TweenStatus::Finished {
//       on_complete();
//   }

use glam::Vec3;
use super::easing::Easing;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Result of advancing a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenStatus {
    Running,
    Finished,
}

/// A single animation from `from` to `to`, started at an absolute time.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    /// Host clock timestamp (milliseconds) when the tween began.
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Move the destination without restarting the clock.
    pub fn set_end(&mut self, to: T) {
        self.to = to;
    }

    /// Raw normalized progress: `clamp((now - start) / duration, 0, 1)`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Interpolated value at `now_ms`, shaped by the easing curve.
    pub fn sample(&self, now_ms: f64) -> T {
        let eased = self.easing.apply(self.progress(now_ms));
        self.from.lerp(self.to, eased)
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Feed the current value to `on_tick` and report whether the tween is done.
    pub fn step(&self, now_ms: f64, mut on_tick: impl FnMut(T)) -> TweenStatus {
        on_tick(self.sample(now_ms));
        if self.is_complete(now_ms) {
            TweenStatus::Finished
        } else {
            TweenStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_tween_halfway() {
        let tween = Tween::new(0.0_f32, 100.0, 1000.0, 500.0, Easing::Linear);
        assert!((tween.sample(1250.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn progress_is_clamped() {
        let tween = Tween::new(0.0_f32, 1.0, 1000.0, 500.0, Easing::Linear);
        assert_eq!(tween.progress(0.0), 0.0);
        assert_eq!(tween.progress(99_999.0), 1.0);
        assert_eq!(tween.sample(99_999.0), 1.0);
    }

    #[test]
    fn eased_sample_uses_eased_progress() {
        let tween = Tween::new(Vec3::ZERO, Vec3::splat(10.0), 0.0, 1000.0, Easing::CubicInOut);
        let quarter = tween.sample(250.0);
        // CubicInOut(0.25) = 4 * 0.25^3 = 0.0625
        assert!((quarter.x - 0.625).abs() < 1e-4);
        assert!((quarter.y - quarter.z).abs() < 1e-6);
    }

    #[test]
    fn step_reports_completion_once_time_has_passed() {
        let tween = Tween::new(0.0_f32, 1.0, 0.0, 100.0, Easing::Linear);
        let mut seen = Vec::new();
        assert_eq!(tween.step(50.0, |v| seen.push(v)), TweenStatus::Running);
        assert_eq!(tween.step(100.0, |v| seen.push(v)), TweenStatus::Finished);
        assert_eq!(seen, vec![0.5, 1.0]);
    }

    #[test]
    fn set_end_keeps_clock() {
        let mut tween = Tween::new(0.0_f32, 10.0, 0.0, 100.0, Easing::Linear);
        tween.set_end(20.0);
        assert_eq!(tween.start_ms(), 0.0);
        assert!((tween.sample(50.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let tween = Tween::new(1.0_f32, 2.0, 500.0, 0.0, Easing::CubicInOut);
        assert!(tween.is_complete(500.0));
        assert_eq!(tween.sample(0.0), 2.0);
    }
}
