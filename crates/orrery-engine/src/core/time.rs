use crate::assets::config::{MAX_FRAME_RATE, MIN_FRAME_RATE};

/// Decision for one animation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Not enough time since the last committed frame.
    Skip,
    /// Update and render now.
    Commit,
}

/// Frame-rate limiter decoupled from the display refresh.
///
/// The host calls `poll` on every animation callback; only callbacks at
/// least `1000 / target_fps` ms after the previous commit are let through.
/// The first callback only arms the pacer.
pub struct FramePacer {
    target_fps: u32,
    /// Host timestamp of the last committed frame (or of arming).
    last_commit: Option<f64>,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps: target_fps.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE),
            last_commit: None,
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Minimum spacing between commits, in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }

    /// Change the rate. Takes effect on the next poll; the commit clock is
    /// left alone. Returns the clamped value actually applied.
    pub fn set_target_fps(&mut self, fps: u32) -> u32 {
        self.target_fps = fps.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
        self.target_fps
    }

    pub fn is_armed(&self) -> bool {
        self.last_commit.is_some()
    }

    pub fn poll(&mut self, now_ms: f64) -> Pace {
        match self.last_commit {
            None => {
                self.last_commit = Some(now_ms);
                Pace::Skip
            }
            Some(last) if now_ms - last >= self.interval_ms() => {
                self.last_commit = Some(now_ms);
                Pace::Commit
            }
            Some(_) => Pace::Skip,
        }
    }
}
