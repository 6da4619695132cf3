//! Focus (fly-to) state machine.
//!
//! Owns the camera whenever a body is focused or a fly animation is running.
//! The controller feeds it picks and close requests, then calls `advance`
//! once per committed frame with the live position of the target body.

use glam::Vec3;

use crate::api::types::BodyHandle;
use crate::assets::config::FocusOptions;
use crate::extensions::easing::Easing;
use crate::extensions::tween::Tween;
use crate::renderer::camera::CameraPose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    Free,
    TransitioningIn(BodyHandle),
    Focused(BodyHandle),
    TransitioningOut,
}

impl FocusPhase {
    /// Body the camera is flying to or resting on.
    pub fn target(self) -> Option<BodyHandle> {
        match self {
            FocusPhase::TransitioningIn(b) | FocusPhase::Focused(b) => Some(b),
            FocusPhase::Free | FocusPhase::TransitioningOut => None,
        }
    }

    pub fn is_animating(self) -> bool {
        matches!(self, FocusPhase::TransitioningIn(_) | FocusPhase::TransitioningOut)
    }
}

/// Emitted by `advance` when a transition settles. Each completed
/// transition yields exactly one signal; superseded ones yield none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    Entered(BodyHandle),
    Exited,
}

/// A body as seen by the focus machine at pick time.
#[derive(Debug, Clone, Copy)]
pub struct FocusTarget {
    pub body: BodyHandle,
    pub position: Vec3,
    pub is_star: bool,
}

/// What a pick did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickResponse {
    /// A new fly-in began (from rest or superseding another transition).
    Started(BodyHandle),
    /// The focused (or approaching) body was picked again: flying back out.
    Closing,
}

/// Result of advancing the machine by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusFrame {
    /// Pose the camera must take, or `None` when the free orbit owns it.
    pub pose: Option<CameraPose>,
    pub signal: Option<FocusSignal>,
}

pub struct FocusMachine {
    phase: FocusPhase,
    options: FocusOptions,
    easing: Easing,
    flight: Option<Tween<CameraPose>>,
    /// Camera offset from the target body, captured at pick time.
    offset: Vec3,
    /// Pose recorded before the first focus of the current session.
    return_pose: Option<CameraPose>,
}

impl FocusMachine {
    pub fn new(options: FocusOptions) -> Self {
        Self {
            phase: FocusPhase::Free,
            options,
            easing: Easing::CubicInOut,
            flight: None,
            offset: Vec3::ZERO,
            return_pose: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn return_pose(&self) -> Option<CameraPose> {
        self.return_pose
    }

    /// Handle a successful pick. `current` is the pose the user is looking at.
    pub fn pick(&mut self, target: FocusTarget, current: CameraPose, now_ms: f64) -> PickResponse {
        match self.phase {
            FocusPhase::TransitioningIn(b) | FocusPhase::Focused(b) if b == target.body => {
                self.begin_out(current, now_ms);
                PickResponse::Closing
            }
            _ => {
                if self.phase == FocusPhase::Free {
                    self.return_pose = Some(current);
                }
                self.begin_in(target, current, now_ms);
                PickResponse::Started(target.body)
            }
        }
    }

    /// Host-initiated close. Returns false when there is nothing to close.
    pub fn request_close(&mut self, current: CameraPose, now_ms: f64) -> bool {
        match self.phase {
            FocusPhase::TransitioningIn(_) | FocusPhase::Focused(_) => {
                self.begin_out(current, now_ms);
                true
            }
            FocusPhase::Free | FocusPhase::TransitioningOut => false,
        }
    }

    /// Step the active transition. `target_position` is the live position of
    /// the focus target, ignored when there is none.
    pub fn advance(&mut self, now_ms: f64, target_position: Vec3) -> FocusFrame {
        match self.phase {
            FocusPhase::Free => FocusFrame { pose: None, signal: None },
            FocusPhase::Focused(_) => FocusFrame {
                pose: Some(self.anchored_pose(target_position)),
                signal: None,
            },
            FocusPhase::TransitioningIn(body) => {
                let end = self.anchored_pose(target_position);
                let Some(flight) = self.flight.as_mut() else {
                    self.phase = FocusPhase::Focused(body);
                    return FocusFrame { pose: Some(end), signal: Some(FocusSignal::Entered(body)) };
                };
                flight.set_end(end);
                if flight.is_complete(now_ms) {
                    self.flight = None;
                    self.phase = FocusPhase::Focused(body);
                    log::debug!("focus settled on body {}", body.0);
                    FocusFrame { pose: Some(end), signal: Some(FocusSignal::Entered(body)) }
                } else {
                    FocusFrame { pose: Some(flight.sample(now_ms)), signal: None }
                }
            }
            FocusPhase::TransitioningOut => {
                let done = self.flight.as_ref().map_or(true, |f| f.is_complete(now_ms));
                if done {
                    let end = self.flight.take().map(|f| f.to()).or(self.return_pose);
                    self.phase = FocusPhase::Free;
                    self.return_pose = None;
                    log::debug!("focus released");
                    FocusFrame { pose: end, signal: Some(FocusSignal::Exited) }
                } else {
                    FocusFrame { pose: self.flight.as_ref().map(|f| f.sample(now_ms)), signal: None }
                }
            }
        }
    }

    /// Drop any transition without signalling.
    pub fn abandon(&mut self) {
        self.phase = FocusPhase::Free;
        self.flight = None;
        self.return_pose = None;
    }

    fn anchored_pose(&self, body_position: Vec3) -> CameraPose {
        CameraPose::new(body_position + self.offset, body_position)
    }

    fn begin_in(&mut self, target: FocusTarget, current: CameraPose, now_ms: f64) {
        let to_camera = current.position - target.position;
        let direction = to_camera.normalize_or(Vec3::Z);
        let preferred = if target.is_star {
            self.options.star_distance
        } else {
            self.options.body_distance
        };
        // Focusing only ever zooms in.
        let distance = preferred.min(to_camera.length());
        self.offset = direction * distance;

        let end = self.anchored_pose(target.position);
        self.flight = Some(Tween::new(current, end, now_ms, self.options.duration_ms, self.easing));
        self.phase = FocusPhase::TransitioningIn(target.body);
        log::debug!("focusing body {} from distance {:.2}", target.body.0, to_camera.length());
    }

    fn begin_out(&mut self, current: CameraPose, now_ms: f64) {
        let end = self.return_pose.unwrap_or(current);
        self.flight = Some(Tween::new(current, end, now_ms, self.options.duration_ms, self.easing));
        self.phase = FocusPhase::TransitioningOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn home() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO)
    }

    fn planet(body: u32, position: Vec3) -> FocusTarget {
        FocusTarget { body: BodyHandle(body), position, is_star: false }
    }

    fn machine() -> FocusMachine {
        FocusMachine::new(FocusOptions::default())
    }

    #[test]
    fn starts_free() {
        let mut m = machine();
        assert_eq!(m.phase(), FocusPhase::Free);
        let frame = m.advance(0.0, Vec3::ZERO);
        assert_eq!(frame, FocusFrame { pose: None, signal: None });
    }

    #[test]
    fn fly_in_lands_at_offset_and_signals_once() {
        let mut m = machine();
        let mars = Vec3::new(20.0, 0.0, 0.0);
        assert_eq!(m.pick(planet(4, mars), home(), 0.0), PickResponse::Started(BodyHandle(4)));
        assert_eq!(m.phase(), FocusPhase::TransitioningIn(BodyHandle(4)));

        let mid = m.advance(1000.0, mars);
        assert!(mid.signal.is_none());
        let mid_pose = mid.pose.unwrap();
        assert!(!mid_pose.approx_eq(&home(), EPS));

        let done = m.advance(2000.0, mars);
        assert_eq!(done.signal, Some(FocusSignal::Entered(BodyHandle(4))));
        let pose = done.pose.unwrap();
        assert!(pose.target.abs_diff_eq(mars, EPS));
        assert!(((pose.position - mars).length() - 8.0).abs() < EPS);
        // Offset points back toward where the camera came from.
        let expected_dir = (home().position - mars).normalize();
        assert!((pose.position - mars).normalize().abs_diff_eq(expected_dir, EPS));

        let later = m.advance(3000.0, mars);
        assert!(later.signal.is_none());
        assert_eq!(m.phase(), FocusPhase::Focused(BodyHandle(4)));
    }

    #[test]
    fn focused_pose_tracks_moving_body() {
        let mut m = machine();
        m.pick(planet(1, Vec3::new(8.0, 0.0, 0.0)), home(), 0.0);
        m.advance(2000.0, Vec3::new(8.0, 0.0, 0.0));
        let moved = Vec3::new(0.0, 0.0, 8.0);
        let pose = m.advance(2500.0, moved).pose.unwrap();
        assert!(pose.target.abs_diff_eq(moved, EPS));
        assert!(((pose.position - moved).length() - 8.0).abs() < EPS);
    }

    #[test]
    fn star_uses_its_own_distance_but_never_zooms_out() {
        let mut m = machine();
        let star = FocusTarget { body: BodyHandle(0), position: Vec3::ZERO, is_star: true };
        m.pick(star, home(), 0.0);
        let pose = m.advance(2000.0, Vec3::ZERO).pose.unwrap();
        assert!((pose.position.length() - 15.0).abs() < EPS);

        let mut m = machine();
        let close = CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        m.pick(star, close, 0.0);
        let pose = m.advance(2000.0, Vec3::ZERO).pose.unwrap();
        assert!((pose.position.length() - 10.0).abs() < EPS);
    }

    #[test]
    fn same_body_pick_closes_and_exits_once() {
        let mut m = machine();
        let mars = Vec3::new(20.0, 0.0, 0.0);
        m.pick(planet(4, mars), home(), 0.0);
        let focused = m.advance(2000.0, mars).pose.unwrap();

        assert_eq!(m.pick(planet(4, mars), focused, 2100.0), PickResponse::Closing);
        assert_eq!(m.phase(), FocusPhase::TransitioningOut);
        assert!(m.advance(3000.0, mars).signal.is_none());

        let done = m.advance(4100.0, mars);
        assert_eq!(done.signal, Some(FocusSignal::Exited));
        assert!(done.pose.unwrap().approx_eq(&home(), EPS));
        assert_eq!(m.phase(), FocusPhase::Free);
        assert!(m.advance(5000.0, mars).signal.is_none());
    }

    #[test]
    fn close_mid_flight_returns_to_captured_pose() {
        let mut m = machine();
        let mars = Vec3::new(20.0, 0.0, 0.0);
        m.pick(planet(4, mars), home(), 0.0);
        let mid = m.advance(500.0, mars).pose.unwrap();
        assert!(m.request_close(mid, 500.0));
        let done = m.advance(2500.0, mars);
        assert_eq!(done.signal, Some(FocusSignal::Exited));
        assert!(done.pose.unwrap().approx_eq(&home(), EPS));
    }

    #[test]
    fn other_body_supersedes_without_signal_and_keeps_return_pose() {
        let mut m = machine();
        let a = Vec3::new(8.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, -12.0);
        m.pick(planet(1, a), home(), 0.0);
        let mid = m.advance(700.0, a);
        assert!(mid.signal.is_none());

        assert_eq!(m.pick(planet(2, b), mid.pose.unwrap(), 700.0), PickResponse::Started(BodyHandle(2)));
        assert_eq!(m.return_pose(), Some(home()));

        // The old flight's end time passes silently.
        assert!(m.advance(2000.0, b).signal.is_none());
        let settled = m.advance(2700.0, b);
        assert_eq!(settled.signal, Some(FocusSignal::Entered(BodyHandle(2))));
    }

    #[test]
    fn pick_during_fly_out_restarts_fly_in() {
        let mut m = machine();
        let a = Vec3::new(8.0, 0.0, 0.0);
        m.pick(planet(1, a), home(), 0.0);
        let focused = m.advance(2000.0, a).pose.unwrap();
        m.request_close(focused, 2000.0);
        let mid = m.advance(2500.0, a).pose.unwrap();
        m.pick(planet(1, a), mid, 2500.0);
        assert_eq!(m.phase(), FocusPhase::TransitioningIn(BodyHandle(1)));
        assert_eq!(m.return_pose(), Some(home()));
        assert_eq!(m.advance(4500.0, a).signal, Some(FocusSignal::Entered(BodyHandle(1))));
    }

    #[test]
    fn request_close_when_free_is_ignored() {
        let mut m = machine();
        assert!(!m.request_close(home(), 0.0));
        assert_eq!(m.phase(), FocusPhase::Free);
    }

    #[test]
    fn abandon_is_silent() {
        let mut m = machine();
        m.pick(planet(1, Vec3::X * 8.0), home(), 0.0);
        m.abandon();
        assert_eq!(m.phase(), FocusPhase::Free);
        assert!(m.advance(5000.0, Vec3::ZERO).signal.is_none());
    }

    #[test]
    fn phase_helpers() {
        assert_eq!(FocusPhase::Focused(BodyHandle(3)).target(), Some(BodyHandle(3)));
        assert_eq!(FocusPhase::TransitioningOut.target(), None);
        assert!(FocusPhase::TransitioningOut.is_animating());
        assert!(!FocusPhase::Focused(BodyHandle(3)).is_animating());
    }
}
