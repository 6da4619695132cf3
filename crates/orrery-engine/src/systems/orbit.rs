//! Per-frame body animation.
//!
//! Orbital angle is a pure function of wall-clock time since the epoch, so
//! skipped or irregular frames never cause drift. Self-rotation is a
//! per-frame increment, matching the feel of a fixed spin speed.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::components::node::BodyNode;

/// Tracks the orbit epoch: the host timestamp at which orbital time is zero.
#[derive(Debug, Clone, Copy)]
pub struct OrbitClock {
    epoch: Option<f64>,
    /// Radians per millisecond per unit of angular speed.
    time_scale: f64,
}

impl OrbitClock {
    pub fn new(time_scale: f64) -> Self {
        Self { epoch: None, time_scale }
    }

    /// Fix the epoch if it is not already fixed.
    pub fn start(&mut self, now_ms: f64) {
        self.epoch.get_or_insert(now_ms);
    }

    pub fn epoch(&self) -> Option<f64> {
        self.epoch
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Milliseconds since the epoch; zero before it is fixed.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        self.epoch.map_or(0.0, |epoch| (now_ms - epoch).max(0.0))
    }
}

/// Angle swept since the epoch by a body with `angular_speed`, in [0, 2π).
pub fn swept_angle(angular_speed: f32, time_scale: f64, elapsed_ms: f64) -> f32 {
    // Accumulate in f64: elapsed times reach the millions of ms.
    (angular_speed as f64 * time_scale * elapsed_ms).rem_euclid(std::f64::consts::TAU) as f32
}

/// Point on the XZ plane at `angle` around the origin.
pub fn orbit_position(radius: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(cos * radius, 0.0, sin * radius)
}

/// Advance every node by one committed frame.
pub fn advance_bodies(nodes: &mut [BodyNode], clock: &OrbitClock, now_ms: f64) {
    let elapsed = clock.elapsed(now_ms);
    for node in nodes.iter_mut() {
        node.spin = (node.spin + node.angular_speed).rem_euclid(TAU);
        if node.is_star {
            continue;
        }
        let swept = swept_angle(node.angular_speed, clock.time_scale, elapsed);
        node.orbital_angle = (node.initial_phase + swept).rem_euclid(TAU);
        node.pos = orbit_position(node.orbital_radius, node.orbital_angle);
    }
}
