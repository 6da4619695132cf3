//! Background star cloud.
//!
//! A fixed set of points scattered through a cube around the origin, with
//! warm-white colours. The cloud as a whole turns slowly, one small step per
//! committed frame.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Vec2};

use crate::assets::config::StarfieldOptions;
use super::rng::Rng;

/// One background star. 6 floats = 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl StarPoint {
    pub const FLOATS: usize = 6;
}

pub struct Starfield {
    points: Vec<StarPoint>,
    /// Accumulated rotation about X and Y, radians.
    rotation: Vec2,
    spin: Vec2,
}

impl Starfield {
    pub fn generate(options: &StarfieldOptions) -> Self {
        let mut rng = Rng::new(options.seed);
        let extent = options.extent.abs();
        let points = (0..options.count)
            .map(|_| {
                let x = rng.range(-extent, extent);
                let y = rng.range(-extent, extent);
                let z = rng.range(-extent, extent);
                // Hues from red-violet to red, pale to white.
                let hue = rng.range(0.9, 1.0);
                let lightness = rng.range(0.5, 1.0);
                let [r, g, b] = hsl_to_rgb(hue, 0.5, lightness);
                StarPoint { x, y, z, r, g, b }
            })
            .collect();
        Self {
            points,
            rotation: Vec2::ZERO,
            spin: Vec2::new(options.spin_x, options.spin_y),
        }
    }

    /// Rotate by one frame's worth.
    pub fn advance(&mut self) {
        self.rotation += self.spin;
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }

    pub fn points(&self) -> &[StarPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// HSL (all components in [0, 1]) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> StarfieldOptions {
        StarfieldOptions { count: 500, extent: 100.0, ..Default::default() }
    }

    #[test]
    fn generates_requested_count_inside_cube() {
        let field = Starfield::generate(&small());
        assert_eq!(field.len(), 500);
        for p in field.points() {
            assert!(p.x.abs() <= 100.0 && p.y.abs() <= 100.0 && p.z.abs() <= 100.0);
            assert!(p.r >= p.b, "stars should be warm: {:?}", p);
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let a = Starfield::generate(&small());
        let b = Starfield::generate(&small());
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn advance_accumulates_spin() {
        let mut field = Starfield::generate(&StarfieldOptions { count: 0, ..Default::default() });
        assert!(field.is_empty());
        field.advance();
        field.advance();
        assert!((field.rotation().x - 0.0004).abs() < 1e-7);
        assert!((field.rotation().y - 0.001).abs() < 1e-7);
    }

    #[test]
    fn hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
        let grey = hsl_to_rgb(0.3, 0.0, 0.4);
        assert_eq!(grey, [0.4, 0.4, 0.4]);
        let white = hsl_to_rgb(0.95, 0.5, 1.0);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
    }
}
