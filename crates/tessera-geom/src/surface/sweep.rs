//! Surfaces assembled from lower-dimensional pieces: a profile swept along a
//! spine, or a meridian curve revolved around Y.

use core::f32::consts::PI;

use glam::Vec2;

use crate::dual::Dual2;

use super::{DualVec3, ParamSurface};

/// Path along which a profile is carried, parameterised by `v`.
pub trait Spine {
    fn spine(&self, v: Dual2) -> DualVec3;
}

/// Cross-section added to every spine point, parameterised by `u`.
pub trait Profile {
    fn profile(&self, u: Dual2) -> DualVec3;
}

/// `r(u, v) = spine(v) + profile(u)`.
///
/// The profile is not reoriented along the spine, so it keeps its plane.
#[derive(Debug, Copy, Clone)]
pub struct Extruded<S, P> {
    pub spine: S,
    pub profile: P,
}

impl<S: Spine, P: Profile> ParamSurface for Extruded<S, P> {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        self.spine.spine(v) + self.profile.profile(u)
    }
}

/// Planar curve `(radius(u), height(u))` to be revolved around Y.
pub trait Meridian {
    fn meridian(&self, u: Dual2) -> (Dual2, Dual2);
}

/// Surface of revolution: the meridian swept through `V = 2πv` around Y.
#[derive(Debug, Copy, Clone, Default)]
pub struct Rotated<M> {
    pub meridian: M,
}

impl<M: Meridian> ParamSurface for Rotated<M> {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let v = v * 2.0 * PI;
        let (px, py) = self.meridian.meridian(u);
        DualVec3::new(px * v.cos(), py, px * v.sin())
    }
}

// ── profiles ──────────────────────────────────────────────────────────────

/// Circle of `radius` in the XZ plane.
#[derive(Debug, Copy, Clone)]
pub struct Circle {
    pub radius: f32,
}

impl Profile for Circle {
    fn profile(&self, u: Dual2) -> DualVec3 {
        let u = u * 2.0 * PI;
        DualVec3::new(u.cos() * self.radius, Dual2::constant(0.0), u.sin() * self.radius)
    }
}

/// Circle whose radius ripples six times around the loop.
#[derive(Debug, Copy, Clone)]
pub struct RippledCircle {
    pub radius: f32,
}

impl Profile for RippledCircle {
    fn profile(&self, u: Dual2) -> DualVec3 {
        let u = u * 2.0 * PI;
        let m = (u * 6.0).cos() * 0.1 + 1.0;
        DualVec3::new(
            u.cos() * self.radius * m,
            Dual2::constant(0.0),
            u.sin() * self.radius * m,
        )
    }
}

// ── spines ────────────────────────────────────────────────────────────────

/// Tangent-shaped arc in the XY plane.
#[derive(Debug, Copy, Clone, Default)]
pub struct ChurrosSpine;

impl Spine for ChurrosSpine {
    fn spine(&self, v: Dual2) -> DualVec3 {
        let v = (v - 0.5) * PI * 0.7;
        DualVec3::new(v / 0.7 / PI * 2.0, v.tan() / 2.0, Dual2::constant(0.0))
    }
}

/// Viviani's curve: the intersection of a sphere and a cylinder.
#[derive(Debug, Copy, Clone, Default)]
pub struct VivianiSpine;

impl Spine for VivianiSpine {
    fn spine(&self, v: Dual2) -> DualVec3 {
        let v = v * 2.0 * PI;
        DualVec3::new(v.cos().powf(2.0), v.cos() * v.sin(), v.sin())
    }
}

pub type Churros = Extruded<ChurrosSpine, RippledCircle>;

impl Churros {
    pub fn new(radius: f32) -> Self {
        Self { spine: ChurrosSpine, profile: RippledCircle { radius } }
    }
}

/// Thin tube following Viviani's curve.
pub type VivianiTube = Extruded<VivianiSpine, Circle>;

impl VivianiTube {
    pub fn new(radius: f32) -> Self {
        Self { spine: VivianiSpine, profile: Circle { radius } }
    }
}

// ── meridians ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default)]
pub struct HeartMeridian;

impl Meridian for HeartMeridian {
    fn meridian(&self, u: Dual2) -> (Dual2, Dual2) {
        let u = u * 2.0 * PI;
        let px = u.sin().powf(3.0);
        let py = (u.cos() * 13.0 - (u * 2.0).cos() * 5.0 - (u * 3.0).cos() * 2.0 - (u * 4.0).cos())
            / 12.0;
        (px, py)
    }
}

pub type Heart = Rotated<HeartMeridian>;

// ── special shapes ────────────────────────────────────────────────────────

/// Arrow glyph along +Y, spanning `y ∈ [-1, 1]`: a shaft below `v = 0.8`
/// and a cone head above it.
///
/// The shaft/head split is decided on the raw value of `v`; the derivative of
/// each piece is used as-is at the joint.
#[derive(Debug, Copy, Clone, Default)]
pub struct Arrow;

impl Arrow {
    const SHAFT_HEIGHT: f32 = 0.8;
    const SHAFT_WIDTH: f32 = 0.5;
    const RADIUS: f32 = 0.6;
}

impl ParamSurface for Arrow {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let u = u * 2.0 * PI;

        if v.value < Self::SHAFT_HEIGHT {
            let r = Self::RADIUS * Self::SHAFT_WIDTH;
            DualVec3::new(u.cos() * r, v * 2.0 - 1.0, u.sin() * r)
        } else {
            let v = (v - Self::SHAFT_HEIGHT) * (1.0 / (1.0 - Self::SHAFT_HEIGHT)) * -1.0 + 1.0;
            DualVec3::new(
                v * u.cos() * Self::RADIUS,
                v * 2.0 * (1.0 - Self::SHAFT_HEIGHT) * -1.0 + 1.0,
                v * u.sin() * Self::RADIUS,
            )
        }
    }
}

/// Rectangular flag waving along X: `z = depth · sin(u·waves + phase)`.
///
/// Spans `[0, width] × [0, height]`; the owner is expected to centre it.
#[derive(Debug, Copy, Clone)]
pub struct Flag {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub waves: f32,
    pub phase: f32,
}

impl Flag {
    pub fn new(phase: f32) -> Self {
        Self { width: 2.0, height: 1.5, depth: 0.5, waves: 3.0, phase }
    }
}

impl ParamSurface for Flag {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let angle = u * self.waves + self.phase;
        DualVec3::new(u * self.width, v * self.height, angle.sin() * self.depth)
    }

    /// Images are stored top row first.
    fn texcoord(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(u, 1.0 - v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extruded_surface_is_spine_plus_profile() {
        let tube = VivianiTube::new(0.1);
        let at = tube.vertex(0.0, 0.0).position;
        // spine(0) = (1, 0, 0), profile(0) = (0.1, 0, 0)
        assert!((at.x - 1.1).abs() < 1e-6);
        assert!(at.y.abs() < 1e-6 && at.z.abs() < 1e-6);
    }

    #[test]
    fn arrow_tip_sits_at_the_top() {
        let tip = Arrow.vertex(0.2, 1.0).position;
        assert!((tip.y - 1.0).abs() < 1e-6);
        assert!(tip.x.abs() < 1e-6 && tip.z.abs() < 1e-6);

        let base = Arrow.vertex(0.0, 0.0).position;
        assert_eq!(base.y, -1.0);
        assert!((base.x - 0.3).abs() < 1e-6);
    }

    #[test]
    fn arrow_head_starts_wider_than_the_shaft() {
        let shaft = Arrow.vertex(0.0, 0.79).position;
        let head = Arrow.vertex(0.0, 0.8).position;
        assert!(head.x > shaft.x);
        // Both pieces meet at y = 0.6.
        assert!((head.y - 0.6).abs() < 1e-5);
        assert!((shaft.y - 0.58).abs() < 1e-5);
    }

    #[test]
    fn flag_flips_v_for_texturing() {
        let f = Flag::new(0.0);
        assert_eq!(f.vertex(0.25, 0.0).texcoord, Vec2::new(0.25, 1.0));
        let p = f.vertex(1.0, 1.0).position;
        assert_eq!((p.x, p.y), (2.0, 1.5));
        assert!((p.z - 0.5 * 3.0f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn heart_revolves_around_y() {
        let h = Heart::default();
        let a = h.vertex(0.2, 0.0).position;
        let b = h.vertex(0.2, 0.5).position;
        assert!((a.y - b.y).abs() < 1e-6);
        assert!((a.x + b.x).abs() < 1e-5);
    }
}
