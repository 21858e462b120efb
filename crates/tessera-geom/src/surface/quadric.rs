use core::f32::consts::PI;

use crate::dual::Dual2;

use super::{DualVec3, ParamSurface};

/// Unit square in the XZ plane, `[-1, 1]²`.
#[derive(Debug, Copy, Clone, Default)]
pub struct PlaneXZ;

impl ParamSurface for PlaneXZ {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        DualVec3::new(u * 2.0 - 1.0, Dual2::constant(0.0), v * 2.0 - 1.0)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ParamSurface for Sphere {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = (u * 2.0 * PI, v * PI);
        DualVec3::new(
            u.cos() * v.sin() * self.radius,
            u.sin() * v.sin() * self.radius,
            v.cos() * self.radius,
        )
    }
}

/// Unit-radius cylinder around Y, height 2.
#[derive(Debug, Copy, Clone, Default)]
pub struct Cylinder;

impl ParamSurface for Cylinder {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let u = u * 2.0 * PI;
        DualVec3::new(u.cos(), v * 2.0 - 1.0, u.sin())
    }
}

/// Cone with apex at `y = 0.5` opening downwards.
#[derive(Debug, Copy, Clone)]
pub struct Cone {
    /// Full opening angle in radians.
    pub alpha: f32,
}

impl Cone {
    pub const fn new(alpha: f32) -> Self {
        Self { alpha }
    }
}

impl ParamSurface for Cone {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let u = u * 2.0 * PI;
        let k = (self.alpha * 0.5).tan();
        DualVec3::new(v * k * u.cos(), v * -1.0 + 0.5, v * k * u.sin())
    }
}

/// One-sheet hyperboloid around Y.
#[derive(Debug, Copy, Clone, Default)]
pub struct Hyperboloid;

impl ParamSurface for Hyperboloid {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = (u * 2.0 - 1.0, v * 2.0 * PI);
        DualVec3::new(u.cosh() * v.cos(), u.sinh(), u.cosh() * v.sin())
    }
}

/// `y = x² + z²` over a disc of radius 2.
#[derive(Debug, Copy, Clone, Default)]
pub struct Paraboloid;

impl ParamSurface for Paraboloid {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = (u * 2.0 * PI, v * 2.0);
        let x = v * u.cos();
        let z = v * u.sin();
        DualVec3::new(x, x * x + z * z, z)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Torus {
    /// Distance from the centre of the tube to the centre of the torus.
    pub major: f32,
    /// Tube radius.
    pub minor: f32,
}

impl Torus {
    pub const fn new(major: f32, minor: f32) -> Self {
        Self { major, minor }
    }
}

impl Default for Torus {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}

impl ParamSurface for Torus {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = (u * 2.0 * PI, v * 2.0 * PI);
        let d = u.cos() * self.minor + self.major;
        DualVec3::new(d * v.cos(), d * v.sin(), u.sin() * self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_spans_the_unit_square() {
        let p = PlaneXZ.vertex(0.0, 1.0).position;
        assert_eq!((p.x, p.y, p.z), (-1.0, 0.0, 1.0));
        assert_eq!(PlaneXZ.vertex(0.5, 0.5).normal.normalize().y.abs(), 1.0);
    }

    #[test]
    fn torus_points_stay_on_the_tube() {
        let t = Torus::default();
        for i in 0..10 {
            let p = t.vertex(i as f32 / 10.0, 0.37).position;
            let ring = (p.x * p.x + p.y * p.y).sqrt() - t.major;
            assert!(((ring * ring + p.z * p.z).sqrt() - t.minor).abs() < 1e-4);
        }
    }

    #[test]
    fn paraboloid_height_is_radius_squared() {
        let p = Paraboloid.vertex(0.3, 0.6).position;
        assert!((p.y - (p.x * p.x + p.z * p.z)).abs() < 1e-4);
    }

    #[test]
    fn cone_apex_is_at_half_height() {
        let apex = Cone::new(1.0).vertex(0.3, 0.0).position;
        assert_eq!(apex.y, 0.5);
        assert!(apex.x.abs() < 1e-6 && apex.z.abs() < 1e-6);
    }
}
