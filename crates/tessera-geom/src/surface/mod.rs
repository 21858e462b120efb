//! Parametric surfaces.
//!
//! Every surface maps the unit parameter square `(u, v) ∈ [0, 1]²` to a point
//! in 3D. The parameters arrive as [`Dual2`] values already seeded with the
//! identity derivatives, so the derivative parts of the result are exactly
//! the Jacobian columns `∂r/∂u` and `∂r/∂v`.
//!
//! Adding a surface:
//! - implement [`ParamSurface::eval`] using the dual-number operators
//! - remap `u`/`v` to the surface's own parameter range inside `eval`
//! - override [`ParamSurface::texcoord`] only if the default `(u, v)` is wrong

mod exotic;
mod freeform;
mod quadric;
mod sweep;

use core::ops::Add;

use glam::{Vec2, Vec3};

use crate::dual::Dual2;
use crate::vertex::SurfaceVertex;

pub use exotic::{Boy, Dini, Klein, Mobius, Tractricoid};
pub use freeform::BezierSurface;
pub use quadric::{Cone, Cylinder, Hyperboloid, Paraboloid, PlaneXZ, Sphere, Torus};
pub use sweep::{
    Arrow, Churros, ChurrosSpine, Circle, Extruded, Flag, Heart, HeartMeridian, Meridian, Profile,
    RippledCircle, Rotated, Spine, VivianiSpine, VivianiTube,
};

/// A 3D point whose coordinates carry `(∂/∂u, ∂/∂v)`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DualVec3 {
    pub x: Dual2,
    pub y: Dual2,
    pub z: Dual2,
}

impl DualVec3 {
    #[inline]
    pub fn new(x: Dual2, y: Dual2, z: Dual2) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x.value, self.y.value, self.z.value)
    }

    /// `∂r/∂u`.
    #[inline]
    pub fn tangent_u(&self) -> Vec3 {
        Vec3::new(self.x.deriv.x, self.y.deriv.x, self.z.deriv.x)
    }

    /// `∂r/∂v`.
    #[inline]
    pub fn tangent_v(&self) -> Vec3 {
        Vec3::new(self.x.deriv.y, self.y.deriv.y, self.z.deriv.y)
    }
}

impl Add for DualVec3 {
    type Output = Self;
    #[inline]
    fn add(self, r: Self) -> Self {
        Self { x: self.x + r.x, y: self.y + r.y, z: self.z + r.z }
    }
}

/// Closed-form parametric surface.
pub trait ParamSurface {
    /// Evaluates the surface at seeded parameters.
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3;

    /// Texture coordinate for the sample at `(u, v)`.
    fn texcoord(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(u, v)
    }

    /// Position, raw normal `∂r/∂u × ∂r/∂v` and texture coordinate at `(u, v)`.
    fn vertex(&self, u: f32, v: f32) -> SurfaceVertex {
        let r = self.eval(Dual2::u(u), Dual2::v(v));
        SurfaceVertex::new(
            r.position(),
            r.tangent_u().cross(r.tangent_v()),
            self.texcoord(u, v),
        )
    }
}

impl<S: ParamSurface + ?Sized> ParamSurface for &S {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        (**self).eval(u, v)
    }

    fn texcoord(&self, u: f32, v: f32) -> Vec2 {
        (**self).texcoord(u, v)
    }
}

impl<S: ParamSurface + ?Sized> ParamSurface for Box<S> {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        (**self).eval(u, v)
    }

    fn texcoord(&self, u: f32, v: f32) -> Vec2 {
        (**self).texcoord(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 1e-3;

    fn finite_difference_normal(s: &dyn ParamSurface, u: f32, v: f32) -> Vec3 {
        let p = |u, v| s.eval(Dual2::constant(u), Dual2::constant(v)).position();
        let du = (p(u + H, v) - p(u - H, v)) / (2.0 * H);
        let dv = (p(u, v + H) - p(u, v - H)) / (2.0 * H);
        du.cross(dv)
    }

    fn assert_normals_match(name: &str, s: &dyn ParamSurface, grid: &[(f32, f32)]) {
        for &(u, v) in grid {
            let auto = s.vertex(u, v).normal;
            let fd = finite_difference_normal(s, u, v);
            let tol = 2e-2 * (1.0 + fd.length());
            assert!(
                (auto - fd).length() <= tol,
                "{name} at ({u}, {v}): autodiff {auto:?} vs finite difference {fd:?}"
            );
        }
    }

    fn interior_grid() -> Vec<(f32, f32)> {
        let mut g = Vec::new();
        for i in 1..6 {
            for j in 1..6 {
                g.push((i as f32 / 6.0 + 0.013, j as f32 / 6.0 + 0.007));
            }
        }
        g
    }

    fn bezier_patch() -> BezierSurface {
        use rand::SeedableRng;
        BezierSurface::random_heights(4, 4, &mut rand::rngs::StdRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn normals_match_finite_differences() {
        let grid = interior_grid();
        let surfaces: Vec<(&str, Box<dyn ParamSurface>)> = vec![
            ("plane", Box::new(PlaneXZ)),
            ("sphere", Box::new(Sphere::default())),
            ("cylinder", Box::new(Cylinder)),
            ("cone", Box::new(Cone::new(1.0))),
            ("hyperboloid", Box::new(Hyperboloid)),
            ("paraboloid", Box::new(Paraboloid)),
            ("torus", Box::new(Torus::default())),
            ("mobius", Box::new(Mobius)),
            ("boy", Box::new(Boy)),
            ("dini", Box::new(Dini::default())),
            ("tractricoid", Box::new(Tractricoid)),
            ("churros", Box::new(Churros::new(0.4))),
            ("heart", Box::new(Heart::default())),
            ("viviani", Box::new(VivianiTube::new(0.05))),
            ("flag", Box::new(Flag::new(0.7))),
            ("bezier", Box::new(bezier_patch())),
        ];

        for (name, s) in &surfaces {
            assert_normals_match(name, s.as_ref(), &grid);
        }
    }

    #[test]
    fn branched_surfaces_match_away_from_the_seam() {
        // Klein switches formula at U = π (u = 0.5), the arrow at v = 0.8.
        let klein: Vec<_> = interior_grid().into_iter().filter(|(u, _)| (u - 0.5).abs() > 0.05).collect();
        assert_normals_match("klein", &Klein, &klein);

        let arrow: Vec<_> = interior_grid().into_iter().filter(|(_, v)| (v - 0.8).abs() > 0.05).collect();
        assert_normals_match("arrow", &Arrow, &arrow);
    }

    #[test]
    fn sphere_points_lie_on_the_sphere() {
        let s = Sphere::new(2.0);
        for (u, v) in interior_grid() {
            let p = s.vertex(u, v).position;
            assert!((p.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_normal_points_along_the_radius() {
        let s = Sphere::default();
        let vtx = s.vertex(0.3, 0.4);
        let n = vtx.normal.normalize();
        assert!(n.dot(vtx.position).abs() > 0.999);
    }

    #[test]
    fn normal_is_not_normalized() {
        // ∂r/∂u has length 2π·sin(πv), ∂r/∂v has length π on the unit sphere.
        let v = 0.5;
        let n = Sphere::default().vertex(0.25, v).normal;
        let expected = 2.0 * core::f32::consts::PI * core::f32::consts::PI;
        assert!((n.length() - expected).abs() < 1e-2);
    }

    #[test]
    fn default_texcoord_is_the_parameter() {
        assert_eq!(Torus::default().vertex(0.2, 0.9).texcoord, Vec2::new(0.2, 0.9));
    }
}
