use core::f32::consts::PI;

use crate::dual::Dual2;

use super::{DualVec3, ParamSurface};

/// Möbius strip with centre radius 1 and width 0.5.
#[derive(Debug, Copy, Clone, Default)]
pub struct Mobius;

impl ParamSurface for Mobius {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        const R: f32 = 1.0;
        const WIDTH: f32 = 0.5;
        let (u, v) = (u * PI, (v - 0.5) * WIDTH);
        let d = u.cos() * v + R;
        DualVec3::new(d * (u * 2.0).cos(), d * (u * 2.0).sin(), u.sin() * v)
    }
}

/// Klein bottle.
///
/// The two halves of the bottle use different formulas, selected on the raw
/// value of `U`. The derivative is taken from whichever branch is active, so
/// normals are discontinuous along the seam at `U = π`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Klein;

impl ParamSurface for Klein {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = (u * 2.0 * PI, v * 2.0 * PI);
        let a = u.cos() * (u.sin() + 1.0) * 0.3;
        let b = u.sin() * 0.8;
        let c = u.cos() * -0.1 + 0.2;

        let (x, y) = if u.value > PI {
            (a + c * (v + PI).cos(), b)
        } else {
            (a + c * u.cos() * v.cos(), b + c * u.sin() * v.cos())
        };

        DualVec3::new(x, y, c * v.sin())
    }
}

/// Boy's surface (Apéry's parameterisation).
#[derive(Debug, Copy, Clone, Default)]
pub struct Boy;

impl ParamSurface for Boy {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = ((u - 0.5) * PI, v * PI);
        let r2 = 2.0f32.sqrt();
        let denom = ((u * 3.0).sin() * (v * 2.0).sin() * (-3.0 / r2) + 3.0) * 1.2;
        let cos_v2 = v.cos() * v.cos();
        DualVec3::new(
            ((u * 2.0).cos() * cos_v2 * r2 + u.cos() * (v * 2.0).sin()) / denom,
            ((u * 2.0).sin() * cos_v2 * r2 - u.sin() * (v * 2.0).sin()) / denom,
            (cos_v2 * 3.0) / denom,
        )
    }
}

/// Dini's twisted pseudosphere.
#[derive(Debug, Copy, Clone)]
pub struct Dini {
    pub a: f32,
    pub b: f32,
}

impl Default for Dini {
    fn default() -> Self {
        Self { a: 1.0, b: 0.15 }
    }
}

impl ParamSurface for Dini {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let (u, v) = (u * 4.0 * PI, v * (1.0 - 0.1) + 0.1);
        DualVec3::new(
            u.cos() * v.sin() * self.a,
            u.sin() * v.sin() * self.a,
            (v.cos() + (v / 2.0).tan().log()) * self.a + u * self.b + 3.0,
        )
    }
}

/// Pseudosphere generated by rotating a tractrix around Z.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tractricoid;

impl ParamSurface for Tractricoid {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        const HEIGHT: f32 = 3.0;
        let (u, v) = (u * HEIGHT, v * 2.0 * PI);
        DualVec3::new(v.cos() / u.cosh(), v.sin() / u.cosh(), u - u.tanh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn klein_branch_uses_the_raw_parameter() {
        // Just past the seam the y coordinate collapses to b = 0.8 sin U.
        let p = Klein.vertex(0.75, 0.3).position;
        let big_u = 0.75 * 2.0 * PI;
        assert!((p.y - big_u.sin() * 0.8).abs() < 1e-5);

        // The other half carries the c·sin U·cos V term.
        let q = Klein.vertex(0.25, 0.0).position;
        let big_u = 0.25 * 2.0 * PI;
        let c = big_u.cos() * -0.1 + 0.2;
        assert!((q.y - (big_u.sin() * 0.8 + c * big_u.sin())).abs() < 1e-5);
    }

    #[test]
    fn tractricoid_radius_shrinks_with_height() {
        let low = Tractricoid.vertex(0.1, 0.2).position;
        let high = Tractricoid.vertex(0.9, 0.2).position;
        assert!(high.z > low.z);
        assert!(high.truncate().length() < low.truncate().length());
    }

    #[test]
    fn mobius_centre_line_is_the_unit_circle() {
        for i in 0..8 {
            let p = Mobius.vertex(i as f32 / 8.0, 0.5).position;
            assert!((p.truncate().length() - 1.0).abs() < 1e-5);
            assert!(p.z.abs() < 1e-6);
        }
    }
}
