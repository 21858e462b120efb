//! Moving frame along Viviani's curve.

use core::f32::consts::PI;

use glam::Vec3;

use crate::jet::Jet;

type Jet1 = Jet<f32>;

/// Viviani's curve `(cos² s, cos s · sin s, sin s)` with `s = 2πt`, as jets in `t`.
fn viviani(t: f32) -> [Jet1; 3] {
    let s = Jet1::seed(t, 1.0) * (2.0 * PI);
    [s.cos().powf(2.0), s.cos() * s.sin(), s.sin()]
}

/// Position and orthonormal tangent / normal / binormal at one curve point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrenetFrame {
    pub position: Vec3,
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl FrenetFrame {
    /// Frame of Viviani's curve at parameter `t` (period 1).
    ///
    /// The normal is the acceleration with its tangential part removed, so the
    /// three axes stay orthogonal where the speed is not constant.
    pub fn at(t: f32) -> Self {
        let [x, y, z] = viviani(t);
        let position = Vec3::new(x.value, y.value, z.value);
        let velocity = Vec3::new(x.deriv, y.deriv, z.deriv);
        let accel = Vec3::new(x.deriv2, y.deriv2, z.deriv2);

        let tangent = velocity.normalize();
        let normal = (accel - tangent * accel.dot(tangent)).normalize();
        let binormal = tangent.cross(normal);

        Self { position, tangent, normal, binormal }
    }
}

/// Axis and angle rotating `+Y` onto the unit vector `dir`.
///
/// For `dir` parallel to `+Y` the axis is `+X` and the angle `0` or `π`.
pub fn align_y(dir: Vec3) -> (Vec3, f32) {
    let angle = Vec3::Y.dot(dir).clamp(-1.0, 1.0).acos();
    let axis = Vec3::Y.cross(dir);
    if axis.length_squared() < 1e-12 {
        return (Vec3::X, angle);
    }
    (axis.normalize(), angle)
}
