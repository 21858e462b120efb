//! Arcball rotation.
//!
//! Pointer positions in normalized device coordinates are lifted onto the
//! unit sphere facing the viewer. Dragging across the sphere produces the
//! quaternion that carries the previous lifted point onto the current one.

use glam::{Quat, Vec2, Vec3};

/// Radians of spin per NDC unit of horizontal pointer motion in
/// [`ArcballMode::Axial`].
pub const AXIAL_SENSITIVITY: f32 = 3.0;

/// Rotation axes shorter than this are treated as "no motion".
const MIN_AXIS: f32 = 1e-4;

/// Lifts `ndc` onto the front hemisphere. Points outside the unit disc land
/// on its rim with `z = 0`.
pub fn project(ndc: Vec2) -> Vec3 {
    let len2 = ndc.length_squared();
    if len2 <= 1.0 {
        ndc.extend((1.0 - len2).sqrt())
    } else {
        ndc.normalize().extend(0.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArcballMode {
    /// Spin about the point grabbed at the start of the gesture.
    Axial,
    /// Roll the ball so the grabbed point follows the pointer.
    Drag,
}

/// One pointer gesture on the ball.
#[derive(Debug, Copy, Clone)]
pub struct Arcball {
    mode: ArcballMode,
    start: Vec3,
    prev: Vec3,
    prev_x: f32,
}

impl Arcball {
    pub fn begin(mode: ArcballMode, ndc: Vec2) -> Self {
        let p = project(ndc);
        Self { mode, start: p, prev: p, prev_x: ndc.x }
    }

    pub fn mode(&self) -> ArcballMode {
        self.mode
    }

    /// Unit direction of the current rotation axis.
    pub fn axis(&self) -> Vec3 {
        match self.mode {
            ArcballMode::Axial => self.start,
            ArcballMode::Drag => self.prev,
        }
    }

    /// Incremental rotation for a pointer move to `ndc`, or `None` when the
    /// move does not define an axis. Apply as `delta * orientation`.
    pub fn drag(&mut self, ndc: Vec2) -> Option<Quat> {
        let curr = project(ndc);
        let (axis, angle) = match self.mode {
            ArcballMode::Axial => {
                let angle = (ndc.x - self.prev_x) * AXIAL_SENSITIVITY;
                self.prev_x = ndc.x;
                (self.start, angle)
            }
            ArcballMode::Drag => {
                (self.prev.cross(curr), self.prev.dot(curr).clamp(-1.0, 1.0).acos())
            }
        };
        self.prev = curr;

        let len = axis.length();
        if len < MIN_AXIS || angle == 0.0 {
            return None;
        }
        Some(Quat::from_axis_angle(axis / len, angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_inside_the_disc_land_on_the_unit_sphere() {
        for ndc in [Vec2::ZERO, Vec2::new(0.3, -0.4), Vec2::new(-0.7, 0.7)] {
            let p = project(ndc);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert!(p.z >= 0.0);
            assert_eq!(p.truncate(), ndc);
        }
    }

    #[test]
    fn points_outside_the_disc_land_on_the_rim() {
        let p = project(Vec2::new(3.0, 4.0));
        assert!(p.abs_diff_eq(Vec3::new(0.6, 0.8, 0.0), 1e-6));
    }

    #[test]
    fn drag_carries_the_grabbed_point_onto_the_pointer() {
        let a = Vec2::new(0.1, 0.2);
        let b = Vec2::new(-0.3, 0.5);
        let mut ball = Arcball::begin(ArcballMode::Drag, a);
        let q = ball.drag(b).unwrap();
        assert!((q * project(a)).abs_diff_eq(project(b), 1e-5));
        assert!(ball.axis().abs_diff_eq(project(b), 1e-6));
    }

    #[test]
    fn axial_spin_keeps_the_grabbed_axis_fixed() {
        let grab = Vec2::new(0.2, -0.1);
        let mut ball = Arcball::begin(ArcballMode::Axial, grab);
        let q = ball.drag(Vec2::new(0.5, 0.4)).unwrap();

        let axis = project(grab);
        assert!((q * axis).abs_diff_eq(axis, 1e-5));
        assert!((q.angle_between(Quat::IDENTITY) - 0.3 * AXIAL_SENSITIVITY).abs() < 1e-4);
        assert!(ball.axis().abs_diff_eq(axis, 1e-6));
    }

    #[test]
    fn staying_put_gives_no_rotation() {
        let p = Vec2::new(0.4, 0.1);
        assert!(Arcball::begin(ArcballMode::Drag, p).drag(p).is_none());
        assert!(Arcball::begin(ArcballMode::Axial, p).drag(p).is_none());
    }
}
