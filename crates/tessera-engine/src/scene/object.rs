use std::rc::Rc;

use glam::Vec3;
use tessera_geom::Transform;

use crate::render::{GpuMesh, GpuTexture};

use super::Material;

/// Shading model used to draw an object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    /// Per-pixel Blinn–Phong.
    Phong,
    /// Per-vertex radiance.
    Gouraud,
    /// Two-tone shading with a dark silhouette.
    Npr,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 3] = [ShaderKind::Phong, ShaderKind::Gouraud, ShaderKind::Npr];

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            ShaderKind::Phong => 0,
            ShaderKind::Gouraud => 1,
            ShaderKind::Npr => 2,
        }
    }
}

/// Time-driven change of an object's transform.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Animation {
    #[default]
    Static,
    /// Rotation about `axis` with `angle = rate · t` for absolute time `t`.
    Spin { axis: Vec3, rate: f32 },
}

impl Animation {
    /// Default spin of the gallery objects.
    pub const SPIN: Animation = Animation::Spin { axis: Vec3::new(1.0, 1.0, -1.0), rate: 0.8 };

    /// Updates `transform` for the interval `[tstart, tend]` of wall-clock seconds.
    pub fn apply(&self, transform: &mut Transform, _tstart: f32, tend: f32) {
        match *self {
            Animation::Static => {}
            Animation::Spin { axis, rate } => {
                transform.axis = axis.normalize_or(Vec3::Y);
                transform.angle = rate * tend;
            }
        }
    }
}

/// Drawable: shared mesh, material, optional texture, placement.
pub struct Object {
    pub shader: ShaderKind,
    pub material: Material,
    pub texture: Option<Rc<GpuTexture>>,
    pub mesh: Rc<GpuMesh>,
    pub transform: Transform,
    pub animation: Animation,
    /// Draw edges only. Needs `Features::POLYGON_MODE_LINE`; filled otherwise.
    pub wireframe: bool,
    /// Also draw each vertex normal as a short line segment.
    pub show_normals: bool,
}

impl Object {
    pub fn new(shader: ShaderKind, material: Material, mesh: Rc<GpuMesh>) -> Self {
        Self {
            shader,
            material,
            texture: None,
            mesh,
            transform: Transform::default(),
            animation: Animation::Static,
            wireframe: false,
            show_normals: false,
        }
    }

    pub fn with_texture(mut self, texture: Rc<GpuTexture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn animate(&mut self, tstart: f32, tend: f32) {
        self.animation.apply(&mut self.transform, tstart, tend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_angle_follows_absolute_time() {
        let mut t = Transform::default();
        Animation::SPIN.apply(&mut t, 0.0, 2.5);
        assert!((t.angle - 2.0).abs() < 1e-6);
        assert!((t.axis.length() - 1.0).abs() < 1e-6);

        // A long frame does not accumulate: only the end time matters.
        Animation::SPIN.apply(&mut t, 1.0, 2.5);
        assert!((t.angle - 2.0).abs() < 1e-6);
    }

    #[test]
    fn spin_angle_does_not_depend_on_frame_count() {
        let mut once = Transform::default();
        Animation::SPIN.apply(&mut once, 0.0, 3.0);

        let mut stepped = Transform::default();
        let mut tstart = 0.0;
        for k in 1..=30 {
            let tend = 3.0 * k as f32 / 30.0;
            Animation::SPIN.apply(&mut stepped, tstart, tend);
            tstart = tend;
        }

        assert!((once.angle - stepped.angle).abs() < 1e-5);
        assert_eq!(once.axis, stepped.axis);
    }

    #[test]
    fn static_objects_stay_put() {
        let mut t = Transform::from_translation(Vec3::X);
        Animation::Static.apply(&mut t, 0.0, 10.0);
        assert_eq!(t, Transform::from_translation(Vec3::X));
    }
}
