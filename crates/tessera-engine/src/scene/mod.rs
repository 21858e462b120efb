//! 3D scene model: camera, lights, materials and the objects drawn with them.
//!
//! The scene owns no GPU state beyond shared handles to meshes and textures;
//! [`crate::render::SurfaceRenderer`] turns it into draw calls each frame.

mod camera;
mod light;
mod material;
mod object;

pub use camera::Camera;
pub use light::Light;
pub use material::Material;
pub use object::{Animation, Object, ShaderKind};

/// Number of light slots in the frame uniform.
pub const MAX_LIGHTS: usize = 8;

/// Ordered objects lit by up to [`MAX_LIGHTS`] lights and seen through one camera.
#[derive(Default)]
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self { camera, lights: Vec::new(), objects: Vec::new() }
    }

    pub fn push(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Advances every object's animation to the interval `[tstart, tend]`.
    pub fn animate(&mut self, tstart: f32, tend: f32) {
        for obj in &mut self.objects {
            obj.animate(tstart, tend);
        }
    }

    /// Lights that fit into the frame uniform; extra lights are ignored.
    pub fn active_lights(&self) -> &[Light] {
        &self.lights[..self.lights.len().min(MAX_LIGHTS)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn lights_beyond_the_limit_are_dropped() {
        let mut scene = Scene::default();
        for i in 0..11 {
            scene.lights.push(Light::point(Vec3::splat(i as f32), Vec3::ZERO, Vec3::ONE));
        }
        let active = scene.active_lights();
        assert_eq!(active.len(), MAX_LIGHTS);
        assert_eq!(active[7].w_light_pos.x, 7.0);
    }
}
