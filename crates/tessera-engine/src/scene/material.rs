use glam::Vec3;

/// Phong reflectance coefficients.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    /// Diffuse.
    pub kd: Vec3,
    /// Specular.
    pub ks: Vec3,
    /// Ambient.
    pub ka: Vec3,
    pub shininess: f32,
}

impl Material {
    pub const fn new(kd: Vec3, ks: Vec3, ka: Vec3, shininess: f32) -> Self {
        Self { kd, ks, ka, shininess }
    }

    /// Matte material with no specular term.
    pub fn matte(kd: Vec3, ka: Vec3) -> Self {
        Self::new(kd, Vec3::ZERO, ka, 1.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::splat(0.6), Vec3::splat(0.3), Vec3::splat(0.2), 20.0)
    }
}
