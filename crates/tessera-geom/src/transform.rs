use glam::{Mat4, Quat, Vec3};

/// Placement of an object: scale, then rotate about `axis`, then translate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Unit rotation axis.
    pub axis: Vec3,
    /// Rotation angle in radians.
    pub angle: f32,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, axis: Vec3::Z, angle: 0.0, scale: Vec3::ONE }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::default() }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, axis: Vec3, angle: f32) -> Self {
        self.axis = axis;
        self.angle = angle;
        self
    }

    /// Sets the rotation from a quaternion. The quaternion is normalized first.
    pub fn with_quat(mut self, rotation: Quat) -> Self {
        let (axis, angle) = rotation.normalize().to_axis_angle();
        self.axis = axis;
        self.angle = angle;
        self
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }

    /// `T · R · S`.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_axis_angle(self.axis, self.angle)
            * Mat4::from_scale(self.scale)
    }

    /// `S⁻¹ · R(−angle) · T⁻¹`. Zero scale components give non-finite entries.
    pub fn inverse_model(&self) -> Mat4 {
        Mat4::from_scale(self.scale.recip())
            * Mat4::from_axis_angle(self.axis, -self.angle)
            * Mat4::from_translation(-self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_model_inverts_model() {
        let t = Transform::from_translation(Vec3::new(1.0, -2.0, 3.5))
            .with_rotation(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.7)
            .with_scale(Vec3::new(0.5, 2.0, 1.5));
        let product = t.model() * t.inverse_model();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        let product = t.inverse_model() * t.model();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform::from_translation(Vec3::X).with_scale(Vec3::splat(2.0));
        assert_eq!(t.model().transform_point3(Vec3::Y), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn quaternion_rotation_matches_the_model_matrix() {
        let q = Quat::from_rotation_y(0.9) * Quat::from_rotation_x(-0.4);
        let t = Transform::default().with_quat(q * 3.0);
        let p = Vec3::new(0.3, -1.2, 2.0);
        assert!(t.model().transform_point3(p).abs_diff_eq(q * p, 1e-5));
        assert!(t.rotation().mul_vec3(p).abs_diff_eq(q * p, 1e-5));
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform::default().model(), Mat4::IDENTITY);
    }
}
