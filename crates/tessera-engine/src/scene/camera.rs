use glam::{Mat4, Vec3};

/// Perspective camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub w_eye: Vec3,
    pub w_lookat: Vec3,
    pub w_vup: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub asp: f32,
    /// Front clipping plane distance.
    pub fp: f32,
    /// Back clipping plane distance.
    pub bp: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            w_eye: Vec3::new(0.0, 0.0, 4.0),
            w_lookat: Vec3::ZERO,
            w_vup: Vec3::Y,
            fov: 45f32.to_radians(),
            asp: 1.0,
            fp: 1.0,
            bp: 20.0,
        }
    }
}

impl Camera {
    /// Camera at `eye` looking at the origin.
    pub fn looking_at_origin(eye: Vec3, fov_degrees: f32) -> Self {
        Self { w_eye: eye, fov: fov_degrees.to_radians(), ..Self::default() }
    }

    pub fn with_clip(mut self, fp: f32, bp: f32) -> Self {
        self.fp = fp;
        self.bp = bp;
        self
    }

    /// World-to-eye transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.w_eye, self.w_lookat, self.w_vup)
    }

    /// Eye-to-clip transform with depth mapped to `[0, 1]`.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.asp, self.fp, self.bp)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_puts_the_eye_at_the_origin_looking_down_negative_z() {
        let cam = Camera::looking_at_origin(Vec3::new(0.0, 5.0, 27.0), 45.0);
        let v = cam.view();
        assert!(v.transform_point3(cam.w_eye).length() < 1e-4);
        let target = v.transform_point3(cam.w_lookat);
        assert!(target.x.abs() < 1e-4 && target.y.abs() < 1e-4);
        assert!(target.z < 0.0);
    }

    #[test]
    fn clip_planes_map_to_the_depth_range() {
        let cam = Camera::default().with_clip(1.0, 40.0);
        let p = cam.projection();
        assert!(p.project_point3(Vec3::new(0.0, 0.0, -1.0)).z.abs() < 1e-5);
        assert!((p.project_point3(Vec3::new(0.0, 0.0, -40.0)).z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn lookat_projects_to_the_screen_centre() {
        let cam = Camera::looking_at_origin(Vec3::new(0.0, 1.0, 5.0), 40.0);
        let ndc = cam.view_projection().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
