use glam::{Vec3, Vec4};

/// Light source. `w_light_pos.w == 0` makes it directional, `1` a point light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    /// Ambient intensity.
    pub la: Vec3,
    /// Emitted intensity.
    pub le: Vec3,
    /// Homogeneous world position (or direction towards the light).
    pub w_light_pos: Vec4,
}

impl Light {
    pub fn directional(towards: Vec3, la: Vec3, le: Vec3) -> Self {
        Self { la, le, w_light_pos: towards.extend(0.0) }
    }

    pub fn point(position: Vec3, la: Vec3, le: Vec3) -> Self {
        Self { la, le, w_light_pos: position.extend(1.0) }
    }
}
