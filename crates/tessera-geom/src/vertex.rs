use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One tessellated surface sample, uploaded to the GPU as-is.
///
/// `normal` is the raw cross product of the parameter tangents; it is not
/// normalized here.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

impl SurfaceVertex {
    #[inline]
    pub const fn new(position: Vec3, normal: Vec3, texcoord: Vec2) -> Self {
        Self { position, normal, texcoord }
    }
}
