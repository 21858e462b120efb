//! CPU mirrors of the uniform blocks in `shaders/common.wgsl`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use tessera_geom::Transform;

use crate::scene::{Camera, Light, MAX_LIGHTS, Material};

/// `Light` (48 bytes):
///
///  offset  0  La         vec3
///  offset 16  Le         vec3
///  offset 32  wLightPos  vec4
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub(crate) struct LightUniform {
    la: [f32; 3],
    _pad0: f32,
    le: [f32; 3],
    _pad1: f32,
    w_light_pos: [f32; 4],
}

impl From<&Light> for LightUniform {
    fn from(l: &Light) -> Self {
        Self {
            la: l.la.to_array(),
            _pad0: 0.0,
            le: l.le.to_array(),
            _pad1: 0.0,
            w_light_pos: l.w_light_pos.to_array(),
        }
    }
}

/// `Material` (48 bytes):
///
///  offset  0  kd         vec3
///  offset 16  ks         vec3
///  offset 32  ka         vec3
///  offset 44  shininess  f32
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub(crate) struct MaterialUniform {
    kd: [f32; 3],
    _pad0: f32,
    ks: [f32; 3],
    _pad1: f32,
    ka: [f32; 3],
    shininess: f32,
}

impl From<&Material> for MaterialUniform {
    fn from(m: &Material) -> Self {
        Self {
            kd: m.kd.to_array(),
            _pad0: 0.0,
            ks: m.ks.to_array(),
            _pad1: 0.0,
            ka: m.ka.to_array(),
            shininess: m.shininess,
        }
    }
}

/// `FrameBlock` (400 bytes): eight light slots, eye position, light count.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct FrameUniform {
    lights: [LightUniform; MAX_LIGHTS],
    w_eye: [f32; 3],
    n_lights: u32,
}

impl FrameUniform {
    /// Packs at most [`MAX_LIGHTS`] lights; the rest are dropped.
    pub(crate) fn new(camera: &Camera, lights: &[Light]) -> Self {
        let mut slots = [LightUniform::default(); MAX_LIGHTS];
        let n = lights.len().min(MAX_LIGHTS);
        for (slot, light) in slots.iter_mut().zip(&lights[..n]) {
            *slot = light.into();
        }
        Self {
            lights: slots,
            w_eye: camera.w_eye.to_array(),
            n_lights: n as u32,
        }
    }
}

/// `ObjectBlock` (240 bytes):
///
///  offset   0  MVP       mat4
///  offset  64  M         mat4
///  offset 128  Minv      mat4
///  offset 192  material  Material
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ObjectUniform {
    mvp: [[f32; 4]; 4],
    m: [[f32; 4]; 4],
    m_inv: [[f32; 4]; 4],
    material: MaterialUniform,
}

impl ObjectUniform {
    pub(crate) fn new(view_projection: Mat4, transform: &Transform, material: &Material) -> Self {
        let m = transform.model();
        Self {
            mvp: (view_projection * m).to_cols_array_2d(),
            m: m.to_cols_array_2d(),
            m_inv: transform.inverse_model().to_cols_array_2d(),
            material: material.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::mem::{offset_of, size_of};

    #[test]
    fn block_sizes_match_wgsl() {
        assert_eq!(size_of::<LightUniform>(), 48);
        assert_eq!(size_of::<MaterialUniform>(), 48);
        assert_eq!(size_of::<FrameUniform>(), 400);
        assert_eq!(size_of::<ObjectUniform>(), 240);
    }

    #[test]
    fn field_offsets_match_wgsl() {
        assert_eq!(offset_of!(LightUniform, le), 16);
        assert_eq!(offset_of!(LightUniform, w_light_pos), 32);
        assert_eq!(offset_of!(MaterialUniform, ka), 32);
        assert_eq!(offset_of!(MaterialUniform, shininess), 44);
        assert_eq!(offset_of!(FrameUniform, w_eye), 384);
        assert_eq!(offset_of!(FrameUniform, n_lights), 396);
        assert_eq!(offset_of!(ObjectUniform, material), 192);
    }

    #[test]
    fn frame_packs_at_most_eight_lights() {
        let lights: Vec<Light> = (0..10)
            .map(|i| Light::directional(Vec3::X * i as f32, Vec3::ZERO, Vec3::ONE))
            .collect();
        let f = FrameUniform::new(&Camera::default(), &lights);
        assert_eq!(f.n_lights, 8);
        assert_eq!(f.lights[7].w_light_pos, [7.0, 0.0, 0.0, 0.0]);

        let f = FrameUniform::new(&Camera::default(), &lights[..2]);
        assert_eq!(f.n_lights, 2);
        assert_eq!(f.lights[2], LightUniform::default());
    }

    #[test]
    fn object_block_carries_inverse_model() {
        let t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(2.0));
        let o = ObjectUniform::new(Mat4::IDENTITY, &t, &Material::default());
        let m = Mat4::from_cols_array_2d(&o.m);
        let m_inv = Mat4::from_cols_array_2d(&o.m_inv);
        assert!((m * m_inv).abs_diff_eq(Mat4::IDENTITY, 1e-5));
        assert_eq!(o.mvp, o.m);
    }
}
