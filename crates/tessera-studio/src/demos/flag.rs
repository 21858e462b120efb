use std::f32::consts::TAU;
use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tessera_engine::render::{GpuMesh, GpuTexture, TextureData};
use tessera_engine::scene::{Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::surface::Flag;
use tessera_geom::{Transform, tessellate};

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 20;
const WAVE_SPEED: f32 = 5.0;
const IMAGE_PATH: &str = "image.png";

/// Textured flag re-tessellated every frame as its wave phase advances.
pub struct FlagDemo {
    scene: Scene,
    flag: Flag,
    mesh: Rc<GpuMesh>,
}

impl FlagDemo {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let flag = Flag::new(0.0);
        let mesh = Rc::new(GpuMesh::new(device, "flag", &tessellate(&flag, TESSELLATION, TESSELLATION)?));

        let image = TextureData::load_png(IMAGE_PATH).unwrap_or_else(|e| {
            log::warn!("{e:#}; using a checkerboard");
            TextureData::checker(8, 6)
        });
        let texture = Rc::new(GpuTexture::upload(device, queue, "flag texture", &image));

        let material = Material::new(
            Vec3::new(0.05, 0.2, 0.3),
            Vec3::splat(0.6),
            Vec3::new(0.15, 0.6, 0.9),
            50.0,
        );

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(0.0, 0.0, 5.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::splat(2.0)));

        let centre = Transform::from_translation(Vec3::new(-flag.width * 0.5, -flag.height * 0.5, 0.0));
        scene.push(
            Object::new(ShaderKind::Phong, material, Rc::clone(&mesh))
                .with_texture(texture)
                .with_transform(centre),
        );

        Ok(Self { scene, flag, mesh })
    }
}

impl Demo for FlagDemo {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        self.flag.phase = (self.flag.phase + cx.time.dt() * WAVE_SPEED) % TAU;
        let strips = tessellate(&self.flag, TESSELLATION, TESSELLATION)?;
        self.mesh.write(cx.queue, &strips)
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
