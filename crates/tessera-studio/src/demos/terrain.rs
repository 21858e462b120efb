use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tessera_engine::input::MouseButton;
use tessera_engine::render::{GpuMesh, GpuTexture, TextureData};
use tessera_engine::scene::{Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::StripMesh;
use tessera_geom::heightfield::HeightField;
use tessera_geom::noise::Perlin3;
use tessera_geom::tessellate_with;

use super::{Demo, DemoCtx};

const MAP_SIZE: usize = 200;
const CELL_SIZE: u32 = 80;
const TESSELLATION: u32 = 100;
/// Noise-space units per second along the slice axis.
const TIME_SPEED: f32 = 50.0;

/// Height field cut from a slowly moving slice of 3D Perlin noise.
pub struct Terrain {
    scene: Scene,
    noise: Perlin3,
    mesh: Rc<GpuMesh>,
    map: Rc<GpuTexture>,
    t: f32,
}

impl Terrain {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let seed: u64 = rand::random();
        log::debug!("terrain noise seed {seed}");
        let noise = Perlin3::new(CELL_SIZE, seed);

        let field = HeightField::from_noise(&noise, MAP_SIZE, MAP_SIZE, 0.0)?;
        let mesh = Rc::new(GpuMesh::new(device, "terrain", &terrain_mesh(&field)?));
        let map = Rc::new(GpuTexture::upload(device, queue, "terrain map", &gray_map(&field)?));

        let material = Material::new(
            Vec3::new(0.05, 0.2, 0.3),
            Vec3::splat(0.8),
            Vec3::new(0.15, 0.6, 0.9),
            60.0,
        );

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(0.0, 2.0, 3.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::ONE));
        scene.push(
            Object::new(ShaderKind::Phong, material, Rc::clone(&mesh)).with_texture(Rc::clone(&map)),
        );

        Ok(Self { scene, noise, mesh, map, t: 0.0 })
    }
}

fn terrain_mesh(field: &HeightField) -> Result<StripMesh> {
    Ok(tessellate_with(TESSELLATION, TESSELLATION, |u, v| field.vertex(u, v))?)
}

fn gray_map(field: &HeightField) -> Result<TextureData> {
    TextureData::from_gray(field.width() as u32, field.height() as u32, field.data())
}

impl Demo for Terrain {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        if cx.input_frame.button_pressed(MouseButton::Left) {
            for object in &mut self.scene.objects {
                object.wireframe = !object.wireframe;
            }
        }

        self.t += cx.time.dt() * TIME_SPEED;
        let field = HeightField::from_noise(&self.noise, MAP_SIZE, MAP_SIZE, self.t)?;
        self.mesh.write(cx.queue, &terrain_mesh(&field)?)?;
        self.map.write(cx.queue, &gray_map(&field)?)
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
