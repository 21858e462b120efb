use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tessera_engine::input::MouseButton;
use tessera_engine::render::GpuMesh;
use tessera_engine::scene::{Animation, Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::surface::Torus;
use tessera_geom::tessellate;

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 30;
const SPIN: Animation = Animation::Spin { axis: Vec3::new(1.0, 0.5, 0.0), rate: 1.0 };

/// Spinning torus with its vertex normals drawn as line segments.
///
/// Left click toggles wireframe.
pub struct Normals {
    scene: Scene,
}

impl Normals {
    pub fn new(device: &wgpu::Device) -> Result<Self> {
        let strips = tessellate(&Torus::new(1.0, 0.4), TESSELLATION, TESSELLATION)?;
        let mesh = Rc::new(GpuMesh::new(device, "torus", &strips));

        let material = Material::new(
            Vec3::new(0.05, 0.2, 0.3),
            Vec3::splat(0.6),
            Vec3::new(0.15, 0.6, 0.9),
            20.0,
        );

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(0.0, 1.0, 5.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::ONE));

        let mut torus = Object::new(ShaderKind::Phong, material, mesh).with_animation(SPIN);
        torus.show_normals = true;
        scene.push(torus);

        Ok(Self { scene })
    }
}

impl Demo for Normals {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        if cx.input_frame.button_pressed(MouseButton::Left) {
            for object in &mut self.scene.objects {
                object.wireframe = !object.wireframe;
            }
        }

        let (tstart, tend) = cx.time.interval();
        self.scene.animate(tstart, tend);
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
