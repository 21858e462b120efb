use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tessera_engine::render::GpuMesh;
use tessera_engine::scene::{Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::frenet::{FrenetFrame, align_y};
use tessera_geom::surface::{Arrow, Sphere, VivianiTube};
use tessera_geom::{ParamSurface, Transform, tessellate};

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 50;
const ARROW_LENGTH: f32 = 0.4;
/// Curve parameter advanced per second.
const CART_SPEED: f32 = 0.2;

const PATH: usize = 0;
const CART: usize = 1;
const ARROWS: usize = 2;

/// A cart riding Viviani's curve with its tangent, normal and binormal drawn as arrows.
pub struct Frenet {
    scene: Scene,
    t: f32,
}

fn upload(device: &wgpu::Device, name: &str, surface: &dyn ParamSurface, n: u32, m: u32) -> Result<Rc<GpuMesh>> {
    Ok(Rc::new(GpuMesh::new(device, name, &tessellate(surface, n, m)?)))
}

fn shiny(kd: Vec3, ka: Vec3) -> Material {
    Material::new(kd, Vec3::splat(0.6), ka, 20.0)
}

impl Frenet {
    pub fn new(device: &wgpu::Device) -> Result<Self> {
        let tube = upload(device, "viviani tube", &VivianiTube::new(0.02), TESSELLATION * 3, TESSELLATION / 3)?;
        let ball = upload(device, "cart", &Sphere::new(0.08), TESSELLATION, TESSELLATION)?;
        let arrow = upload(device, "arrow", &Arrow, TESSELLATION, TESSELLATION)?;

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(4.0, 0.5, 0.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::ONE));

        scene.push(Object::new(ShaderKind::Phong, shiny(Vec3::splat(0.81), Vec3::splat(0.27)), tube));
        scene.push(Object::new(
            ShaderKind::Phong,
            shiny(Vec3::new(0.9, 0.0, 0.0), Vec3::new(0.3, 0.0, 0.0)),
            ball,
        ));

        let arrow_materials = [
            shiny(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.3, 0.3, 0.0)),
            shiny(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.0, 0.3, 0.0)),
            shiny(Vec3::new(0.0, 0.3, 0.9), Vec3::new(0.0, 0.1, 0.3)),
        ];
        for material in arrow_materials {
            scene.push(Object::new(ShaderKind::Phong, material, Rc::clone(&arrow)));
        }

        let mut demo = Self { scene, t: 0.0 };
        demo.place(FrenetFrame::at(0.0));
        Ok(demo)
    }

    fn place(&mut self, frame: FrenetFrame) {
        let objects = &mut self.scene.objects;
        objects[PATH].transform = Transform::default();
        objects[CART].transform = Transform::from_translation(frame.position);

        let dirs = [frame.tangent, frame.normal, frame.binormal];
        for (object, dir) in objects[ARROWS..].iter_mut().zip(dirs) {
            let (axis, angle) = align_y(dir);
            object.transform = Transform::from_translation(frame.position + dir * ARROW_LENGTH * 0.5)
                .with_rotation(axis, angle)
                .with_scale(Vec3::new(0.1, ARROW_LENGTH * 0.5, 0.1));
        }
    }
}

impl Demo for Frenet {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        // Period 1; wrap to keep precision over long runs.
        self.t = (self.t + cx.time.dt() * CART_SPEED).fract();
        self.place(FrenetFrame::at(self.t));
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
