use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tessera_engine::input::MouseButton;
use tessera_engine::render::GpuMesh;
use tessera_engine::scene::{Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::surface::{
    Churros, Cone, Cylinder, Heart, Hyperboloid, Paraboloid, PlaneXZ, Sphere, Torus,
};
use tessera_geom::{ParamSurface, Transform, tessellate};

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 50;

struct Shape {
    name: &'static str,
    mesh: Rc<GpuMesh>,
    transform: Transform,
}

/// One surface at a time; left click shows the next, right click toggles wireframe.
pub struct Surfaces {
    scene: Scene,
    shapes: Vec<Shape>,
    current: usize,
}

impl Surfaces {
    pub fn new(device: &wgpu::Device) -> Result<Self> {
        let at = |y: f32| Transform::from_translation(Vec3::new(0.0, y, 0.0));

        let catalogue: [(&'static str, Box<dyn ParamSurface>, Transform); 9] = [
            ("plane", Box::new(PlaneXZ), at(-1.0)),
            ("sphere", Box::new(Sphere::default()), Transform::default()),
            ("cylinder", Box::new(Cylinder), at(-0.8).with_scale(Vec3::new(0.4, 0.8, 0.4))),
            ("cone", Box::new(Cone::new(0.5)), Transform::default().with_scale(Vec3::splat(2.0))),
            ("hyperboloid", Box::new(Hyperboloid), Transform::default().with_scale(Vec3::splat(0.6))),
            ("paraboloid", Box::new(Paraboloid), at(-0.8).with_scale(Vec3::splat(0.3))),
            ("torus", Box::new(Torus::new(1.0, 0.25)), at(-0.8)),
            ("churros", Box::new(Churros::new(0.4)), Transform::default()),
            ("heart", Box::new(Heart::default()), at(-0.8).with_scale(Vec3::splat(0.6))),
        ];

        let mut shapes = Vec::with_capacity(catalogue.len());
        for (name, surface, transform) in catalogue {
            let strips = tessellate(surface.as_ref(), TESSELLATION, TESSELLATION)?;
            shapes.push(Shape { name, mesh: Rc::new(GpuMesh::new(device, name, &strips)), transform });
        }

        let material = Material::new(
            Vec3::new(0.05, 0.2, 0.3),
            Vec3::splat(0.6),
            Vec3::new(0.15, 0.6, 0.9),
            20.0,
        );

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(0.0, 1.0, 5.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::ONE));

        let first = &shapes[0];
        scene.push(
            Object::new(ShaderKind::Phong, material, Rc::clone(&first.mesh)).with_transform(first.transform),
        );

        Ok(Self { scene, shapes, current: 0 })
    }

    fn show(&mut self, index: usize) {
        self.current = index % self.shapes.len();
        let shape = &self.shapes[self.current];
        if let Some(object) = self.scene.objects.first_mut() {
            object.mesh = Rc::clone(&shape.mesh);
            object.transform = shape.transform;
        }
        log::info!("surface: {}", shape.name);
    }
}

impl Demo for Surfaces {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        if cx.input_frame.button_pressed(MouseButton::Left) {
            self.show(self.current + 1);
        }
        if cx.input_frame.button_pressed(MouseButton::Right) {
            for object in &mut self.scene.objects {
                object.wireframe = !object.wireframe;
                log::info!("wireframe: {}", object.wireframe);
            }
        }
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
