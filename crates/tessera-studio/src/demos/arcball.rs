use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use anyhow::Result;
use glam::{Quat, Vec3};
use tessera_engine::input::MouseButton;
use tessera_engine::render::{GpuMesh, GpuTexture, TextureData};
use tessera_engine::scene::{Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::arcball::{Arcball, ArcballMode};
use tessera_geom::frenet::align_y;
use tessera_geom::surface::{Cylinder, Sphere};
use tessera_geom::{Transform, tessellate};

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 50;
const IMAGE_PATH: &str = "earth.png";
/// Length of the rotation axis drawn from the centre of the globe.
const AXIS_LENGTH: f32 = 1.4;
const AXIS_RADIUS: f32 = 0.01;

const GLOBE: usize = 0;

/// Textured globe turned with an arcball.
///
/// Left drag spins about the grabbed point, right drag rolls the ball.
/// The rotation axis is shown while a button is held.
pub struct ArcballDemo {
    scene: Scene,
    orientation: Quat,
    gesture: Option<Arcball>,
    axis_mesh: Rc<GpuMesh>,
}

impl ArcballDemo {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let sphere = tessellate(&Sphere::default(), TESSELLATION, TESSELLATION)?;
        let globe = Rc::new(GpuMesh::new(device, "globe", &sphere));
        let axis_mesh = Rc::new(GpuMesh::new(device, "arcball axis", &tessellate(&Cylinder, 12, 12)?));

        let image = TextureData::load_png(IMAGE_PATH).unwrap_or_else(|e| {
            log::warn!("{e:#}; using a checkerboard");
            TextureData::checker(16, 8)
        });
        let texture = Rc::new(GpuTexture::upload(device, queue, "globe texture", &image));

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(0.0, 0.0, 5.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::ONE));

        // Poles of the sphere lie on Z; stand the globe upright.
        let orientation = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(-FRAC_PI_2);
        let material = Material::new(Vec3::ONE, Vec3::ONE, Vec3::ONE, 20.0);
        scene.push(
            Object::new(ShaderKind::Phong, material, globe)
                .with_texture(texture)
                .with_transform(Transform::default().with_quat(orientation)),
        );

        Ok(Self { scene, orientation, gesture: None, axis_mesh })
    }

    fn begin(&mut self, mode: ArcballMode, cx: &DemoCtx<'_>) {
        let Some(p) = cx.pointer() else { return };
        let gesture = Arcball::begin(mode, p);
        self.gesture = Some(gesture);

        let material = Material::new(Vec3::ONE, Vec3::ZERO, Vec3::ONE, 1.0);
        self.scene.objects.truncate(GLOBE + 1);
        self.scene.push(Object::new(ShaderKind::Phong, material, Rc::clone(&self.axis_mesh)));
        self.place_axis(gesture.axis());
    }

    fn place_axis(&mut self, dir: Vec3) {
        let Some(axis) = self.scene.objects.get_mut(GLOBE + 1) else { return };
        let (rot_axis, angle) = align_y(dir);
        axis.transform = Transform::from_translation(dir * AXIS_LENGTH * 0.5)
            .with_rotation(rot_axis, angle)
            .with_scale(Vec3::new(AXIS_RADIUS, AXIS_LENGTH * 0.5, AXIS_RADIUS));
    }

    fn end(&mut self) {
        self.gesture = None;
        self.scene.objects.truncate(GLOBE + 1);
    }
}

impl Demo for ArcballDemo {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        if cx.input_frame.button_pressed(MouseButton::Left) {
            self.begin(ArcballMode::Axial, cx);
        }
        if cx.input_frame.button_pressed(MouseButton::Right) {
            self.begin(ArcballMode::Drag, cx);
        }
        if cx.input_frame.button_released(MouseButton::Left) || cx.input_frame.button_released(MouseButton::Right) {
            self.end();
        }

        let Some(p) = cx.pointer() else { return Ok(()) };
        let Some(gesture) = self.gesture.as_mut() else { return Ok(()) };
        if let Some(delta) = gesture.drag(p) {
            self.orientation = (delta * self.orientation).normalize();
            self.scene.objects[GLOBE].transform = Transform::default().with_quat(self.orientation);
        }
        let axis = gesture.axis();
        self.place_axis(axis);
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
