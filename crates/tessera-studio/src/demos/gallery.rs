use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tessera_engine::paint::Color;
use tessera_engine::render::{GpuMesh, GpuTexture, TextureData};
use tessera_engine::scene::{Animation, Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::surface::{Boy, Cylinder, Dini, Klein, Mobius, Torus, Tractricoid};
use tessera_geom::{ParamSurface, Transform, tessellate};

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 100;
const SPIN_RATE: f32 = 0.8;

/// Seven surfaces in a row, repeated once per shading model, all spinning.
pub struct Gallery {
    scene: Scene,
}

enum Checker {
    None,
    Small,
    Large,
}

struct Exhibit {
    name: &'static str,
    surface: Box<dyn ParamSurface>,
    checker: Checker,
    scale: Vec3,
    axis: Vec3,
}

impl Gallery {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let material = Material::new(Vec3::new(1.0, 1.0, 0.0), Vec3::ZERO, Vec3::new(0.5, 0.5, 0.0), 100.0);

        let small = Rc::new(GpuTexture::upload(device, queue, "checker 4x8", &TextureData::checker(4, 8)));
        let large = Rc::new(GpuTexture::upload(device, queue, "checker 15x20", &TextureData::checker(15, 20)));

        let exhibits = [
            Exhibit {
                name: "cylinder",
                surface: Box::new(Cylinder),
                checker: Checker::None,
                scale: Vec3::new(0.5, 1.0, 0.5),
                axis: Vec3::Z,
            },
            Exhibit {
                name: "tractricoid",
                surface: Box::new(Tractricoid),
                checker: Checker::Large,
                scale: Vec3::ONE,
                axis: Vec3::X,
            },
            Exhibit {
                name: "torus",
                surface: Box::new(Torus::default()),
                checker: Checker::Small,
                scale: Vec3::splat(0.7),
                axis: Vec3::X,
            },
            Exhibit {
                name: "mobius",
                surface: Box::new(Mobius),
                checker: Checker::Small,
                scale: Vec3::splat(0.7),
                axis: Vec3::X,
            },
            Exhibit {
                name: "klein",
                surface: Box::new(Klein),
                checker: Checker::Small,
                scale: Vec3::ONE,
                axis: Vec3::Z,
            },
            Exhibit {
                name: "boy",
                surface: Box::new(Boy),
                checker: Checker::Large,
                scale: Vec3::ONE,
                axis: Vec3::Z,
            },
            Exhibit {
                name: "dini",
                surface: Box::new(Dini::default()),
                checker: Checker::Large,
                scale: Vec3::splat(0.7),
                axis: Vec3::X,
            },
        ];

        let camera = Camera::looking_at_origin(Vec3::new(0.0, 5.0, 27.0), 45.0).with_clip(1.0, 40.0);
        let mut scene = Scene::new(camera);
        scene.lights.push(Light::directional(Vec3::new(5.0, 5.0, 4.0), Vec3::ZERO, Vec3::ONE));

        let rows = [(ShaderKind::Phong, 3.0), (ShaderKind::Gouraud, 0.0), (ShaderKind::Npr, -3.0)];

        for (i, exhibit) in exhibits.iter().enumerate() {
            let strips = tessellate(exhibit.surface.as_ref(), TESSELLATION, TESSELLATION)?;
            let mesh = Rc::new(GpuMesh::new(device, exhibit.name, &strips));
            let x = -9.0 + 3.0 * i as f32;

            for (shader, y) in rows {
                let transform = Transform::from_translation(Vec3::new(x, y, 0.0))
                    .with_scale(exhibit.scale)
                    .with_rotation(exhibit.axis, 0.0);
                let mut object = Object::new(shader, material, Rc::clone(&mesh))
                    .with_transform(transform)
                    .with_animation(Animation::Spin { axis: exhibit.axis, rate: SPIN_RATE });
                match exhibit.checker {
                    Checker::None => {}
                    Checker::Small => object = object.with_texture(Rc::clone(&small)),
                    Checker::Large => object = object.with_texture(Rc::clone(&large)),
                }
                scene.push(object);
            }
        }

        log::info!("gallery: {} objects", scene.objects.len());
        Ok(Self { scene })
    }
}

impl Demo for Gallery {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();
        let (tstart, tend) = cx.time.interval();
        self.scene.animate(tstart, tend);
        Ok(())
    }

    fn clear_color(&self) -> Color {
        Color::rgb(0.3, 0.3, 1.0)
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }
}
