use std::rc::Rc;

use anyhow::Result;
use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tessera_engine::input::MouseButton;
use tessera_engine::paint::Color;
use tessera_engine::render::GpuMesh;
use tessera_engine::render::flat::{DrawList, FlatCmd, ZIndex};
use tessera_engine::scene::{Camera, Light, Material, Object, Scene, ShaderKind};
use tessera_geom::surface::BezierSurface;
use tessera_geom::tessellate;

use super::{Demo, DemoCtx};

const TESSELLATION: u32 = 20;
const GRID: usize = 4;
/// Pick distance in normalized device coordinates.
const PICK_RADIUS: f32 = 0.1;

struct Grab {
    index: usize,
    /// NDC depth of the point when it was picked.
    depth: f32,
}

/// Bézier patch whose control points can be dragged in the view plane.
///
/// Left drag moves the control point under the cursor, right click toggles
/// wireframe.
pub struct BezierDemo {
    scene: Scene,
    surface: BezierSurface,
    mesh: Rc<GpuMesh>,
    grab: Option<Grab>,
}

/// Control point nearest to `ndc` on screen, with its NDC depth.
fn pick(view_projection: Mat4, points: &[Vec3], ndc: Vec2) -> Option<Grab> {
    points
        .iter()
        .enumerate()
        .filter_map(|(index, &p)| {
            let q = project(view_projection, p)?;
            let d = q.truncate().distance(ndc);
            (d < PICK_RADIUS).then_some((d, Grab { index, depth: q.z }))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, grab)| grab)
}

/// `None` for points behind the eye.
fn project(view_projection: Mat4, p: Vec3) -> Option<Vec3> {
    let clip = view_projection * p.extend(1.0);
    (clip.w > 0.0).then(|| clip.truncate() / clip.w)
}

fn unproject(inverse_view_projection: Mat4, ndc: Vec2, depth: f32) -> Vec3 {
    let p = inverse_view_projection * Vec4::new(ndc.x, ndc.y, depth, 1.0);
    p.truncate() / p.w
}

impl BezierDemo {
    pub fn new(device: &wgpu::Device) -> Result<Self> {
        let surface = BezierSurface::random_heights(GRID, GRID, &mut StdRng::seed_from_u64(rand::random()))?;
        let mesh = Rc::new(GpuMesh::new(device, "bezier patch", &tessellate(&surface, TESSELLATION, TESSELLATION)?));

        let material = Material::new(
            Vec3::new(0.05, 0.2, 0.3),
            Vec3::splat(0.6),
            Vec3::new(0.15, 0.6, 0.9),
            20.0,
        );

        let mut scene = Scene::new(Camera::looking_at_origin(Vec3::new(0.0, 2.0, 4.0), 40.0));
        scene.lights.push(Light::directional(Vec3::ONE, Vec3::splat(0.4), Vec3::ONE));
        scene.push(Object::new(ShaderKind::Phong, material, Rc::clone(&mesh)));

        Ok(Self { scene, surface, mesh, grab: None })
    }

    fn camera(&self) -> &Camera {
        &self.scene.camera
    }
}

impl Demo for BezierDemo {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        self.scene.camera.asp = cx.viewport.aspect();

        if cx.input_frame.button_pressed(MouseButton::Right) {
            for object in &mut self.scene.objects {
                object.wireframe = !object.wireframe;
            }
        }
        if cx.input_frame.button_released(MouseButton::Left) {
            self.grab = None;
        }

        let Some(p) = cx.pointer() else {
            self.grab = None;
            return Ok(());
        };

        let vp = self.camera().view_projection();
        if cx.input_frame.button_pressed(MouseButton::Left) {
            self.grab = pick(vp, self.surface.points(), p);
        }

        let Some(grab) = &self.grab else { return Ok(()) };
        let target = unproject(vp.inverse(), p, grab.depth);
        let point = &mut self.surface.points_mut()[grab.index];
        if *point != target {
            *point = target;
            let strips = tessellate(&self.surface, TESSELLATION, TESSELLATION)?;
            self.mesh.write(cx.queue, &strips)?;
        }
        Ok(())
    }

    fn scene(&self) -> Option<&Scene> {
        Some(&self.scene)
    }

    fn draw_flat(&self, list: &mut DrawList) {
        let vp = self.camera().view_projection();
        let dots: Vec<Vec2> = self
            .surface
            .points()
            .iter()
            .filter_map(|&p| project(vp, p))
            .map(|q| q.truncate())
            .collect();
        list.push(ZIndex(0), FlatCmd::points(&dots, 10.0, Color::rgb(1.0, 1.0, 0.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::looking_at_origin(Vec3::new(0.0, 2.0, 4.0), 40.0)
    }

    #[test]
    fn unproject_inverts_project() {
        let vp = camera().view_projection();
        let p = Vec3::new(0.4, -0.3, 0.7);
        let q = project(vp, p).unwrap();
        assert!(unproject(vp.inverse(), q.truncate(), q.z).abs_diff_eq(p, 1e-4));
    }

    #[test]
    fn pick_takes_the_nearest_point_on_screen() {
        let vp = camera().view_projection();
        let points = [Vec3::new(-1.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(0.02, 0.0, 0.0)];
        let at = project(vp, points[1]).unwrap();

        let grab = pick(vp, &points, at.truncate()).unwrap();
        assert_eq!(grab.index, 1);
        assert!((grab.depth - at.z).abs() < 1e-6);

        assert!(pick(vp, &points, Vec2::new(0.9, 0.9)).is_none());
    }

    #[test]
    fn points_behind_the_eye_are_not_projected() {
        let vp = camera().view_projection();
        assert!(project(vp, Vec3::new(0.0, 4.0, 8.0)).is_none());
    }
}
