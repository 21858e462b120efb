use anyhow::Result;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tessera_engine::input::MouseButton;
use tessera_engine::paint::Color;
use tessera_engine::render::flat::{DrawList, FlatCmd, ZIndex};
use tessera_geom::polygon::{jittered_polygon, triangulate};

use super::{Demo, DemoCtx};

const VERTICES: usize = 10;
const RADIUS: f32 = 0.7;
const JITTER: f32 = 0.25;

const PALETTE: [Color; 4] = [
    Color::rgb(0.9, 0.4, 0.2),
    Color::rgb(0.2, 0.7, 0.4),
    Color::rgb(0.3, 0.5, 0.9),
    Color::rgb(0.8, 0.7, 0.2),
];

/// Random polygon split into triangles by ear clipping; click for a new one.
pub struct PolygonDemo {
    rng: StdRng,
    outline: Vec<Vec2>,
    triangles: Vec<[Vec2; 3]>,
}

impl PolygonDemo {
    pub fn new() -> Self {
        let mut demo = Self {
            rng: StdRng::seed_from_u64(rand::random()),
            outline: Vec::new(),
            triangles: Vec::new(),
        };
        demo.regenerate();
        demo
    }

    fn regenerate(&mut self) {
        self.outline = jittered_polygon(VERTICES, RADIUS, JITTER, &mut self.rng);
        self.triangles = triangulate(&self.outline);
        if self.triangles.len() + 2 != self.outline.len() {
            log::info!(
                "ear clipping stopped after {} of {} triangles",
                self.triangles.len(),
                self.outline.len().saturating_sub(2)
            );
        }
    }
}

impl Demo for PolygonDemo {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        if cx.input_frame.button_pressed(MouseButton::Left) {
            self.regenerate();
        }
        Ok(())
    }

    fn draw_flat(&self, list: &mut DrawList) {
        for (i, tri) in self.triangles.iter().enumerate() {
            list.push(ZIndex(0), FlatCmd::triangles(&[*tri], PALETTE[i % PALETTE.len()]));
            list.push(ZIndex(1), FlatCmd::line_loop(tri, Color::BLACK));
        }
        list.push(ZIndex(2), FlatCmd::line_loop(&self.outline, Color::WHITE));
        list.push(ZIndex(3), FlatCmd::points(&self.outline, 4.0, Color::WHITE));
    }
}
