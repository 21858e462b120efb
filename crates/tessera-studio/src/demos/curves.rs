use anyhow::Result;
use glam::Vec2;
use tessera_engine::input::{Key, MouseButton};
use tessera_engine::paint::Color;
use tessera_engine::render::flat::{DrawList, FlatCmd, ZIndex};
use tessera_geom::curve::{CurveKind, pick, sample};

use super::{Demo, DemoCtx};

const SAMPLES: usize = 100;
const PICK_RADIUS: f32 = 0.05;

/// Control points edited with the mouse; `Tab` switches the curve family.
///
/// Left click adds a point, right drag moves the point under the cursor.
pub struct Curves {
    kind: CurveKind,
    points: Vec<Vec2>,
    dragging: Option<usize>,
}

impl Curves {
    pub fn new() -> Self {
        Self { kind: CurveKind::Bezier, points: Vec::new(), dragging: None }
    }
}

impl Demo for Curves {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        if cx.input_frame.key_pressed(Key::Tab) {
            self.kind = self.kind.next();
            log::info!("curve: {}", self.kind.name());
        }

        let Some(p) = cx.pointer() else {
            self.dragging = None;
            return Ok(());
        };

        if cx.input_frame.button_pressed(MouseButton::Left) {
            self.points.push(p);
        }
        if cx.input_frame.button_pressed(MouseButton::Right) {
            self.dragging = pick(&self.points, p, PICK_RADIUS);
        }
        if cx.input_frame.button_released(MouseButton::Right) {
            self.dragging = None;
        }

        if let Some(i) = self.dragging {
            self.points[i] = p;
        }
        Ok(())
    }

    fn clear_color(&self) -> Color {
        Color::rgb(0.05, 0.05, 0.1)
    }

    fn draw_flat(&self, list: &mut DrawList) {
        let curve = sample(self.kind, &self.points, SAMPLES);
        list.push(ZIndex(0), FlatCmd::line_strip(&self.points, Color::rgb(0.3, 0.3, 0.4)));
        list.push(ZIndex(1), FlatCmd::line_strip(&curve, Color::rgb(1.0, 1.0, 0.0)));
        list.push(ZIndex(2), FlatCmd::points(&self.points, 6.0, Color::rgb(1.0, 0.2, 0.2)));
    }
}
