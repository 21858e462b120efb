use anyhow::Result;
use glam::Vec2;
use tessera_engine::paint::Color;
use tessera_engine::render::flat::{DrawList, FlatCmd, ZIndex};
use tessera_geom::polygon::{clip_convex, rectangle, regular_polygon, star, triangulate};

use super::{Demo, DemoCtx};

const WINDOW_HALF: Vec2 = Vec2::new(0.4, 0.3);

struct Shape {
    outline: Vec<Vec2>,
    color: Color,
}

/// Three shapes clipped against a rectangle that follows the pointer.
pub struct Clipping {
    shapes: Vec<Shape>,
    window: Vec<Vec2>,
    clipped: Vec<(Vec<[Vec2; 3]>, Color)>,
}

impl Clipping {
    pub fn new() -> Self {
        let shapes = vec![
            Shape { outline: star(Vec2::new(-0.2, 0.5), 0.4, 5), color: Color::rgb(0.9, 0.8, 0.2) },
            Shape {
                outline: rectangle(Vec2::new(0.4, -0.1), Vec2::new(0.3, 0.2)),
                color: Color::rgb(0.2, 0.6, 0.9),
            },
            Shape {
                outline: regular_polygon(Vec2::new(-0.4, -0.5), 0.3, 3, 0.3),
                color: Color::rgb(0.9, 0.3, 0.4),
            },
        ];
        let mut demo = Self { shapes, window: Vec::new(), clipped: Vec::new() };
        demo.move_window(Vec2::ZERO);
        demo
    }

    fn move_window(&mut self, centre: Vec2) {
        self.window = rectangle(centre, WINDOW_HALF);
        self.clipped = self
            .shapes
            .iter()
            .map(|s| {
                // Clipped pieces of a concave shape may be concave too.
                (triangulate(&clip_convex(&s.outline, &self.window)), s.color)
            })
            .collect();
    }
}

impl Demo for Clipping {
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()> {
        if cx.input_frame.pointer_moved {
            if let Some(p) = cx.pointer() {
                self.move_window(p);
            }
        }
        Ok(())
    }

    fn clear_color(&self) -> Color {
        Color::rgb(0.1, 0.1, 0.1)
    }

    fn draw_flat(&self, list: &mut DrawList) {
        for shape in &self.shapes {
            list.push(ZIndex(0), FlatCmd::line_loop(&shape.outline, shape.color));
        }
        for (tris, color) in &self.clipped {
            list.push(ZIndex(1), FlatCmd::triangles(tris, *color));
        }
        list.push(ZIndex(2), FlatCmd::line_loop(&self.window, Color::WHITE));
    }
}
