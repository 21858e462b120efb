//! The interactive demos, picked with the number keys or cycled with the arrows.

mod arcball;
mod bezier;
mod clipping;
mod curves;
mod flag;
mod frenet;
mod gallery;
mod normals;
mod polygon;
mod surfaces;
mod terrain;

use anyhow::Result;
use glam::Vec2;
use tessera_engine::coords::Viewport;
use tessera_engine::input::{InputFrame, InputState};
use tessera_engine::paint::Color;
use tessera_engine::render::flat::DrawList;
use tessera_engine::scene::Scene;
use tessera_engine::time::FrameTime;

/// What a demo sees each frame.
pub struct DemoCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub viewport: Viewport,
}

impl DemoCtx<'_> {
    /// Pointer in normalized device coordinates, if it is over the window.
    pub fn pointer(&self) -> Option<Vec2> {
        self.input.pointer_ndc(self.viewport).map(|(x, y)| Vec2::new(x, y))
    }
}

pub trait Demo {
    /// Reacts to input and advances time.
    fn update(&mut self, cx: &DemoCtx<'_>) -> Result<()>;

    fn clear_color(&self) -> Color {
        Color::BLACK
    }

    /// 3D content, drawn first.
    fn scene(&self) -> Option<&Scene> {
        None
    }

    /// 2D content, drawn over the scene.
    fn draw_flat(&self, list: &mut DrawList) {
        let _ = list;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DemoKind {
    Gallery,
    Surfaces,
    Flag,
    Terrain,
    Frenet,
    Polygon,
    Clipping,
    Curves,
    Arcball,
    Normals,
    Bezier,
}

impl DemoKind {
    /// In number-key order.
    pub const ALL: [DemoKind; 11] = [
        DemoKind::Gallery,
        DemoKind::Surfaces,
        DemoKind::Flag,
        DemoKind::Terrain,
        DemoKind::Frenet,
        DemoKind::Polygon,
        DemoKind::Clipping,
        DemoKind::Curves,
        DemoKind::Arcball,
        DemoKind::Normals,
        DemoKind::Bezier,
    ];

    /// `1` is the first demo and `0` the tenth.
    pub fn from_digit(digit: u8) -> Option<Self> {
        let i = match digit {
            0 => 9,
            1..=9 => usize::from(digit) - 1,
            _ => return None,
        };
        Self::ALL.get(i).copied()
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    /// Following demo in key order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Gallery => "gallery",
            DemoKind::Surfaces => "surfaces",
            DemoKind::Flag => "flag",
            DemoKind::Terrain => "terrain",
            DemoKind::Frenet => "frenet",
            DemoKind::Polygon => "polygon",
            DemoKind::Clipping => "clipping",
            DemoKind::Curves => "curves",
            DemoKind::Arcball => "arcball",
            DemoKind::Normals => "normals",
            DemoKind::Bezier => "bezier",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DemoKind::Gallery => "Tessera: surface gallery",
            DemoKind::Surfaces => "Tessera: parametric surfaces",
            DemoKind::Flag => "Tessera: flag",
            DemoKind::Terrain => "Tessera: Perlin terrain",
            DemoKind::Frenet => "Tessera: Frenet frame",
            DemoKind::Polygon => "Tessera: ear clipping",
            DemoKind::Clipping => "Tessera: Sutherland-Hodgman clipping",
            DemoKind::Curves => "Tessera: curves",
            DemoKind::Arcball => "Tessera: arcball",
            DemoKind::Normals => "Tessera: vertex normals",
            DemoKind::Bezier => "Tessera: Bézier surface",
        }
    }

    pub fn build(self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Box<dyn Demo>> {
        Ok(match self {
            DemoKind::Gallery => Box::new(gallery::Gallery::new(device, queue)?),
            DemoKind::Surfaces => Box::new(surfaces::Surfaces::new(device)?),
            DemoKind::Flag => Box::new(flag::FlagDemo::new(device, queue)?),
            DemoKind::Terrain => Box::new(terrain::Terrain::new(device, queue)?),
            DemoKind::Frenet => Box::new(frenet::Frenet::new(device)?),
            DemoKind::Polygon => Box::new(polygon::PolygonDemo::new()),
            DemoKind::Clipping => Box::new(clipping::Clipping::new()),
            DemoKind::Curves => Box::new(curves::Curves::new()),
            DemoKind::Arcball => Box::new(arcball::ArcballDemo::new(device, queue)?),
            DemoKind::Normals => Box::new(normals::Normals::new(device)?),
            DemoKind::Bezier => Box::new(bezier::BezierDemo::new(device)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_select_demos_in_order() {
        assert_eq!(DemoKind::from_digit(1), Some(DemoKind::Gallery));
        assert_eq!(DemoKind::from_digit(8), Some(DemoKind::Curves));
        assert_eq!(DemoKind::from_digit(9), Some(DemoKind::Arcball));
        assert_eq!(DemoKind::from_digit(0), Some(DemoKind::Normals));
        assert_eq!(DemoKind::from_digit(10), None);
    }

    #[test]
    fn arrows_cycle_through_every_demo() {
        assert_eq!(DemoKind::Bezier.next(), DemoKind::Gallery);
        assert_eq!(DemoKind::Gallery.prev(), DemoKind::Bezier);

        let mut kind = DemoKind::Gallery;
        for expected in DemoKind::ALL.into_iter().skip(1) {
            kind = kind.next();
            assert_eq!(kind, expected);
            assert_eq!(kind.prev().next(), kind);
        }
    }

    #[test]
    fn names_round_trip() {
        for kind in DemoKind::ALL {
            assert_eq!(DemoKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(DemoKind::from_name("Terrain"), Some(DemoKind::Terrain));
        assert_eq!(DemoKind::from_name("raytracer"), None);
    }
}
