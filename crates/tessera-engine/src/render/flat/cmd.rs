use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::coords::Viewport;
use crate::paint::Color;

/// How the vertices of a [`FlatCmd`] are connected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FlatPrimitive {
    /// Independent triangles, three vertices each.
    Triangles,
    /// Open polyline.
    LineStrip,
    /// Closed polyline; the last vertex connects back to the first.
    LineLoop,
    /// Square dots, `size` in logical pixels.
    Points { size: f32 },
}

/// Vertex in normalized device coordinates with a premultiplied colour.
///
/// Layout (24 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0
///  offset  8  color  [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl FlatVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self { pos: pos.to_array(), color: color.to_array() }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FlatVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One flat draw command.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCmd {
    pub primitive: FlatPrimitive,
    pub vertices: Vec<FlatVertex>,
}

impl FlatCmd {
    /// Single-colour triangles from `[a, b, c]` triples.
    pub fn triangles(tris: &[[Vec2; 3]], color: Color) -> Self {
        let vertices = tris
            .iter()
            .flat_map(|t| t.iter().map(move |&p| FlatVertex::new(p, color)))
            .collect();
        Self { primitive: FlatPrimitive::Triangles, vertices }
    }

    pub fn line_strip(points: &[Vec2], color: Color) -> Self {
        Self::uniform(FlatPrimitive::LineStrip, points, color)
    }

    pub fn line_loop(points: &[Vec2], color: Color) -> Self {
        Self::uniform(FlatPrimitive::LineLoop, points, color)
    }

    pub fn points(points: &[Vec2], size: f32, color: Color) -> Self {
        Self::uniform(FlatPrimitive::Points { size }, points, color)
    }

    fn uniform(primitive: FlatPrimitive, points: &[Vec2], color: Color) -> Self {
        Self {
            primitive,
            vertices: points.iter().map(|&p| FlatVertex::new(p, color)).collect(),
        }
    }
}

/// GPU topology a command is lowered to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Topology {
    Triangles,
    Lines,
}

/// Lowers a command to a triangle list or a line list.
///
/// Strips and loops become segment pairs (a loop gets its closing segment);
/// points become two triangles each, sized against `viewport`.
pub(crate) fn lower(cmd: &FlatCmd, viewport: Viewport, out: &mut Vec<FlatVertex>) -> Topology {
    let v = &cmd.vertices;
    match cmd.primitive {
        FlatPrimitive::Triangles => {
            let whole = v.len() - v.len() % 3;
            out.extend_from_slice(&v[..whole]);
            Topology::Triangles
        }
        FlatPrimitive::LineStrip => {
            for pair in v.windows(2) {
                out.extend_from_slice(pair);
            }
            Topology::Lines
        }
        FlatPrimitive::LineLoop => {
            for pair in v.windows(2) {
                out.extend_from_slice(pair);
            }
            if v.len() > 2 {
                out.push(v[v.len() - 1]);
                out.push(v[0]);
            }
            Topology::Lines
        }
        FlatPrimitive::Points { size } => {
            let hx = size / viewport.width.max(1.0);
            let hy = size / viewport.height.max(1.0);
            for p in v {
                let [x, y] = p.pos;
                let corner = |dx: f32, dy: f32| FlatVertex { pos: [x + dx, y + dy], color: p.color };
                let (a, b, c, d) = (corner(-hx, -hy), corner(hx, -hy), corner(hx, hy), corner(-hx, hy));
                out.extend_from_slice(&[a, b, c, a, c, d]);
            }
            Topology::Triangles
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)]
    }

    #[test]
    fn vertex_layout_is_24_bytes() {
        assert_eq!(std::mem::size_of::<FlatVertex>(), 24);
    }

    #[test]
    fn line_loop_closes_back_to_first_vertex() {
        let cmd = FlatCmd::line_loop(&square(), Color::WHITE);
        let mut out = Vec::new();
        let topo = lower(&cmd, Viewport::new(600.0, 600.0), &mut out);
        assert_eq!(topo, Topology::Lines);
        assert_eq!(out.len(), 8);
        assert_eq!(out[6].pos, [0.0, 1.0]);
        assert_eq!(out[7].pos, [0.0, 0.0]);
    }

    #[test]
    fn line_strip_stays_open() {
        let cmd = FlatCmd::line_strip(&square(), Color::WHITE);
        let mut out = Vec::new();
        lower(&cmd, Viewport::new(600.0, 600.0), &mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(out.last().map(|v| v.pos), Some([0.0, 1.0]));
    }

    #[test]
    fn two_point_loop_is_a_single_segment() {
        let pts = [Vec2::ZERO, Vec2::X];
        let mut out = Vec::new();
        lower(&FlatCmd::line_loop(&pts, Color::WHITE), Viewport::new(10.0, 10.0), &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn points_expand_to_pixel_sized_quads() {
        let cmd = FlatCmd::points(&[Vec2::ZERO, Vec2::ONE], 5.0, Color::BLACK);
        let mut out = Vec::new();
        let topo = lower(&cmd, Viewport::new(500.0, 250.0), &mut out);
        assert_eq!(topo, Topology::Triangles);
        assert_eq!(out.len(), 12);

        let xs: Vec<f32> = out[..6].iter().map(|v| v.pos[0]).collect();
        let ys: Vec<f32> = out[..6].iter().map(|v| v.pos[1]).collect();
        let w = xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min);
        let h = ys.iter().cloned().fold(f32::MIN, f32::max) - ys.iter().cloned().fold(f32::MAX, f32::min);
        // 5 px across a 2-unit NDC span
        assert!((w - 0.02).abs() < 1e-6);
        assert!((h - 0.04).abs() < 1e-6);
    }

    #[test]
    fn partial_triangles_are_dropped() {
        let tri = [[Vec2::ZERO, Vec2::X, Vec2::Y]];
        let mut cmd = FlatCmd::triangles(&tri, Color::WHITE);
        cmd.vertices.push(FlatVertex::new(Vec2::ONE, Color::WHITE));
        let mut out = Vec::new();
        lower(&cmd, Viewport::new(10.0, 10.0), &mut out);
        assert_eq!(out.len(), 3);
    }
}
