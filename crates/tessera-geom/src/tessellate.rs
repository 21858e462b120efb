//! Regular-grid tessellation into triangle strips.
//!
//! Strip `i` walks `u = j/M` for `j = 0..=M`, emitting the sample on row
//! `v = i/N` followed by the one on row `v = (i+1)/N`. Rows shared by two
//! strips are sampled twice; nothing is de-duplicated.

use crate::error::GeomError;
use crate::surface::ParamSurface;
use crate::vertex::SurfaceVertex;

/// Flat vertex buffer made of equally sized triangle strips.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StripMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub strips: u32,
    pub vertices_per_strip: u32,
}

impl StripMesh {
    /// Vertex range of strip `i` within [`StripMesh::vertices`].
    #[inline]
    pub fn strip_range(&self, i: u32) -> core::ops::Range<u32> {
        let start = i * self.vertices_per_strip;
        start..start + self.vertices_per_strip
    }

    #[inline]
    pub fn strip_ranges(&self) -> impl Iterator<Item = core::ops::Range<u32>> + '_ {
        (0..self.strips).map(|i| self.strip_range(i))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Tessellates `surface` into `strips` strips of `(segments + 1) · 2` vertices.
pub fn tessellate<S>(surface: &S, strips: u32, segments: u32) -> Result<StripMesh, GeomError>
where
    S: ParamSurface + ?Sized,
{
    tessellate_with(strips, segments, |u, v| surface.vertex(u, v))
}

/// Same walk as [`tessellate`] with an arbitrary vertex generator.
pub fn tessellate_with<F>(strips: u32, segments: u32, mut generate: F) -> Result<StripMesh, GeomError>
where
    F: FnMut(f32, f32) -> SurfaceVertex,
{
    if strips == 0 || segments == 0 {
        return Err(GeomError::ZeroResolution { strips, segments });
    }

    let vertices_per_strip = (segments + 1) * 2;
    let mut vertices = Vec::with_capacity((strips * vertices_per_strip) as usize);

    let (n, m) = (strips as f32, segments as f32);
    for i in 0..strips {
        for j in 0..=segments {
            let u = j as f32 / m;
            vertices.push(generate(u, i as f32 / n));
            vertices.push(generate(u, (i + 1) as f32 / n));
        }
    }

    log::trace!("tessellated {strips}x{segments} grid into {} vertices", vertices.len());

    Ok(StripMesh { vertices, strips, vertices_per_strip })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Sphere, Torus};

    #[test]
    fn closed_surfaces_produce_two_n_m_plus_one_vertices() {
        for (n, m) in [(1, 1), (3, 7), (20, 20), (50, 50)] {
            let sphere = tessellate(&Sphere::default(), n, m).unwrap();
            assert_eq!(sphere.vertices.len() as u32, n * (m + 1) * 2);
            assert_eq!(sphere.strips, n);
            assert_eq!(sphere.vertices_per_strip, (m + 1) * 2);

            let torus = tessellate(&Torus::default(), n, m).unwrap();
            assert_eq!(torus.vertices.len() as u32, n * (m + 1) * 2);
        }
    }

    #[test]
    fn zero_resolution_is_rejected() {
        assert_eq!(
            tessellate(&Sphere::default(), 0, 4),
            Err(GeomError::ZeroResolution { strips: 0, segments: 4 })
        );
        assert!(tessellate(&Sphere::default(), 4, 0).is_err());
    }

    #[test]
    fn strips_alternate_between_adjacent_rows() {
        let mut seen = Vec::new();
        let mesh = tessellate_with(2, 2, |u, v| {
            seen.push((u, v));
            SurfaceVertex::default()
        })
        .unwrap();

        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(
            &seen[..6],
            &[(0.0, 0.0), (0.0, 0.5), (0.5, 0.0), (0.5, 0.5), (1.0, 0.0), (1.0, 0.5)]
        );
        assert_eq!(seen[6], (0.0, 0.5));
        assert_eq!(seen[11], (1.0, 1.0));
    }

    #[test]
    fn shared_rows_are_sampled_twice() {
        let mesh = tessellate(&Sphere::default(), 2, 3).unwrap();
        // Second vertex of strip 0 and first vertex of strip 1 both sit on v = 1/2.
        assert_eq!(mesh.vertices[1], mesh.vertices[8]);
    }

    #[test]
    fn strip_ranges_cover_the_buffer() {
        let mesh = tessellate(&Torus::default(), 4, 5).unwrap();
        let ranges: Vec<_> = mesh.strip_ranges().collect();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0], 0..12);
        assert_eq!(ranges[3].end as usize, mesh.vertices.len());
    }
}
