//! Sampled height maps and the terrain surface built on them.

use glam::{Vec2, Vec3};

use crate::error::GeomError;
use crate::noise::Perlin3;
use crate::vertex::SurfaceVertex;

/// Vertical scale applied to normalized heights.
pub const TERRAIN_HEIGHT: f32 = 0.2;

/// Step used for the central-difference terrain normal.
const NORMAL_EPS: f32 = 0.001;

/// Row-major grid of heights.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl HeightField {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, GeomError> {
        let expected = width * height;
        if data.len() != expected || expected == 0 {
            return Err(GeomError::SampleCount { expected, got: data.len() });
        }
        Ok(Self { width, height, data })
    }

    /// Slice `z` of `noise`, one sample per cell, rescaled to `[0, 1]`.
    pub fn from_noise(noise: &Perlin3, width: usize, height: usize, z: f32) -> Result<Self, GeomError> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(noise.get(x as f32, y as f32, z));
            }
        }
        let mut field = Self::new(width, height, data)?;
        field.normalize();
        Ok(field)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Rescales the samples to span `[0, 1]`. A flat field becomes all zeros.
    pub fn normalize(&mut self) {
        let (min, max) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let range = max - min;
        if range > 0.0 {
            self.data.iter_mut().for_each(|h| *h = (*h - min) / range);
        } else {
            self.data.iter_mut().for_each(|h| *h = 0.0);
        }
    }

    /// Nearest-lower sample at `(u, v) ∈ [0, 1]²`; indices are clamped to the grid.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let x = (u * (self.width - 1) as f32).max(0.0) as usize;
        let y = (v * (self.height - 1) as f32).max(0.0) as usize;
        let (x, y) = (x.min(self.width - 1), y.min(self.height - 1));
        self.data[y * self.width + x]
    }

    /// Terrain point over `[-1, 1]²` in XZ.
    pub fn point(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(u * 2.0 - 1.0, self.sample(u, v) * TERRAIN_HEIGHT, v * 2.0 - 1.0)
    }

    /// Terrain vertex with a unit normal from central differences.
    pub fn vertex(&self, u: f32, v: f32) -> SurfaceVertex {
        let du = self.point(u + NORMAL_EPS, v) - self.point(u - NORMAL_EPS, v);
        let dv = self.point(u, v + NORMAL_EPS) - self.point(u, v - NORMAL_EPS);
        SurfaceVertex::new(self.point(u, v), du.cross(dv).normalize(), Vec2::new(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellate::tessellate_with;

    #[test]
    fn rejects_mismatched_buffers() {
        assert_eq!(
            HeightField::new(3, 3, vec![0.0; 8]),
            Err(GeomError::SampleCount { expected: 9, got: 8 })
        );
    }

    #[test]
    fn noise_slice_is_normalized() {
        let noise = Perlin3::new(8, 3);
        let field = HeightField::from_noise(&noise, 32, 24, 5.5).unwrap();
        let lo = field.data().iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = field.data().iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(lo, 0.0);
        assert!((hi - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flat_field_has_upward_normals() {
        let field = HeightField::new(4, 4, vec![0.5; 16]).unwrap();
        let vtx = field.vertex(0.5, 0.5);
        assert!((vtx.position.y - 0.5 * TERRAIN_HEIGHT).abs() < 1e-6);
        // du = (+x), dv = (+z): du × dv points down the -Y axis.
        assert!((vtx.normal - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn sampling_clamps_outside_the_unit_square() {
        let field = HeightField::new(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(field.sample(-0.01, 0.0), 0.0);
        assert_eq!(field.sample(1.01, 1.01), 3.0);
    }

    #[test]
    fn terrain_tessellates_like_a_surface() {
        let field = HeightField::new(4, 4, vec![0.0; 16]).unwrap();
        let mesh = tessellate_with(5, 5, |u, v| field.vertex(u, v)).unwrap();
        assert_eq!(mesh.vertices.len(), 5 * 6 * 2);
    }
}
