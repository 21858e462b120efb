use glam::Vec3;
use rand::Rng;

use super::{DualVec3, ParamSurface};
use crate::dual::Dual2;
use crate::error::GeomError;

/// Tensor-product Bézier patch over a `rows × cols` control grid.
///
/// `u` walks the rows and `v` the columns. Control points are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSurface {
    rows: usize,
    cols: usize,
    points: Vec<Vec3>,
}

impl BezierSurface {
    pub fn new(rows: usize, cols: usize, points: Vec<Vec3>) -> Result<Self, GeomError> {
        if rows < 2 || cols < 2 || points.len() != rows * cols {
            return Err(GeomError::ControlGrid { rows, cols, points: points.len() });
        }
        Ok(Self { rows, cols, points })
    }

    /// Lattice over `[-1, 1]²` in the XZ plane with heights drawn from
    /// `{-5, …, 5} / 8`.
    pub fn random_heights<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, GeomError> {
        if rows < 2 || cols < 2 {
            return Err(GeomError::ControlGrid { rows, cols, points: 0 });
        }
        let dz = 2.0 / (rows - 1) as f32;
        let dx = 2.0 / (cols - 1) as f32;
        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let height = rng.random_range(-5..=5) as f32 / 8.0;
                points.push(Vec3::new(-1.0 + j as f32 * dx, height, -1.0 + i as f32 * dz));
            }
        }
        Self::new(rows, cols, points)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }
}

/// Bernstein basis polynomial on a dual parameter. Powers are built by
/// repeated multiplication so the derivative stays finite at `t = 0`.
fn bernstein(n: usize, i: usize, t: Dual2) -> Dual2 {
    let mut b = Dual2::constant(1.0);
    for j in 1..=i {
        b = b * ((n - j + 1) as f32 / j as f32);
    }
    for _ in 0..i {
        b = b * t;
    }
    let s = 1.0 - t;
    for _ in i..n {
        b = b * s;
    }
    b
}

impl ParamSurface for BezierSurface {
    fn eval(&self, u: Dual2, v: Dual2) -> DualVec3 {
        let mut r = DualVec3::default();
        for i in 0..self.rows {
            let bu = bernstein(self.rows - 1, i, u);
            for j in 0..self.cols {
                let w = bu * bernstein(self.cols - 1, j, v);
                let p = self.points[i * self.cols + j];
                r = r + DualVec3::new(w * p.x, w * p.y, w * p.z);
            }
        }
        r
    }
}
