//! Gradient (Perlin) noise in three dimensions.

use core::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 3D gradient noise on a cubic lattice of random unit vectors.
///
/// Coordinates are in sample units; one lattice cell spans `cell_size`
/// samples. The lattice wraps every `cell_size + 1` cells.
#[derive(Debug, Clone)]
pub struct Perlin3 {
    cell_size: f32,
    dim: usize,
    gradients: Vec<Vec3>,
}

impl Perlin3 {
    pub fn new(cell_size: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(cell_size, &mut rng)
    }

    pub fn with_rng<R: Rng>(cell_size: u32, rng: &mut R) -> Self {
        let cell_size = cell_size.max(1);
        let dim = cell_size as usize + 1;
        let gradients = (0..dim * dim * dim).map(|_| random_unit_vector(rng)).collect();
        Self { cell_size: cell_size as f32, dim, gradients }
    }

    #[inline]
    fn gradient(&self, i: i64, j: i64, k: i64) -> Vec3 {
        let d = self.dim as i64;
        let (i, j, k) = (i.rem_euclid(d), j.rem_euclid(d), k.rem_euclid(d));
        self.gradients[((k * d + j) * d + i) as usize]
    }

    /// Noise value at `(x, y, z)`, roughly in `[-1, 1]`; zero on lattice points.
    pub fn get(&self, x: f32, y: f32, z: f32) -> f32 {
        let p = Vec3::new(x, y, z) / self.cell_size;
        let cell = p.floor();
        let d = p - cell;
        let (x0, y0, z0) = (cell.x as i64, cell.y as i64, cell.z as i64);

        let corner = |ox: i64, oy: i64, oz: i64| {
            let g = self.gradient(x0 + ox, y0 + oy, z0 + oz);
            g.dot(d - Vec3::new(ox as f32, oy as f32, oz as f32))
        };

        let (u, v, w) = (fade(d.x), fade(d.y), fade(d.z));

        let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), u);
        let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), u);
        let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), u);
        let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), u);

        let y0 = lerp(x00, x10, v);
        let y1 = lerp(x01, x11, v);

        lerp(y0, y1, w)
    }
}

/// Quintic smoothstep `6t⁵ − 15t⁴ + 10t³`.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec3 {
    let theta = rng.random::<f32>() * 2.0 * PI;
    let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_has_flat_ends() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn noise_vanishes_on_lattice_points() {
        let p = Perlin3::new(8, 7);
        for (x, y, z) in [(0.0, 0.0, 0.0), (8.0, 16.0, 0.0), (24.0, 8.0, 40.0)] {
            assert!(p.get(x, y, z).abs() < 1e-5);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = Perlin3::new(16, 42);
        let b = Perlin3::new(16, 42);
        let c = Perlin3::new(16, 43);
        assert_eq!(a.get(3.3, 7.1, 0.5), b.get(3.3, 7.1, 0.5));
        assert_ne!(a.get(3.3, 7.1, 0.5), c.get(3.3, 7.1, 0.5));
    }

    #[test]
    fn noise_is_bounded_and_continuous() {
        let p = Perlin3::new(10, 1);
        let mut prev = p.get(0.0, 4.2, 1.7);
        for i in 1..500 {
            let x = i as f32 * 0.05;
            let n = p.get(x, 4.2, 1.7);
            assert!(n.abs() <= 1.0, "out of range at {x}: {n}");
            assert!((n - prev).abs() < 0.05, "jump at {x}");
            prev = n;
        }
    }

    #[test]
    fn gradients_are_unit_length() {
        let p = Perlin3::new(4, 9);
        assert!(p.gradients.iter().all(|g| (g.length() - 1.0).abs() < 1e-4));
    }
}
