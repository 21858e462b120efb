//! Interpolating and approximating plane curves over control points.
//!
//! All curves are parameterised over `t ∈ [0, 1]`. Lagrange and Catmull–Rom
//! use uniform knots `tᵢ = i / (n − 1)`.

use glam::Vec2;

/// Curve family evaluated by [`sample`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CurveKind {
    Bezier,
    Lagrange,
    CatmullRom,
}

impl CurveKind {
    pub const ALL: [CurveKind; 3] = [CurveKind::Bezier, CurveKind::Lagrange, CurveKind::CatmullRom];

    /// Next kind in [`CurveKind::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            CurveKind::Bezier => CurveKind::Lagrange,
            CurveKind::Lagrange => CurveKind::CatmullRom,
            CurveKind::CatmullRom => CurveKind::Bezier,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Bezier => "Bezier",
            CurveKind::Lagrange => "Lagrange",
            CurveKind::CatmullRom => "Catmull-Rom",
        }
    }
}

/// Bernstein polynomial `C(n, i) tⁱ (1 − t)ⁿ⁻ⁱ`.
pub fn bernstein(n: usize, i: usize, t: f32) -> f32 {
    let mut choose = 1.0f32;
    for j in 1..=i {
        choose *= (n - j + 1) as f32 / j as f32;
    }
    choose * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

/// Bézier curve point. Panics on an empty control polygon.
pub fn bezier(points: &[Vec2], t: f32) -> Vec2 {
    let n = points.len() - 1;
    points
        .iter()
        .enumerate()
        .fold(Vec2::ZERO, |acc, (i, p)| acc + *p * bernstein(n, i, t))
}

/// Uniform knot vector `i / (n − 1)`; `[0]` for a single point.
pub fn uniform_knots(n: usize) -> Vec<f32> {
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n).map(|i| i as f32 / (n - 1) as f32).collect()
}

/// Lagrange interpolating polynomial through `points` at `knots`.
pub fn lagrange(points: &[Vec2], knots: &[f32], t: f32) -> Vec2 {
    let mut r = Vec2::ZERO;
    for (i, p) in points.iter().enumerate() {
        let mut li = 1.0;
        for (j, tj) in knots.iter().enumerate() {
            if j != i {
                li *= (t - tj) / (knots[i] - tj);
            }
        }
        r += *p * li;
    }
    r
}

/// Cubic Hermite segment from `(p0, v0)` at `t0` to `(p1, v1)` at `t1`.
pub fn hermite(p0: Vec2, v0: Vec2, t0: f32, p1: Vec2, v1: Vec2, t1: f32, t: f32) -> Vec2 {
    let t = t - t0;
    let dt = t1 - t0;
    let a0 = p0;
    let a1 = v0;
    let a2 = 3.0 * (p1 - p0) / (dt * dt) - (v1 + 2.0 * v0) / dt;
    let a3 = 2.0 * (p0 - p1) / (dt * dt * dt) + (v1 + v0) / (dt * dt);
    ((a3 * t + a2) * t + a1) * t + a0
}

/// Catmull–Rom spline: Hermite segments with centred-difference tangents and
/// zero tangents at both ends. Returns `None` if `t` is outside the knots.
pub fn catmull_rom(points: &[Vec2], knots: &[f32], t: f32) -> Option<Vec2> {
    let n = points.len();
    for i in 0..n.saturating_sub(1) {
        if knots[i] <= t && t <= knots[i + 1] {
            let v0 = if i > 0 {
                (points[i + 1] - points[i - 1]) / (knots[i + 1] - knots[i - 1])
            } else {
                Vec2::ZERO
            };
            let v1 = if i + 2 < n {
                (points[i + 2] - points[i]) / (knots[i + 2] - knots[i])
            } else {
                Vec2::ZERO
            };
            return Some(hermite(points[i], v0, knots[i], points[i + 1], v1, knots[i + 1], t));
        }
    }
    None
}

/// Samples `count + 1` evenly spaced points of the curve; empty for fewer than
/// two control points.
pub fn sample(kind: CurveKind, points: &[Vec2], count: usize) -> Vec<Vec2> {
    if points.len() < 2 || count == 0 {
        return Vec::new();
    }

    let knots = uniform_knots(points.len());
    (0..=count)
        .filter_map(|i| {
            let t = i as f32 / count as f32;
            match kind {
                CurveKind::Bezier => Some(bezier(points, t)),
                CurveKind::Lagrange => Some(lagrange(points, &knots, t)),
                CurveKind::CatmullRom => catmull_rom(points, &knots, t),
            }
        })
        .collect()
}

/// Index of the first control point within `radius` of `p`.
pub fn pick(points: &[Vec2], p: Vec2, radius: f32) -> Option<usize> {
    points.iter().position(|c| c.distance(p) < radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<Vec2> {
        vec![
            Vec2::new(-0.8, -0.5),
            Vec2::new(-0.3, 0.6),
            Vec2::new(0.2, -0.2),
            Vec2::new(0.7, 0.4),
        ]
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn bernstein_basis_is_a_partition_of_unity() {
        for k in 0..=10 {
            let t = k as f32 / 10.0;
            let sum: f32 = (0..=5).map(|i| bernstein(5, i, t)).sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn every_curve_hits_its_end_points() {
        let p = pts();
        for kind in CurveKind::ALL {
            let s = sample(kind, &p, 100);
            assert_eq!(s.len(), 101, "{}", kind.name());
            assert!(close(s[0], p[0]), "{} start", kind.name());
            assert!(close(s[100], p[3]), "{} end", kind.name());
        }
    }

    #[test]
    fn interpolating_curves_pass_through_every_point() {
        let p = pts();
        let knots = uniform_knots(p.len());
        for (i, cp) in p.iter().enumerate() {
            assert!(close(lagrange(&p, &knots, knots[i]), *cp));
            assert!(close(catmull_rom(&p, &knots, knots[i]).unwrap(), *cp));
        }
    }

    #[test]
    fn bezier_with_two_points_is_a_segment() {
        let p = [Vec2::ZERO, Vec2::new(2.0, 4.0)];
        assert!(close(bezier(&p, 0.25), Vec2::new(0.5, 1.0)));
    }

    #[test]
    fn hermite_matches_end_tangents() {
        let (p0, p1) = (Vec2::ZERO, Vec2::X);
        let (v0, v1) = (Vec2::Y, Vec2::NEG_Y);
        let h = 1e-3;
        let start = (hermite(p0, v0, 0.0, p1, v1, 1.0, h) - p0) / h;
        let end = (p1 - hermite(p0, v0, 0.0, p1, v1, 1.0, 1.0 - h)) / h;
        assert!((start - v0).length() < 1e-2);
        assert!((end - v1).length() < 1e-2);
    }

    #[test]
    fn too_few_points_yield_no_samples() {
        assert!(sample(CurveKind::Bezier, &[Vec2::ZERO], 10).is_empty());
        assert!(sample(CurveKind::CatmullRom, &[], 10).is_empty());
    }

    #[test]
    fn pick_finds_the_first_point_in_range() {
        let p = pts();
        assert_eq!(pick(&p, Vec2::new(-0.29, 0.61), 0.05), Some(1));
        assert_eq!(pick(&p, Vec2::new(0.0, 0.0), 0.05), None);
    }

    #[test]
    fn kinds_cycle() {
        assert_eq!(CurveKind::Bezier.next().next().next(), CurveKind::Bezier);
    }
}
