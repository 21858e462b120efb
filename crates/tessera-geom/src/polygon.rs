//! Simple-polygon utilities: ear-clipping triangulation and
//! Sutherland–Hodgman clipping.
//!
//! Polygons are vertex loops with an implicit closing edge. Either winding is
//! accepted unless stated otherwise.

use core::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

/// 2D cross product (z component of the 3D cross).
#[inline]
pub fn perp_dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Signed shoelace area; positive for counter-clockwise loops.
pub fn signed_area(poly: &[Vec2]) -> f32 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    0.5 * (0..n).map(|i| perp_dot(poly[i], poly[(i + 1) % n])).sum::<f32>()
}

#[inline]
pub fn area(poly: &[Vec2]) -> f32 {
    signed_area(poly).abs()
}

#[inline]
pub fn triangle_area(t: &[Vec2; 3]) -> f32 {
    0.5 * perp_dot(t[1] - t[0], t[2] - t[0]).abs()
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether segments `a1–a2` and `b1–b2` share at least one point.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let d1 = perp_dot(b2 - b1, a1 - b1);
    let d2 = perp_dot(b2 - b1, a2 - b1);
    let d3 = perp_dot(a2 - a1, b1 - a1);
    let d4 = perp_dot(a2 - a1, b2 - a1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Even-odd point-in-polygon test with a ray towards +X.
pub fn contains(poly: &[Vec2], p: Vec2) -> bool {
    let n = poly.len();
    let mut inside = false;
    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Whether the chord between the neighbours of vertex `i` is a diagonal:
/// it crosses no edge that does not touch its end points and lies inside.
fn is_ear(poly: &[Vec2], i: usize) -> bool {
    let n = poly.len();
    let prev = (i + n - 1) % n;
    let next = (i + 1) % n;
    let (a, b) = (poly[prev], poly[next]);

    for k in 0..n {
        let k1 = (k + 1) % n;
        if k == prev || k == next || k1 == prev || k1 == next {
            continue;
        }
        if segments_intersect(a, b, poly[k], poly[k1]) {
            return false;
        }
    }

    contains(poly, (a + b) * 0.5)
}

/// First vertex whose triangle with its neighbours can be clipped off.
pub fn find_ear(poly: &[Vec2]) -> Option<usize> {
    if poly.len() < 3 {
        return None;
    }
    (0..poly.len()).find(|&i| is_ear(poly, i))
}

/// Ear-clipping triangulation.
///
/// A simple polygon with `k` vertices yields `k − 2` triangles. Fewer than
/// three vertices yield nothing. If no ear can be found (self-intersecting
/// input) the triangles found so far are returned.
pub fn triangulate(poly: &[Vec2]) -> Vec<[Vec2; 3]> {
    let mut rest = poly.to_vec();
    let mut triangles = Vec::with_capacity(poly.len().saturating_sub(2));

    while rest.len() > 3 {
        let Some(i) = find_ear(&rest) else {
            log::debug!("no ear among {} remaining vertices; stopping", rest.len());
            return triangles;
        };
        let n = rest.len();
        triangles.push([rest[(i + n - 1) % n], rest[i], rest[(i + 1) % n]]);
        rest.remove(i);
    }

    if rest.len() == 3 {
        triangles.push([rest[0], rest[1], rest[2]]);
    }
    triangles
}

/// Intersection of segment `p1–p2` with the line through `p0` with normal `n`.
fn intersect_line(p1: Vec2, p2: Vec2, p0: Vec2, n: Vec2) -> Vec2 {
    let d = p2 - p1;
    let t = (p0 - p1).dot(n) / d.dot(n);
    p1 + d * t
}

/// One Sutherland–Hodgman pass: keeps the part of `poly` with
/// `dot(p − p0, n) ≥ 0`.
pub fn clip_half_plane(poly: &[Vec2], p0: Vec2, n: Vec2) -> Vec<Vec2> {
    let inside = |p: Vec2| (p - p0).dot(n) >= 0.0;
    let len = poly.len();
    let mut out = Vec::with_capacity(len + 1);

    for i in 0..len {
        let (cur, next) = (poly[i], poly[(i + 1) % len]);
        match (inside(cur), inside(next)) {
            (true, true) => out.push(cur),
            (true, false) => {
                out.push(cur);
                out.push(intersect_line(cur, next, p0, n));
            }
            (false, true) => out.push(intersect_line(cur, next, p0, n)),
            (false, false) => {}
        }
    }
    out
}

/// Clips `poly` against every edge of the convex, counter-clockwise `window`.
pub fn clip_convex(poly: &[Vec2], window: &[Vec2]) -> Vec<Vec2> {
    let mut out = poly.to_vec();
    let n = window.len();
    for i in 0..n {
        if out.is_empty() {
            break;
        }
        let (a, b) = (window[i], window[(i + 1) % n]);
        let e = b - a;
        out = clip_half_plane(&out, a, Vec2::new(-e.y, e.x));
    }
    out
}

/// Axis-aligned rectangle as a counter-clockwise loop.
pub fn rectangle(center: Vec2, half_extent: Vec2) -> Vec<Vec2> {
    let (c, h) = (center, half_extent);
    vec![
        Vec2::new(c.x - h.x, c.y - h.y),
        Vec2::new(c.x + h.x, c.y - h.y),
        Vec2::new(c.x + h.x, c.y + h.y),
        Vec2::new(c.x - h.x, c.y + h.y),
    ]
}

/// Regular `count`-gon, counter-clockwise, first vertex at angle `phase`.
pub fn regular_polygon(center: Vec2, radius: f32, count: usize, phase: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let a = phase + 2.0 * PI * i as f32 / count as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Star outline with `points` tips; inner radius is half the outer one.
pub fn star(center: Vec2, radius: f32, points: usize) -> Vec<Vec2> {
    let n = points * 2;
    (0..n)
        .map(|i| {
            let a = 2.0 * PI * i as f32 / n as f32;
            let r = if i % 2 == 0 { radius } else { radius * 0.5 };
            center + Vec2::new(a.cos(), a.sin()) * r
        })
        .collect()
}

/// Circle of `count` points with each coordinate jittered by up to `noise`.
///
/// Large `noise` relative to the vertex spacing can produce self-intersecting
/// loops.
pub fn jittered_polygon<R: Rng>(count: usize, radius: f32, noise: f32, rng: &mut R) -> Vec<Vec2> {
    regular_polygon(Vec2::ZERO, radius, count, 0.0)
        .into_iter()
        .map(|p| p + Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)) * noise)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn total_area(tris: &[[Vec2; 3]]) -> f32 {
        tris.iter().map(triangle_area).sum()
    }

    // ── triangulation ─────────────────────────────────────────────────────

    #[test]
    fn hexagon_gives_four_triangles_with_the_same_area() {
        let hex = regular_polygon(Vec2::ZERO, 1.0, 6, 0.0);
        let tris = triangulate(&hex);
        assert_eq!(tris.len(), 4);
        assert!((total_area(&tris) - area(&hex)).abs() < 1e-5);
        // 3√3/2 for the unit hexagon
        assert!((area(&hex) - 1.5 * 3.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn concave_polygons_keep_count_and_area() {
        let l_shape = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let s = star(Vec2::new(0.3, -0.2), 0.8, 5);

        for poly in [l_shape, s] {
            let tris = triangulate(&poly);
            assert_eq!(tris.len(), poly.len() - 2);
            assert!((total_area(&tris) - area(&poly)).abs() < 1e-4);
        }
    }

    #[test]
    fn clockwise_input_is_accepted() {
        let mut hex = regular_polygon(Vec2::ZERO, 1.0, 6, 0.3);
        hex.reverse();
        assert!(signed_area(&hex) < 0.0);
        let tris = triangulate(&hex);
        assert_eq!(tris.len(), 4);
        assert!((total_area(&tris) - area(&hex)).abs() < 1e-5);
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Vec2::ZERO, Vec2::X]).is_empty());
        assert_eq!(triangulate(&[Vec2::ZERO, Vec2::X, Vec2::Y]).len(), 1);
    }

    #[test]
    fn reflex_vertex_is_not_an_ear() {
        // The notch vertex of the L-shape must never be clipped first.
        let l_shape = [
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
        ];
        assert_ne!(find_ear(&l_shape), Some(0));
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn segment_intersection_cases() {
        let (o, x, y) = (Vec2::ZERO, Vec2::X, Vec2::Y);
        assert!(segments_intersect(o, Vec2::ONE, x, y));
        assert!(!segments_intersect(o, x, y, Vec2::ONE));
        // touching at an end point
        assert!(segments_intersect(o, x, x, Vec2::ONE));
        // collinear but disjoint
        assert!(!segments_intersect(o, x, Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn point_in_polygon() {
        let sq = rectangle(Vec2::ZERO, Vec2::ONE);
        assert!(contains(&sq, Vec2::new(0.2, -0.4)));
        assert!(!contains(&sq, Vec2::new(1.5, 0.0)));
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn unit_square_against_right_half_plane() {
        let sq = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        let clipped = clip_half_plane(&sq, Vec2::ZERO, Vec2::X);
        assert_eq!(
            clipped,
            vec![
                Vec2::new(0.0, -1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn polygon_outside_one_edge_is_removed() {
        let window = rectangle(Vec2::ZERO, Vec2::new(0.4, 0.3));
        let tri = [Vec2::new(0.6, -0.1), Vec2::new(0.9, 0.0), Vec2::new(0.7, 0.2)];
        assert!(clip_convex(&tri, &window).is_empty());
        assert!(clip_half_plane(&tri, Vec2::new(0.4, 0.0), Vec2::NEG_X).is_empty());
    }

    #[test]
    fn clipped_vertices_satisfy_every_edge() {
        let window = rectangle(Vec2::new(0.1, -0.05), Vec2::new(0.4, 0.3));
        let shapes = [
            regular_polygon(Vec2::new(0.3, 0.1), 0.5, 7, 0.2),
            star(Vec2::new(-0.2, 0.2), 0.4, 5),
            vec![Vec2::new(-0.9, -0.9), Vec2::new(0.5, -0.2), Vec2::new(0.0, 0.8)],
        ];
        for shape in &shapes {
            let clipped = clip_convex(shape, &window);
            assert!(!clipped.is_empty());
            for i in 0..window.len() {
                let (a, b) = (window[i], window[(i + 1) % window.len()]);
                let inward = Vec2::new(a.y - b.y, b.x - a.x);
                for p in &clipped {
                    assert!((*p - a).dot(inward) >= -1e-5, "{p:?} outside edge {i}");
                }
            }
        }
    }

    #[test]
    fn polygon_inside_window_is_unchanged() {
        let window = rectangle(Vec2::ZERO, Vec2::ONE);
        let tri = vec![Vec2::new(-0.2, -0.2), Vec2::new(0.3, -0.1), Vec2::new(0.0, 0.4)];
        assert_eq!(clip_convex(&tri, &window), tri);
    }

    #[test]
    fn jittered_polygon_is_reproducible() {
        let a = jittered_polygon(10, 0.7, 0.25, &mut StdRng::seed_from_u64(5));
        let b = jittered_polygon(10, 0.7, 0.25, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
        for (p, q) in a.iter().zip(regular_polygon(Vec2::ZERO, 0.7, 10, 0.0)) {
            assert!((*p - q).abs().max_element() <= 0.25);
        }
    }
}
