//! Triangulation of parcel outlines for the translucent fill.
//!
//! Generated outlines are star-shaped but can be concave, so a plain fan
//! would spill outside the boundary. Ear clipping handles any simple
//! polygon; when it gets stuck (collinear or self-touching input) the rest
//! is closed with a fan so the fill never disappears.

use bevy::math::Vec2;

/// Twice the signed area; positive for counter-clockwise winding in a
/// y-up frame.
pub fn signed_area2(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum()
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

fn contains(a: Vec2, b: Vec2, c: Vec2, p: Vec2, sign: f32) -> bool {
    cross(a, b, p) * sign >= 0.0 && cross(b, c, p) * sign >= 0.0 && cross(c, a, p) * sign >= 0.0
}

/// Index triples into `points` covering the polygon's interior.
///
/// Fewer than three points yield no triangles.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let area = signed_area2(points);
    if area == 0.0 {
        return fan(n);
    }
    let sign = area.signum();

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut stalled = 0;
    let mut i = 0;

    while remaining.len() > 3 {
        let len = remaining.len();
        let prev = remaining[(i + len - 1) % len];
        let curr = remaining[i % len];
        let next = remaining[(i + 1) % len];
        let (a, b, c) = (points[prev], points[curr], points[next]);

        let convex = cross(a, b, c) * sign > 0.0;
        let is_ear = convex
            && remaining
                .iter()
                .filter(|&&k| k != prev && k != curr && k != next)
                .all(|&k| !contains(a, b, c, points[k], sign));

        if is_ear {
            triangles.push([prev, curr, next]);
            remaining.remove(i % len);
            stalled = 0;
        } else {
            i += 1;
            stalled += 1;
            if stalled > len {
                // No ear left; close what remains with a fan.
                let pivot = remaining[0];
                for pair in remaining[1..].windows(2) {
                    triangles.push([pivot, pair[0], pair[1]]);
                }
                return triangles;
            }
        }
        if !remaining.is_empty() {
            i %= remaining.len();
        }
    }
    triangles.push([remaining[0], remaining[1], remaining[2]]);
    triangles
}

fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(points: &[Vec2], triangles: &[[usize; 3]]) -> f32 {
        triangles
            .iter()
            .map(|t| cross(points[t[0]], points[t[1]], points[t[2]]).abs() * 0.5)
            .sum()
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Vec2::ZERO, Vec2::X]).is_empty());
    }

    #[test]
    fn test_triangle_count() {
        for n in 3..=7 {
            let points: Vec<Vec2> = (0..n)
                .map(|i| {
                    let a = i as f32 / n as f32 * std::f32::consts::TAU;
                    Vec2::new(a.cos(), a.sin()) * 100.0
                })
                .collect();
            assert_eq!(triangulate(&points).len(), n - 2, "n = {n}");
        }
    }

    #[test]
    fn test_concave_area_preserved() {
        // Arrow head pointing right with a notch on the left.
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 50.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(30.0, 50.0),
        ];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2);
        let expected = (signed_area2(&points) * 0.5).abs();
        assert!((area_of(&points, &triangles) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let ccw = triangulate(&points);
        points.reverse();
        let cw = triangulate(&points);
        assert_eq!(ccw.len(), 2);
        assert_eq!(cw.len(), 2);
        assert!((area_of(&points, &cw) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_collinear_falls_back_to_fan() {
        let points = vec![Vec2::ZERO, Vec2::X, Vec2::X * 2.0, Vec2::X * 3.0];
        assert_eq!(triangulate(&points).len(), 2);
    }
}
