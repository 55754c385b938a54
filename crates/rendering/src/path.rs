//! Outline geometry: the path descriptor and polyline helpers.
//!
//! Outlines are implicitly closed. The descriptor always ends with `Z` and
//! the polyline helpers always append the first vertex again at the end.

use bevy::math::Vec2;

use parcels::Coordinate;

/// SVG path data for an outline: `M x y`, then `L x y` per further vertex,
/// then `Z`. Empty for an empty outline; `M x y Z` for a single vertex.
pub fn to_path(geometry: &[Coordinate]) -> String {
    let Some((first, rest)) = geometry.split_first() else {
        return String::new();
    };
    let mut d = format!("M {} {}", first[0], first[1]);
    for [x, y] in rest {
        d.push_str(&format!(" L {x} {y}"));
    }
    d.push_str(" Z");
    d
}

/// The outline's vertices as render-space points, not closed.
pub fn to_points(geometry: &[Coordinate]) -> Vec<Vec2> {
    geometry
        .iter()
        .map(|[x, y]| Vec2::new(*x as f32, *y as f32))
        .collect()
}

/// Vertices with the first one repeated at the end. Empty in, empty out.
pub fn closed_polyline(points: &[Vec2]) -> Vec<Vec2> {
    let mut closed = points.to_vec();
    if let Some(first) = points.first() {
        closed.push(*first);
    }
    closed
}

/// Sum of segment lengths along a polyline.
pub fn polyline_length(polyline: &[Vec2]) -> f32 {
    polyline.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// The leading part of `polyline` covering `fraction` of its total length.
///
/// `fraction` is clamped to `[0, 1]`. The cut point is interpolated inside
/// the segment it falls in, so the result grows smoothly.
pub fn partial_polyline(polyline: &[Vec2], fraction: f32) -> Vec<Vec2> {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction >= 1.0 || polyline.len() < 2 {
        return polyline.to_vec();
    }

    let total = polyline_length(polyline);
    let mut remaining = total * fraction;
    let mut out = vec![polyline[0]];
    if remaining <= 0.0 {
        return out;
    }

    for w in polyline.windows(2) {
        let segment = w[0].distance(w[1]);
        if segment >= remaining {
            if segment > 0.0 {
                out.push(w[0].lerp(w[1], remaining / segment));
            }
            return out;
        }
        remaining -= segment;
        out.push(w[1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    }

    #[test]
    fn test_to_path_square() {
        assert_eq!(to_path(&square()), "M 0 0 L 10 0 L 10 10 L 0 10 Z");
    }

    #[test]
    fn test_to_path_segment_counts() {
        for n in 2..=12usize {
            let geometry: Vec<Coordinate> = (0..n).map(|i| [i as f64 * 3.0, 7.0]).collect();
            let d = to_path(&geometry);
            assert!(d.starts_with("M 0 7"), "got {d}");
            assert!(d.ends_with(" Z"), "got {d}");
            assert_eq!(d.matches('L').count(), n - 1, "got {d}");
            assert_eq!(d.matches('M').count(), 1);
        }
    }

    #[test]
    fn test_to_path_degenerate() {
        assert_eq!(to_path(&[]), "");
        assert_eq!(to_path(&[[12.0, 34.0]]), "M 12 34 Z");
    }

    #[test]
    fn test_to_path_keeps_fractions() {
        assert_eq!(to_path(&[[1.5, -2.25]]), "M 1.5 -2.25 Z");
    }

    #[test]
    fn test_closed_polyline_length() {
        let closed = closed_polyline(&to_points(&square()));
        assert_eq!(closed.len(), 5);
        assert_eq!(closed[0], closed[4]);
        assert!((polyline_length(&closed) - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_closed_polyline_empty_and_single() {
        assert!(closed_polyline(&[]).is_empty());
        let single = closed_polyline(&[Vec2::new(3.0, 4.0)]);
        assert_eq!(single.len(), 2);
        assert_eq!(polyline_length(&single), 0.0);
    }

    #[test]
    fn test_partial_polyline_midway() {
        let closed = closed_polyline(&to_points(&square()));
        let half = partial_polyline(&closed, 0.5);
        // 20 units: along the bottom edge and up the right edge.
        assert_eq!(half.len(), 3);
        assert!((half[2] - Vec2::new(10.0, 10.0)).length() < 1e-4);

        let eighth = partial_polyline(&closed, 0.125);
        assert_eq!(eighth.len(), 2);
        assert!((eighth[1] - Vec2::new(5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_partial_polyline_bounds() {
        let closed = closed_polyline(&to_points(&square()));
        assert_eq!(partial_polyline(&closed, 0.0), vec![Vec2::ZERO]);
        assert_eq!(partial_polyline(&closed, 1.0), closed);
        assert_eq!(partial_polyline(&closed, 7.0), closed);
        assert!(partial_polyline(&[], 0.5).is_empty());
    }

    #[test]
    fn test_partial_polyline_zero_length() {
        let single = closed_polyline(&[Vec2::new(3.0, 4.0)]);
        let out = partial_polyline(&single, 0.5);
        assert_eq!(out, vec![Vec2::new(3.0, 4.0)]);
    }
}
