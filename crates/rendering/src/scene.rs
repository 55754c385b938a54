//! Painter-independent description of one parcel card.
//!
//! [`ParcelScene`] holds everything both outputs need: the path descriptor
//! for SVG export and the points, triangles and reveal progress for live
//! egui painting.

use bevy::math::{Rect, Vec2};

use parcels::Coordinate;

use crate::path::{closed_polyline, partial_polyline, to_path, to_points};
use crate::reveal::RevealPhase;
use crate::tessellate::triangulate;

/// Side of the square card frame, in render units.
pub const FRAME_SIZE: f32 = 400.0;
pub const STROKE_WIDTH: f32 = 3.0;
pub const MARKER_RADIUS: f32 = 4.0;
/// Blur radius of the halo under the stroke.
pub const GLOW_STD_DEVIATION: f32 = 3.0;
pub const FILL_OPACITY: f32 = 0.2;
/// Opacity of the empty-state background gradient.
pub const EMPTY_OPACITY: f32 = 0.1;

/// Stroke, markers and the gradient's start stop.
pub const BLUE: [u8; 3] = [0x3b, 0x82, 0xf6];
/// The gradient's end stop.
pub const VIOLET: [u8; 3] = [0x8b, 0x5c, 0xf6];
/// Empty-state caption.
pub const SLATE: [u8; 3] = [0x94, 0xa3, 0xb8];

/// `#rrggbb` for an RGB triple.
pub fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// One vertex marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: Vec2,
    /// Seconds after the reveal starts before this marker pops in.
    pub delay: f32,
    /// Radius multiplier for this frame.
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParcelScene {
    pub path: String,
    /// Outline vertices, open.
    pub vertices: Vec<Vec2>,
    /// Outline vertices, closed.
    pub outline: Vec<Vec2>,
    /// Fill triangles indexing into `vertices`.
    pub triangles: Vec<[usize; 3]>,
    pub bounds: Option<Rect>,
    pub phase: RevealPhase,
    pub stroke_fraction: f32,
    pub markers: Vec<Marker>,
}

impl ParcelScene {
    pub fn build(geometry: &[Coordinate], phase: RevealPhase) -> Self {
        let vertices = to_points(geometry);
        let count = vertices.len();
        let markers = vertices
            .iter()
            .enumerate()
            .map(|(i, &center)| Marker {
                center,
                delay: RevealPhase::marker_delay(i, count),
                scale: phase.marker_scale(i, count),
            })
            .collect();
        let bounds = vertices.split_first().map(|(first, rest)| {
            rest.iter()
                .fold(Rect::from_center_size(*first, Vec2::ZERO), |r, p| {
                    r.union_point(*p)
                })
        });

        Self {
            path: to_path(geometry),
            outline: closed_polyline(&vertices),
            triangles: triangulate(&vertices),
            vertices,
            bounds,
            phase,
            stroke_fraction: phase.stroke_fraction(),
            markers,
        }
    }

    /// No geometry: only the frame is drawn.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_revealing(&self) -> bool {
        self.phase.is_revealing()
    }

    /// The part of the closed outline drawn this frame.
    pub fn visible_outline(&self) -> Vec<Vec2> {
        partial_polyline(&self.outline, self.stroke_fraction)
    }

    /// Position of `p` along the diagonal fill gradient, `0` at the
    /// top-left of the outline's bounding box and `1` at the bottom-right.
    pub fn gradient_t(&self, p: Vec2) -> f32 {
        let Some(bounds) = self.bounds else {
            return 0.0;
        };
        let size = bounds.size();
        let u = if size.x > 0.0 { (p.x - bounds.min.x) / size.x } else { 0.0 };
        let v = if size.y > 0.0 { (p.y - bounds.min.y) / size.y } else { 0.0 };
        ((u + v) * 0.5).clamp(0.0, 1.0)
    }
}

/// Build the scene for one card. `phase` says whether this card is the one
/// being revealed.
pub fn render(geometry: &[Coordinate], phase: RevealPhase) -> ParcelScene {
    ParcelScene::build(geometry, phase)
}

/// Linear blend between two RGB triples.
pub fn mix(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [channel(a[0], b[0]), channel(a[1], b[1]), channel(a[2], b[2])]
}
