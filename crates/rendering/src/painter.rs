//! Live egui drawing of a [`ParcelScene`] inside a card frame.

use bevy_egui::egui;

use crate::scene::{
    mix, ParcelScene, BLUE, EMPTY_OPACITY, FILL_OPACITY, FRAME_SIZE, GLOW_STD_DEVIATION,
    MARKER_RADIUS, SLATE, STROKE_WIDTH, VIOLET,
};
use crate::svg_export::EMPTY_CAPTION;

/// Passes drawn under the stroke to fake the Gaussian halo.
const GLOW_PASSES: u32 = 3;
const GLOW_ALPHA: f32 = 0.18;
const FRAME_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(248, 250, 252);

fn color(rgb: [u8; 3], opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha)
}

/// Maps render units (a `FRAME_SIZE` square) onto a screen rect.
#[derive(Debug, Clone, Copy)]
struct FrameTransform {
    origin: egui::Pos2,
    scale: f32,
}

impl FrameTransform {
    fn new(rect: egui::Rect) -> Self {
        Self {
            origin: rect.min,
            scale: rect.width().min(rect.height()) / FRAME_SIZE,
        }
    }

    fn apply(&self, p: bevy::math::Vec2) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y) * self.scale
    }
}

/// Reserve a square frame no larger than the card and the available width.
pub fn allocate_frame(ui: &mut egui::Ui) -> (egui::Rect, egui::Response) {
    let side = ui.available_width().clamp(120.0, FRAME_SIZE);
    ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover())
}

/// Draw the scene into `rect`: gradient fill, glow, stroke, then markers.
///
/// An empty scene draws only the frame background.
pub fn paint_scene(painter: &egui::Painter, rect: egui::Rect, scene: &ParcelScene) {
    painter.rect_filled(rect, 8.0, FRAME_BACKGROUND);
    if scene.is_empty() {
        return;
    }
    let frame = FrameTransform::new(rect);

    paint_fill(painter, frame, scene);

    let visible: Vec<egui::Pos2> = scene
        .visible_outline()
        .into_iter()
        .map(|p| frame.apply(p))
        .collect();
    if visible.len() >= 2 {
        for pass in (1..=GLOW_PASSES).rev() {
            let spread = GLOW_STD_DEVIATION * 2.0 * pass as f32 / GLOW_PASSES as f32;
            painter.add(egui::Shape::line(
                visible.clone(),
                egui::Stroke::new(
                    (STROKE_WIDTH + spread) * frame.scale,
                    color(BLUE, GLOW_ALPHA / pass as f32),
                ),
            ));
        }
        painter.add(egui::Shape::line(
            visible,
            egui::Stroke::new(STROKE_WIDTH * frame.scale, color(BLUE, 1.0)),
        ));
    }

    for marker in &scene.markers {
        if marker.scale <= 0.0 {
            continue;
        }
        painter.circle_filled(
            frame.apply(marker.center),
            MARKER_RADIUS * marker.scale * frame.scale,
            color(BLUE, 1.0),
        );
    }
}

fn paint_fill(painter: &egui::Painter, frame: FrameTransform, scene: &ParcelScene) {
    if scene.triangles.is_empty() {
        return;
    }
    let mut mesh = egui::Mesh::default();
    for &p in &scene.vertices {
        let rgb = mix(BLUE, VIOLET, scene.gradient_t(p));
        mesh.colored_vertex(frame.apply(p), color(rgb, FILL_OPACITY));
    }
    for [a, b, c] in &scene.triangles {
        mesh.add_triangle(*a as u32, *b as u32, *c as u32);
    }
    painter.add(egui::Shape::mesh(mesh));
}

/// Placeholder for an empty working set: faint gradient and a caption.
pub fn paint_empty_state(painter: &egui::Painter, rect: egui::Rect) {
    let mut mesh = egui::Mesh::default();
    let start = color(BLUE, EMPTY_OPACITY);
    let end = color(VIOLET, EMPTY_OPACITY);
    let middle = color(mix(BLUE, VIOLET, 0.5), EMPTY_OPACITY);
    mesh.colored_vertex(rect.left_top(), start);
    mesh.colored_vertex(rect.right_top(), middle);
    mesh.colored_vertex(rect.right_bottom(), end);
    mesh.colored_vertex(rect.left_bottom(), middle);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));

    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        EMPTY_CAPTION,
        egui::FontId::proportional(16.0),
        color(SLATE, 1.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealPhase;
    use crate::scene::render;

    /// Paint `geometry` into a headless egui frame and count the shapes.
    fn painted_shapes(geometry: &[parcels::Coordinate], phase: RevealPhase) -> usize {
        let ctx = egui::Context::default();
        let scene = render(geometry, phase);
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let (rect, _) = allocate_frame(ui);
                paint_scene(&ui.painter_at(rect), rect, &scene);
            });
        });
        output.shapes.len()
    }

    #[test]
    fn test_empty_geometry_paints_frame_only() {
        let empty = painted_shapes(&[], RevealPhase::Static);
        let single = painted_shapes(&[[200.0, 200.0]], RevealPhase::Static);
        assert!(empty > 0, "frame background is drawn");
        assert!(single > empty, "the lone marker is drawn on top");
    }

    #[test]
    fn test_single_point_while_revealing() {
        let shapes = painted_shapes(&[[200.0, 200.0]], RevealPhase::Revealing { elapsed: 1.0 });
        assert!(shapes > 0);
    }

    #[test]
    fn test_polygon_paints_fill_stroke_and_markers() {
        let triangle = [[100.0, 100.0], [300.0, 100.0], [200.0, 300.0]];
        let single = painted_shapes(&[[200.0, 200.0]], RevealPhase::Static);
        let full = painted_shapes(&triangle, RevealPhase::Static);
        // Fill mesh, glow passes, stroke and two more markers.
        assert!(full >= single + 1 + GLOW_PASSES as usize + 1 + 2);
    }

    #[test]
    fn test_empty_state_paints() {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let (rect, _) = allocate_frame(ui);
                paint_empty_state(&ui.painter_at(rect), rect);
            });
        });
        assert!(output.shapes.len() >= 2);
    }
}
