//! Map window for one parcel, opened from its card.
//!
//! Draws the outline projected onto a fitted Web Mercator view and links to
//! the static map image of the same view. Only offered when a maps API key
//! is configured.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use parcels::config::AppConfig;
use parcels::ParcelRecord;
use rendering::map_overlay::{MapOverlay, POLYGON_STYLE};
use rendering::tessellate::triangulate;

use crate::theme;

const MAP_SIZE: f32 = 400.0;
const MAP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(233, 236, 239);

/// The parcel whose map is open, if any. Holds a copy so prepends to the
/// working set do not change which parcel is shown.
#[derive(Resource, Default)]
pub struct MapPanel {
    pub record: Option<ParcelRecord>,
}

impl MapPanel {
    pub fn open(&mut self, record: ParcelRecord) {
        self.record = Some(record);
    }

    pub fn close(&mut self) {
        self.record = None;
    }
}

fn style_color(rgb: [u8; 3], opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], alpha)
}

fn paint_overlay(ui: &mut egui::Ui, overlay: &MapOverlay) {
    let size = egui::vec2(MAP_SIZE, MAP_SIZE);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, MAP_BACKGROUND);

    let view_size = bevy::math::Vec2::new(MAP_SIZE, MAP_SIZE);
    let projected = overlay.projected(view_size);
    let points: Vec<egui::Pos2> = projected
        .iter()
        .map(|p| rect.min + egui::vec2(p.x, p.y))
        .collect();

    let style = POLYGON_STYLE;
    let mut mesh = egui::Mesh::default();
    let fill = style_color(style.fill_rgb, style.fill_opacity);
    for p in &points {
        mesh.colored_vertex(*p, fill);
    }
    for [a, b, c] in triangulate(&projected) {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    painter.add(egui::Shape::mesh(mesh));

    if points.len() >= 2 {
        painter.add(egui::Shape::closed_line(
            points,
            egui::Stroke::new(
                style.stroke_weight,
                style_color(style.stroke_rgb, style.stroke_opacity),
            ),
        ));
    }
}

pub fn map_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<MapPanel>,
    config: Res<AppConfig>,
) {
    let Some(record) = panel.record.clone() else {
        return;
    };

    let mut open = true;
    egui::Window::new(record.title())
        .id(egui::Id::new("parcel_map"))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(contexts.ctx_mut(), |ui| {
            let overlay = MapOverlay::new(record.geometry(), bevy::math::Vec2::splat(MAP_SIZE));
            paint_overlay(ui, &overlay);
            ui.label(
                egui::RichText::new(format!(
                    "Merkez: {:.5}, {:.5}  Yakınlık: {}",
                    overlay.view.center.lat, overlay.view.center.lng, overlay.view.zoom
                ))
                .small()
                .color(theme::TEXT_MUTED),
            );
            match &config.maps_api_key {
                Some(key) => {
                    let url = overlay
                        .static_map_url(key, bevy::math::Vec2::splat(MAP_SIZE));
                    ui.hyperlink_to("Harita görüntüsünü aç", url);
                }
                None => {
                    ui.colored_label(theme::ERROR, "Harita anahtarı tanımlı değil");
                }
            }
        });

    if !open {
        panel.close();
    }
}
