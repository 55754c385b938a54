//! The card grid: one card per record in the working set, newest first.

use bevy_egui::egui;

use parcels::{ParcelList, ParcelRecord};
use rendering::painter::{allocate_frame, paint_scene};
use rendering::reveal::RevealState;
use rendering::scene::{render, FRAME_SIZE};
use rendering::svg_export::parcel_svg;

use crate::theme;

const CARD_PADDING: i8 = 12;

/// What the user asked for while the grid was drawn.
#[derive(Debug, Default)]
pub struct GridActions {
    pub reload: bool,
    pub open_map: Option<ParcelRecord>,
    pub copied_svg: bool,
}

pub fn show(
    ui: &mut egui::Ui,
    list: &ParcelList,
    reveal: &RevealState,
    maps_enabled: bool,
) -> GridActions {
    let mut actions = GridActions::default();

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Parsel Görselleştirme")
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_HEADING),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Yenile").clicked() {
                actions.reload = true;
            }
        });
    });
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (index, record) in list.records().iter().enumerate() {
                    card(ui, index, record, reveal, maps_enabled, &mut actions);
                }
            });
        });

    actions
}

fn card(
    ui: &mut egui::Ui,
    index: usize,
    record: &ParcelRecord,
    reveal: &RevealState,
    maps_enabled: bool,
    actions: &mut GridActions,
) {
    let scene = render(record.geometry(), reveal.phase_for(index));
    if scene.is_revealing() {
        ui.ctx().request_repaint();
    }

    egui::Frame::group(ui.style())
        .fill(egui::Color32::WHITE)
        .inner_margin(egui::Margin::same(CARD_PADDING))
        .show(ui, |ui| {
            ui.set_width(FRAME_SIZE);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(record.title())
                        .strong()
                        .color(theme::TEXT_HEADING),
                );
                if let Some(location) = record.location_line() {
                    ui.label(egui::RichText::new(location).color(theme::TEXT_MUTED));
                }

                let (rect, _) = allocate_frame(ui);
                paint_scene(&ui.painter_at(rect), rect, &scene);

                ui.horizontal(|ui| {
                    if ui.small_button("SVG kopyala").clicked() {
                        ui.ctx().copy_text(parcel_svg(&scene));
                        actions.copied_svg = true;
                    }
                    if maps_enabled
                        && !scene.is_empty()
                        && ui.small_button("Haritada göster").clicked()
                    {
                        actions.open_map = Some(record.clone());
                    }
                });
            });
        });
}
