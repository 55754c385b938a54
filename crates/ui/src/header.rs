use bevy_egui::{egui, EguiContexts};

use crate::theme;

pub const TITLE: &str = "Parsel Animasyon Görselleştirme";
pub const SUBTITLE: &str = "Ada ve parsel numaralarını girerek animasyonlu görselleştirme oluşturun";

pub fn header_ui(mut contexts: EguiContexts) {
    egui::TopBottomPanel::top("app_header").show(contexts.ctx_mut(), |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(TITLE)
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_HEADING),
            );
            ui.label(egui::RichText::new(SUBTITLE).color(theme::TEXT_MUTED));
            ui.add_space(12.0);
        });
    });
}
