//! Toasts for [`NoticeBoard`] entries, stacked in the bottom-right corner
//! and fading out as their timers run down.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use parcels::notices::{NoticeBoard, NoticeLevel};

use crate::theme;

const TOAST_WIDTH: f32 = 280.0;
const MARGIN: f32 = 16.0;

fn level_color(level: NoticeLevel) -> egui::Color32 {
    match level {
        NoticeLevel::Error => theme::ERROR,
        NoticeLevel::Info => theme::ACCENT,
    }
}

pub fn notice_toast_ui(mut contexts: EguiContexts, board: Res<NoticeBoard>) {
    if board.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notice_toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-MARGIN, -MARGIN))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.set_max_width(TOAST_WIDTH);
            for notice in board.iter() {
                // Fade over the last quarter of the display time.
                let fade = (notice.remaining_fraction() * 4.0).min(1.0);
                let color = level_color(notice.level);
                egui::Frame::new()
                    .fill(egui::Color32::WHITE.gamma_multiply(fade))
                    .stroke(egui::Stroke::new(1.0, color.gamma_multiply(fade)))
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.set_width(TOAST_WIDTH);
                        ui.label(egui::RichText::new(&notice.text).color(color.gamma_multiply(fade)));
                    });
            }
        });
    // Keep repainting so the fade is smooth.
    contexts.ctx_mut().request_repaint();
}
