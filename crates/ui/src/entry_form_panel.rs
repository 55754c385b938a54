//! Left-hand form for new parcels.
//!
//! Only edits the [`EntryForm`] text fields and raises
//! [`SubmitParcelRequest`]; validation and the store call live in `parcels`.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use parcels::entry_form::EntryForm;
use parcels::SubmitParcelRequest;

use crate::theme;

const PANEL_WIDTH: f32 = 320.0;

pub const SUBMIT_LABEL: &str = "Parsel Ekle ve Görselleştir";
pub const SUBMITTING_LABEL: &str = "Ekleniyor...";

/// Label for the submit button in the current form state.
pub fn submit_label(form: &EntryForm) -> &'static str {
    if form.is_submitting() {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

fn field(ui: &mut egui::Ui, label: &str, hint: &str, value: &mut String) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
}

pub fn entry_form_ui(
    mut contexts: EguiContexts,
    mut form: ResMut<EntryForm>,
    mut submit: EventWriter<SubmitParcelRequest>,
) {
    egui::SidePanel::left("entry_form")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(contexts.ctx_mut(), |ui| {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("Parsel Bilgileri")
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_HEADING),
            );
            ui.add_space(8.0);

            // Deref once so the borrow checker sees disjoint field borrows.
            let form = &mut *form;
            let busy = form.is_submitting();
            let mut entered = false;

            ui.add_enabled_ui(!busy, |ui| {
                field(ui, "İl", "Örn: İstanbul", &mut form.il);
                field(ui, "İlçe", "Örn: Kadıköy", &mut form.ilce);
                field(ui, "Mahalle", "Örn: Caferağa", &mut form.mahalle);
                ui.columns(2, |columns| {
                    let ada = field(&mut columns[0], "Ada No *", "Ada numarası", &mut form.ada_no);
                    let parsel = field(
                        &mut columns[1],
                        "Parsel No *",
                        "Parsel numarası",
                        &mut form.parsel_no,
                    );
                    entered = [ada, parsel].iter().any(|r| {
                        r.lost_focus() && r.ctx.input(|i| i.key_pressed(egui::Key::Enter))
                    });
                });
            });

            ui.add_space(12.0);
            let button = egui::Button::new(
                egui::RichText::new(submit_label(form))
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(theme::ACCENT)
            .min_size(egui::vec2(ui.available_width(), 36.0));

            let clicked = ui.add_enabled(!busy, button).clicked();
            if (clicked || entered) && !busy {
                submit.send(SubmitParcelRequest);
            }
        });
}
