use bevy_egui::{egui, EguiContexts};

pub const FONT_HEADING: f32 = 20.0;
pub const FONT_TITLE: f32 = 26.0;

pub const TEXT_HEADING: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

pub fn apply_parcel_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();

    // Slate background, white panels
    let panel = egui::Color32::from_rgb(255, 255, 255);
    let inactive = egui::Color32::from_rgb(241, 245, 249);
    let hover = egui::Color32::from_rgb(226, 232, 240);

    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = ACCENT;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = egui::Color32::from_rgb(248, 250, 252);
    style.visuals.extreme_bg_color = panel;

    style.visuals.selection.bg_fill = ACCENT.gamma_multiply(0.3);
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    style.visuals.hyperlink_color = ACCENT;

    let window_rounding = egui::CornerRadius::same(8);
    let widget_rounding = egui::CornerRadius::same(6);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);

    ctx.set_style(style);
}
