//! "Yükleniyor..." placeholder shown while the recent parcels are loading.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::theme;

pub const LOADING_LABEL: &str = "Yükleniyor";

/// Cycles the trailing dots of the loading label.
#[derive(Resource)]
pub struct LoadingAnimation {
    /// Number of dots currently shown (cycles 1 -> 2 -> 3 -> 1 ...).
    pub dots: usize,
    pub timer: Timer,
}

impl Default for LoadingAnimation {
    fn default() -> Self {
        Self {
            dots: 3,
            timer: Timer::from_seconds(0.4, TimerMode::Repeating),
        }
    }
}

impl LoadingAnimation {
    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
        if self.timer.just_finished() {
            self.dots = self.dots % 3 + 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn text(&self) -> String {
        format!("{LOADING_LABEL}{}", ".".repeat(self.dots))
    }
}

pub fn show(ui: &mut egui::Ui, animation: &LoadingAnimation) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(animation.text())
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_MUTED),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_full_label() {
        assert_eq!(LoadingAnimation::default().text(), "Yükleniyor...");
    }

    #[test]
    fn test_dots_cycle() {
        let mut animation = LoadingAnimation::default();
        let step = animation.timer.duration();
        animation.tick(step);
        assert_eq!(animation.dots, 1);
        animation.tick(step);
        animation.tick(step);
        assert_eq!(animation.dots, 3);
        animation.tick(step / 2);
        assert_eq!(animation.dots, 3, "no change mid-step");
    }
}
