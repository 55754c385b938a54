use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod entry_form_panel;
pub mod header;
pub mod loading_indicator;
pub mod map_panel;
pub mod notice_toast;
pub mod parcel_grid;
pub mod theme;
pub mod visualization;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<loading_indicator::LoadingAnimation>()
            .init_resource::<map_panel::MapPanel>()
            .add_systems(Startup, theme::apply_parcel_theme)
            .add_systems(
                Update,
                // Panels before the central panel, floating windows last.
                (
                    header::header_ui,
                    entry_form_panel::entry_form_ui,
                    visualization::visualization_ui,
                    map_panel::map_panel_ui,
                    notice_toast::notice_toast_ui,
                )
                    .chain(),
            );
    }
}
