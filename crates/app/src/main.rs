use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use parcels::config::AppConfig;

/// Run against an in-process store instead of the hosted service.
const OFFLINE_FLAG: &str = "--offline";

fn main() {
    let offline = std::env::args().any(|arg| arg == OFFLINE_FLAG);
    let (config, config_errors) = AppConfig::from_env();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Parsel Animasyon Görselleştirme".to_string(),
            resolution: (1280.0, 820.0).into(),
            present_mode: PresentMode::AutoVsync,
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(ClearColor(Color::srgb_u8(248, 250, 252)));

    // Logging is up once DefaultPlugins are in; report config problems now.
    for err in &config_errors {
        error!("Configuration: {err}");
    }
    if offline {
        info!("Offline mode: parcels are kept in memory only");
    }
    let store_missing = config.store.is_none() && !offline;

    app.insert_resource(config)
        .add_plugins(parcels::ParcelsPlugin)
        .add_plugins(store::StorePlugin { offline })
        .add_plugins((rendering::RenderingPlugin, ui::UiPlugin))
        .add_systems(Startup, spawn_camera);

    if store_missing {
        app.add_systems(Startup, warn_store_missing);
    }

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn warn_store_missing(mut notices: ResMut<parcels::notices::NoticeBoard>) {
    notices.error("Veritabanı bağlantısı yapılandırılmamış");
}
