use bevy::prelude::*;

pub mod easing;
pub mod map_overlay;
pub mod painter;
pub mod path;
pub mod reveal;
pub mod scene;
pub mod svg_export;
pub mod tessellate;

use parcels::LoadState;
use reveal::RevealState;

pub use scene::{render, ParcelScene};

/// Drives the stroke reveal of the newest card.
///
/// Needs [`parcels::ParcelsPlugin`] for the events and the load state.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RevealState>()
            .add_systems(
                Update,
                (reveal::start_reveal, reveal::tick_reveal)
                    .chain()
                    .after(parcels::shell::poll_insert),
            )
            .add_systems(OnExit(LoadState::Ready), reveal::cancel_reveal);
    }
}
