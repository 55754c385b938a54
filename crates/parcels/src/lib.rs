use bevy::prelude::*;

pub mod app_state;
pub mod config;
pub mod entry_form;
pub mod notices;
pub mod record;
pub mod record_store;
pub mod shape;
pub mod shell;
pub mod working_set;


#[cfg(any(test, feature = "harness"))]
pub mod test_harness;

pub use app_state::LoadState;
pub use record::{Coordinate, NewParcel, ParcelRecord};
pub use record_store::{MemoryStore, RecordStore, StoreError, StoreHandle, StoreReply};
pub use shell::{ParcelAdded, ParcelsLoaded, ReloadParcelsRequest, SubmitParcelRequest};
pub use working_set::ParcelList;

/// Working set, entry form and store wiring.
///
/// Requires `StatesPlugin` (part of `DefaultPlugins`). A [`StoreHandle`] and
/// [`config::AppConfig`] inserted before this plugin are kept; otherwise the
/// defaults (no store configured) apply.
pub struct ParcelsPlugin;

impl Plugin for ParcelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<LoadState>()
            .init_resource::<config::AppConfig>()
            .init_resource::<StoreHandle>()
            .init_resource::<shape::ShapeRng>()
            .init_resource::<ParcelList>()
            .init_resource::<entry_form::EntryForm>()
            .init_resource::<notices::NoticeBoard>()
            .init_resource::<shell::PendingRequests>()
            .add_event::<SubmitParcelRequest>()
            .add_event::<ReloadParcelsRequest>()
            .add_event::<ParcelAdded>()
            .add_event::<ParcelsLoaded>()
            .add_systems(OnEnter(LoadState::Loading), shell::begin_load)
            .add_systems(
                Update,
                (
                    shell::poll_load.run_if(in_state(LoadState::Loading)),
                    shell::request_reload.run_if(in_state(LoadState::Ready)),
                    (shell::submit_entry_form, shell::poll_insert).chain(),
                    notices::tick_notices,
                ),
            );
    }
}
