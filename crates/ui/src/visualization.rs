//! Central panel: loading indicator, empty-state placeholder or card grid.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use parcels::config::AppConfig;
use parcels::notices::NoticeBoard;
use parcels::{LoadState, ParcelList, ReloadParcelsRequest};
use rendering::painter::{allocate_frame, paint_empty_state};
use rendering::reveal::RevealState;

use crate::loading_indicator::{self, LoadingAnimation};
use crate::map_panel::MapPanel;
use crate::parcel_grid;

/// Which of the three central views is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationView {
    Loading,
    Empty,
    Cards(usize),
}

impl VisualizationView {
    pub fn select(state: LoadState, list: &ParcelList) -> Self {
        match state {
            LoadState::Loading => VisualizationView::Loading,
            LoadState::Ready if list.is_empty() => VisualizationView::Empty,
            LoadState::Ready => VisualizationView::Cards(list.len()),
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn visualization_ui(
    mut contexts: EguiContexts,
    state: Res<State<LoadState>>,
    list: Res<ParcelList>,
    reveal: Res<RevealState>,
    config: Res<AppConfig>,
    time: Res<Time>,
    mut loading: ResMut<LoadingAnimation>,
    mut map: ResMut<MapPanel>,
    mut notices: ResMut<NoticeBoard>,
    mut reload: EventWriter<ReloadParcelsRequest>,
) {
    let view = VisualizationView::select(*state.get(), &list);
    if view == VisualizationView::Loading {
        loading.tick(time.delta());
    } else {
        loading.reset();
    }

    egui::CentralPanel::default().show(contexts.ctx_mut(), |ui| match view {
        VisualizationView::Loading => loading_indicator::show(ui, &loading),
        VisualizationView::Empty => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                let (rect, _) = allocate_frame(ui);
                paint_empty_state(&ui.painter_at(rect), rect);
                ui.add_space(8.0);
                if ui.button("Yenile").clicked() {
                    reload.send(ReloadParcelsRequest);
                }
            });
        }
        VisualizationView::Cards(_) => {
            let actions = parcel_grid::show(ui, &list, &reveal, config.maps_api_key.is_some());
            if actions.reload {
                reload.send(ReloadParcelsRequest);
            }
            if let Some(record) = actions.open_map {
                map.open(record);
            }
            if actions.copied_svg {
                notices.info("SVG panoya kopyalandı");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcels::test_harness::TestShell;
    use parcels::{MemoryStore, NewParcel};

    fn view(shell: &TestShell) -> VisualizationView {
        VisualizationView::select(shell.load_state(), shell.list())
    }

    #[test]
    fn test_empty_store_shows_placeholder() {
        let shell = TestShell::new(MemoryStore::new());
        assert_eq!(view(&shell), VisualizationView::Empty);
    }

    #[test]
    fn test_failed_load_shows_placeholder() {
        let store = MemoryStore::new()
            .failing_fetch(parcels::StoreError::Transport("offline".to_string()));
        let shell = TestShell::new(store);
        assert_eq!(view(&shell), VisualizationView::Empty);
    }

    #[test]
    fn test_loaded_records_show_cards() {
        let store = MemoryStore::new().with_record(NewParcel {
            ada_no: "5".to_string(),
            parsel_no: "6".to_string(),
            il: None,
            ilce: None,
            mahalle: None,
            coordinates: None,
        });
        let mut shell = TestShell::new(store);
        assert_eq!(view(&shell), VisualizationView::Cards(1));

        shell.fill_identifier("123", "45");
        shell.submit();
        assert_eq!(view(&shell), VisualizationView::Cards(2));
    }

    #[test]
    fn test_loading_while_fetch_outstanding() {
        assert_eq!(
            VisualizationView::select(LoadState::Loading, &ParcelList::default()),
            VisualizationView::Loading
        );
    }
}
