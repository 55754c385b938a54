//! # TestShell — headless harness for the application shell
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins`, `StatesPlugin` and
//! [`ParcelsPlugin`] so the load/submit flows can be driven frame by frame
//! without a window. Time advances by a fixed step per frame so timers are
//! deterministic.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::app_state::LoadState;
use crate::config::AppConfig;
use crate::entry_form::EntryForm;
use crate::notices::NoticeBoard;
use crate::record_store::{RecordStore, StoreHandle};
use crate::shape::ShapeRng;
use crate::shell::{ParcelAdded, ReloadParcelsRequest, SubmitParcelRequest};
use crate::working_set::ParcelList;
use crate::ParcelsPlugin;

/// Virtual time that passes per [`TestShell::update`].
pub const FRAME: Duration = Duration::from_millis(100);

pub struct TestShell {
    app: App,
}

/// Ids of every record announced through `ParcelAdded`, in arrival order.
#[derive(Resource, Default)]
pub struct AddedLog(pub Vec<String>);

fn record_added(mut events: EventReader<ParcelAdded>, mut log: ResMut<AddedLog>) {
    for event in events.read() {
        log.0.push(event.record.id.clone());
    }
}

impl TestShell {
    /// A shell backed by `store`, run until the startup load has settled.
    pub fn new<S: RecordStore>(store: S) -> Self {
        Self::build(store, |_| {})
    }

    /// Like [`TestShell::new`], letting the caller add plugins (e.g. the
    /// renderer) before the first frame.
    pub fn build<S, F>(store: S, extra: F) -> Self
    where
        S: RecordStore,
        F: FnOnce(&mut App),
    {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

        // Inserted before the plugin so its `init_resource` calls keep them.
        app.insert_resource(StoreHandle::new(store));
        app.insert_resource(ShapeRng::from_seed_u64(42));
        app.insert_resource(AppConfig::default());
        app.add_plugins(ParcelsPlugin);
        app.init_resource::<AddedLog>()
            .add_systems(Update, record_added);
        extra(&mut app);

        let mut shell = Self { app };
        shell.settle();
        shell
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run one frame.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Run `n` frames.
    pub fn updates(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run enough frames for state transitions and store replies to land.
    pub fn settle(&mut self) {
        self.updates(3);
    }

    /// Run frames until at least `duration` of virtual time has passed.
    pub fn advance(&mut self, duration: Duration) {
        let frames = duration.as_millis().div_ceil(FRAME.as_millis());
        self.updates(frames as u32);
    }

    /// Type into the required identifier fields.
    pub fn fill_identifier(&mut self, ada_no: &str, parsel_no: &str) {
        let mut form = self.app.world_mut().resource_mut::<EntryForm>();
        form.ada_no = ada_no.to_string();
        form.parsel_no = parsel_no.to_string();
    }

    /// Press the submit button and let the reply arrive.
    pub fn submit(&mut self) {
        self.app.world_mut().send_event(SubmitParcelRequest);
        self.settle();
    }

    /// Press the reload button and let the new page arrive.
    pub fn reload(&mut self) {
        self.app.world_mut().send_event(ReloadParcelsRequest);
        self.settle();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn list(&self) -> &ParcelList {
        self.app.world().resource::<ParcelList>()
    }

    pub fn form(&self) -> &EntryForm {
        self.app.world().resource::<EntryForm>()
    }

    pub fn notices(&self) -> &NoticeBoard {
        self.app.world().resource::<NoticeBoard>()
    }

    pub fn load_state(&self) -> LoadState {
        *self.app.world().resource::<State<LoadState>>().get()
    }

    /// Ids announced through `ParcelAdded` so far.
    pub fn added_ids(&self) -> &[String] {
        &self.app.world().resource::<AddedLog>().0
    }
}
