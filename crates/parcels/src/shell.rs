//! Application shell: loads the recent records, turns form submissions into
//! store inserts and keeps the working set in sync with the answers.
//!
//! Both store calls are asynchronous. A call parks its [`StoreReply`] in
//! [`PendingRequests`] and a poll system picks the result up on a later (or
//! the same) frame.

use bevy::prelude::*;

use crate::app_state::LoadState;
use crate::config::AppConfig;
use crate::entry_form::{EntryForm, FormError};
use crate::notices::NoticeBoard;
use crate::record::ParcelRecord;
use crate::record_store::{StoreHandle, StoreReply};
use crate::shape::ShapeRng;
use crate::working_set::ParcelList;

const INSERT_FAILED: &str = "Parsel kaydedilemedi";
const LOAD_FAILED: &str = "Parseller yüklenemedi";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The user pressed the submit button.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SubmitParcelRequest;

/// The user asked to reload the working set from the store.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReloadParcelsRequest;

/// A record was persisted and prepended at index 0.
#[derive(Event, Debug, Clone)]
pub struct ParcelAdded {
    pub record: ParcelRecord,
}

/// A `fetch_recent` round trip finished. `count` is 0 on failure.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParcelsLoaded {
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Pending calls
// ---------------------------------------------------------------------------

/// At most one load and one insert are in flight at any time.
#[derive(Resource, Default)]
pub struct PendingRequests {
    load: Option<StoreReply<Vec<ParcelRecord>>>,
    insert: Option<StoreReply<ParcelRecord>>,
}

impl PendingRequests {
    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    pub fn is_inserting(&self) -> bool {
        self.insert.is_some()
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Kick off `fetch_recent` whenever the shell enters [`LoadState::Loading`].
pub fn begin_load(
    store: Res<StoreHandle>,
    config: Res<AppConfig>,
    mut pending: ResMut<PendingRequests>,
) {
    let reply = StoreReply::new();
    info!(
        "Loading {} most recent parcels from {} store",
        config.recent_limit,
        store.0.describe()
    );
    store.0.fetch_recent(config.recent_limit, reply.clone());
    pending.load = Some(reply);
}

/// Install the loaded page. A failed fetch leaves the current list as is.
pub fn poll_load(
    mut pending: ResMut<PendingRequests>,
    mut list: ResMut<ParcelList>,
    mut notices: ResMut<NoticeBoard>,
    mut next_state: ResMut<NextState<LoadState>>,
    mut loaded: EventWriter<ParcelsLoaded>,
) {
    let Some(result) = pending.load.as_ref().and_then(StoreReply::take) else {
        return;
    };
    pending.load = None;

    let count = match result {
        Ok(records) => {
            info!("Loaded {} parcels", records.len());
            list.replace(records);
            list.len()
        }
        Err(e) => {
            error!("Error loading parcels: {e}");
            notices.error(LOAD_FAILED);
            0
        }
    };
    loaded.send(ParcelsLoaded { count });
    next_state.set(LoadState::Ready);
}

/// Re-enter `Loading` on request; entering it starts a fresh fetch.
pub fn request_reload(
    mut requests: EventReader<ReloadParcelsRequest>,
    mut next_state: ResMut<NextState<LoadState>>,
) {
    if requests.read().next().is_some() {
        requests.read().for_each(drop);
        next_state.set(LoadState::Loading);
    }
}

/// Validate the form and hand the new parcel to the store.
pub fn submit_entry_form(
    mut requests: EventReader<SubmitParcelRequest>,
    mut form: ResMut<EntryForm>,
    mut rng: ResMut<ShapeRng>,
    store: Res<StoreHandle>,
    mut pending: ResMut<PendingRequests>,
    mut notices: ResMut<NoticeBoard>,
) {
    // One submission per frame; extra clicks in the same frame are dropped.
    if requests.read().next().is_none() {
        return;
    }
    requests.read().for_each(drop);

    let parcel = match form.begin_submit(&mut rng.0) {
        Ok(parcel) => parcel,
        Err(FormError::Busy) => {
            warn!("Ignoring parcel submission while another is in flight");
            return;
        }
        Err(e) => {
            warn!("Parcel submission rejected: {e}");
            notices.error(e.notice());
            return;
        }
    };

    info!(
        "Submitting parcel ada={} parsel={} with {} vertices",
        parcel.ada_no,
        parcel.parsel_no,
        parcel.coordinates.as_ref().map_or(0, Vec::len)
    );
    let reply = StoreReply::new();
    store.0.insert(parcel, reply.clone());
    pending.insert = Some(reply);
}

/// Prepend a persisted record, or report the failure and keep the form.
pub fn poll_insert(
    mut pending: ResMut<PendingRequests>,
    mut form: ResMut<EntryForm>,
    mut list: ResMut<ParcelList>,
    mut notices: ResMut<NoticeBoard>,
    mut added: EventWriter<ParcelAdded>,
) {
    let Some(result) = pending.insert.as_ref().and_then(StoreReply::take) else {
        return;
    };
    pending.insert = None;

    match result {
        Ok(record) => {
            info!("Parcel {} saved", record.id);
            form.finish_submit(true);
            list.prepend(record.clone());
            added.send(ParcelAdded { record });
        }
        Err(e) => {
            error!("Error saving parcel: {e}");
            form.finish_submit(false);
            notices.error(INSERT_FAILED);
        }
    }
}
