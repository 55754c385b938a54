//! REST backend for the parcel record store.
//!
//! [`RestStore`] implements the `parcels::RecordStore` contract against a
//! hosted PostgREST-style service. The HTTP round trip itself is delegated
//! to a [`Transport`]: `ureq` on the desktop, `fetch` in the browser.

use std::sync::Arc;

use bevy::prelude::*;

use parcels::config::{AppConfig, StoreConfig};
use parcels::record_store::UnconfiguredStore;
use parcels::{MemoryStore, NewParcel, ParcelRecord, RecordStore, StoreError, StoreHandle, StoreReply};

pub mod rest;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

use rest::{RestRequest, RestResponse};

/// Callback receiving the outcome of one HTTP round trip.
pub type Completion = Box<dyn FnOnce(Result<RestResponse, StoreError>) + Send>;

/// Executes a request off the frame and reports back through `done`.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: RestRequest, done: Completion);
}

/// The transport for the current target.
pub fn default_transport() -> Arc<dyn Transport> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(native::UreqTransport::default())
    }
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(web::FetchTransport)
    }
}

/// Record store backed by the hosted `parcels` table.
pub struct RestStore {
    config: StoreConfig,
    transport: Arc<dyn Transport>,
}

impl RestStore {
    pub fn new(config: StoreConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }
}

impl RecordStore for RestStore {
    fn fetch_recent(&self, limit: usize, reply: StoreReply<Vec<ParcelRecord>>) {
        let request = rest::fetch_recent_request(&self.config, limit);
        self.transport.execute(
            request,
            Box::new(move |outcome| reply.fulfill(outcome.and_then(rest::parse_rows))),
        );
    }

    fn insert(&self, parcel: NewParcel, reply: StoreReply<ParcelRecord>) {
        let request = match rest::insert_request(&self.config, &parcel) {
            Ok(request) => request,
            Err(e) => {
                reply.fulfill(Err(e));
                return;
            }
        };
        self.transport.execute(
            request,
            Box::new(move |outcome| reply.fulfill(outcome.and_then(rest::parse_inserted))),
        );
    }

    fn describe(&self) -> String {
        format!("REST ({})", self.config.service_url)
    }
}

/// Pick the store the app should talk to.
///
/// `offline` wins; otherwise a complete [`StoreConfig`] gives a [`RestStore`]
/// and anything less gives a store whose every call fails, so the app still
/// starts and shows an empty list.
pub fn store_for(config: &AppConfig, offline: bool) -> StoreHandle {
    if offline {
        return StoreHandle::new(MemoryStore::new());
    }
    match &config.store {
        Some(store_config) => {
            StoreHandle::new(RestStore::new(store_config.clone(), default_transport()))
        }
        None => StoreHandle::new(UnconfiguredStore),
    }
}

/// Installs the [`StoreHandle`] chosen from the [`AppConfig`] resource.
///
/// Add after the config has been inserted.
pub struct StorePlugin {
    pub offline: bool,
}

impl Plugin for StorePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<AppConfig>()
            .cloned()
            .unwrap_or_default();
        let handle = store_for(&config, self.offline);
        info!("Record store: {}", handle.0.describe());
        app.insert_resource(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers every request with a canned response and remembers it.
    #[derive(Default)]
    struct CannedTransport {
        answer: Mutex<Option<Result<RestResponse, StoreError>>>,
        seen: Mutex<Vec<RestRequest>>,
    }

    impl CannedTransport {
        fn answering(answer: Result<RestResponse, StoreError>) -> Arc<Self> {
            Arc::new(Self {
                answer: Mutex::new(Some(answer)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, request: RestRequest, done: Completion) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request);
            }
            let answer = self
                .answer
                .lock()
                .ok()
                .and_then(|mut a| a.take())
                .unwrap_or(Err(StoreError::Transport("no answer".to_string())));
            done(answer);
        }
    }

    fn config() -> StoreConfig {
        StoreConfig {
            service_url: "https://demo.supabase.co".to_string(),
            anon_key: "k".to_string(),
        }
    }

    #[test]
    fn test_fetch_recent_round_trip() {
        let transport = CannedTransport::answering(Ok(RestResponse {
            status: 200,
            body: r#"[{"id":"1","ada_no":"10","parsel_no":"3","created_at":"2024-01-01T00:00:00Z"}]"#
                .to_string(),
        }));
        let store = RestStore::new(config(), transport.clone());
        let reply = StoreReply::new();
        store.fetch_recent(10, reply.clone());

        let rows = reply.take().expect("answered").expect("ok");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ada_no, "10");
        let seen = transport.seen.lock().expect("lock");
        assert!(seen[0].url.contains("limit=10"));
    }

    #[test]
    fn test_insert_transport_failure_reported() {
        let transport =
            CannedTransport::answering(Err(StoreError::Transport("dns failure".to_string())));
        let store = RestStore::new(config(), transport);
        let reply = StoreReply::new();
        store.insert(
            NewParcel {
                ada_no: "1".to_string(),
                parsel_no: "2".to_string(),
                il: None,
                ilce: None,
                mahalle: None,
                coordinates: None,
            },
            reply.clone(),
        );
        assert_eq!(
            reply.take(),
            Some(Err(StoreError::Transport("dns failure".to_string())))
        );
    }

    #[test]
    fn test_insert_remote_error_reported() {
        let transport = CannedTransport::answering(Ok(RestResponse {
            status: 400,
            body: r#"{"message":"null value in column \"ada_no\""}"#.to_string(),
        }));
        let store = RestStore::new(config(), transport.clone());
        let reply = StoreReply::new();
        store.insert(
            NewParcel {
                ada_no: String::new(),
                parsel_no: "2".to_string(),
                il: None,
                ilce: None,
                mahalle: None,
                coordinates: None,
            },
            reply.clone(),
        );
        assert!(matches!(
            reply.take(),
            Some(Err(StoreError::Remote { status: 400, .. }))
        ));
        let seen = transport.seen.lock().expect("lock");
        assert_eq!(seen.len(), 1, "exactly one round trip, no retry");
    }

    #[test]
    fn test_store_for_selection() {
        let unconfigured = store_for(&AppConfig::default(), false);
        assert_eq!(unconfigured.0.describe(), "unconfigured");

        let offline = store_for(&AppConfig::default(), true);
        assert_eq!(offline.0.describe(), "in-memory");

        let configured = store_for(
            &AppConfig {
                store: Some(config()),
                ..Default::default()
            },
            false,
        );
        assert!(configured.0.describe().starts_with("REST"));
    }
}
