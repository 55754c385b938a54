//! The record store contract.
//!
//! Rendering and form code only ever talk to a [`RecordStore`], so the
//! persistence technology behind it can be swapped without touching them.
//! Calls never block the frame: each one is handed a [`StoreReply`] slot that
//! the backend fills when the round trip finishes, and a system polls the
//! slot once per frame.

use std::fmt;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::record::{NewParcel, ParcelRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a store call failed. Always reported to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The service URL or access key was not configured.
    NotConfigured,
    /// The request never produced an HTTP response (DNS, TLS, offline, ...).
    Transport(String),
    /// The service answered with a non-success status.
    Remote { status: u16, message: String },
    /// The response body was not the JSON shape we expected.
    Decode(String),
    /// An insert succeeded but the service echoed no row back.
    EmptyResponse,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotConfigured => write!(f, "record store is not configured"),
            StoreError::Transport(msg) => write!(f, "transport error: {msg}"),
            StoreError::Remote { status, message } => {
                write!(f, "store returned HTTP {status}: {message}")
            }
            StoreError::Decode(msg) => write!(f, "could not decode store response: {msg}"),
            StoreError::EmptyResponse => write!(f, "store returned no row for the insert"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Reply slot
// ---------------------------------------------------------------------------

/// Shared slot bridging an asynchronous store call back into the ECS world.
pub struct StoreReply<T>(Arc<Mutex<Option<Result<T, StoreError>>>>);

impl<T> Clone for StoreReply<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for StoreReply<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }
}

impl<T> StoreReply<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the outcome. Later calls overwrite an untaken result.
    pub fn fulfill(&self, result: Result<T, StoreError>) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(result);
        }
    }

    /// Take the outcome if it has arrived.
    pub fn take(&self) -> Option<Result<T, StoreError>> {
        self.0.lock().ok().and_then(|mut guard| guard.take())
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// A remote (or in-process) home for parcel records.
///
/// Each call is one round trip: no retry, no caching, no offline queue.
pub trait RecordStore: Send + Sync + 'static {
    /// The `limit` most recently created records, newest first.
    fn fetch_recent(&self, limit: usize, reply: StoreReply<Vec<ParcelRecord>>);

    /// Persist one parcel and echo it back with its id and timestamp.
    fn insert(&self, parcel: NewParcel, reply: StoreReply<ParcelRecord>);

    /// Short name for log lines.
    fn describe(&self) -> String;
}

/// The store the application talks to.
#[derive(Resource, Clone)]
pub struct StoreHandle(pub Arc<dyn RecordStore>);

impl StoreHandle {
    pub fn new<S: RecordStore>(store: S) -> Self {
        Self(Arc::new(store))
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(UnconfiguredStore)
    }
}

// ---------------------------------------------------------------------------
// Backends that need no network
// ---------------------------------------------------------------------------

/// Stand-in used when the service URL or key is missing: every call fails.
pub struct UnconfiguredStore;

impl RecordStore for UnconfiguredStore {
    fn fetch_recent(&self, _limit: usize, reply: StoreReply<Vec<ParcelRecord>>) {
        reply.fulfill(Err(StoreError::NotConfigured));
    }

    fn insert(&self, _parcel: NewParcel, reply: StoreReply<ParcelRecord>) {
        reply.fulfill(Err(StoreError::NotConfigured));
    }

    fn describe(&self) -> String {
        "unconfigured".to_string()
    }
}

#[derive(Default)]
struct MemoryInner {
    rows: Vec<ParcelRecord>,
    next_id: u64,
    inserts: Vec<NewParcel>,
    fetches: usize,
    fail_fetch: Option<StoreError>,
    fail_insert: Option<StoreError>,
}

/// In-process store used by tests and `--offline` runs.
///
/// Ids are sequential and timestamps are synthetic but strictly increasing,
/// so "newest first" ordering matches insertion order. Cloning shares the
/// same rows, which lets tests keep a handle for inspection.
#[derive(Clone, Default)]
pub struct MemoryStore(Arc<Mutex<MemoryInner>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing row, as if another client had inserted it.
    pub fn with_record(self, parcel: NewParcel) -> Self {
        self.push(parcel);
        self
    }

    /// Make every `fetch_recent` fail with `error`.
    pub fn failing_fetch(self, error: StoreError) -> Self {
        if let Ok(mut inner) = self.0.lock() {
            inner.fail_fetch = Some(error);
        }
        self
    }

    /// Make every `insert` fail with `error`.
    pub fn failing_insert(self, error: StoreError) -> Self {
        if let Ok(mut inner) = self.0.lock() {
            inner.fail_insert = Some(error);
        }
        self
    }

    /// Every parcel ever handed to `insert`, including rejected ones.
    pub fn received_inserts(&self) -> Vec<NewParcel> {
        self.0
            .lock()
            .map(|inner| inner.inserts.clone())
            .unwrap_or_default()
    }

    pub fn fetch_count(&self) -> usize {
        self.0.lock().map(|inner| inner.fetches).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|inner| inner.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, parcel: NewParcel) -> Option<ParcelRecord> {
        let mut inner = self.0.lock().ok()?;
        inner.next_id += 1;
        let id = inner.next_id;
        let record = ParcelRecord::from_new(parcel, id.to_string(), synthetic_timestamp(id));
        inner.rows.push(record.clone());
        Some(record)
    }
}

/// `2024-01-01T00:00:00Z` plus `seq` seconds, so timestamps sort lexically.
fn synthetic_timestamp(seq: u64) -> String {
    let hours = seq / 3600;
    let minutes = (seq / 60) % 60;
    let seconds = seq % 60;
    format!("2024-01-01T{hours:02}:{minutes:02}:{seconds:02}Z")
}

impl RecordStore for MemoryStore {
    fn fetch_recent(&self, limit: usize, reply: StoreReply<Vec<ParcelRecord>>) {
        let result = match self.0.lock() {
            Ok(mut inner) => {
                inner.fetches += 1;
                match &inner.fail_fetch {
                    Some(err) => Err(err.clone()),
                    None => Ok(inner.rows.iter().rev().take(limit).cloned().collect()),
                }
            }
            Err(_) => Err(StoreError::Transport("memory store poisoned".to_string())),
        };
        reply.fulfill(result);
    }

    fn insert(&self, parcel: NewParcel, reply: StoreReply<ParcelRecord>) {
        let failure = match self.0.lock() {
            Ok(mut inner) => {
                inner.inserts.push(parcel.clone());
                inner.fail_insert.clone()
            }
            Err(_) => Some(StoreError::Transport("memory store poisoned".to_string())),
        };
        let result = match failure {
            Some(err) => Err(err),
            None => self.push(parcel).ok_or(StoreError::EmptyResponse),
        };
        reply.fulfill(result);
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parcel(ada: &str) -> NewParcel {
        NewParcel {
            ada_no: ada.to_string(),
            parsel_no: "1".to_string(),
            il: None,
            ilce: None,
            mahalle: None,
            coordinates: None,
        }
    }

    #[test]
    fn test_reply_take_is_one_shot() {
        let reply: StoreReply<u32> = StoreReply::new();
        assert!(reply.take().is_none());
        reply.clone().fulfill(Ok(5));
        assert_eq!(reply.take(), Some(Ok(5)));
        assert!(reply.take().is_none());
    }

    #[test]
    fn test_memory_store_fetch_is_newest_first_and_limited() {
        let store = MemoryStore::new()
            .with_record(parcel("a"))
            .with_record(parcel("b"))
            .with_record(parcel("c"));
        let reply = StoreReply::new();
        store.fetch_recent(2, reply.clone());
        let rows = reply.take().expect("filled").expect("ok");
        let adas: Vec<&str> = rows.iter().map(|r| r.ada_no.as_str()).collect();
        assert_eq!(adas, vec!["c", "b"]);
        assert!(rows[0].created_at > rows[1].created_at);
    }

    #[test]
    fn test_memory_store_insert_assigns_identity() {
        let store = MemoryStore::new();
        let reply = StoreReply::new();
        store.insert(parcel("7"), reply.clone());
        let record = reply.take().expect("filled").expect("ok");
        assert_eq!(record.id, "1");
        assert!(!record.created_at.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.received_inserts().len(), 1);
    }

    #[test]
    fn test_memory_store_failures() {
        let store = MemoryStore::new()
            .failing_fetch(StoreError::Transport("down".to_string()))
            .failing_insert(StoreError::Remote {
                status: 500,
                message: "boom".to_string(),
            });

        let list = StoreReply::new();
        store.fetch_recent(10, list.clone());
        assert!(matches!(list.take(), Some(Err(StoreError::Transport(_)))));

        let one = StoreReply::new();
        store.insert(parcel("x"), one.clone());
        assert!(matches!(one.take(), Some(Err(StoreError::Remote { status: 500, .. }))));
        assert!(store.is_empty(), "failed inserts must not persist");
        assert_eq!(store.received_inserts().len(), 1);
    }

    #[test]
    fn test_unconfigured_store_always_fails() {
        let reply = StoreReply::new();
        UnconfiguredStore.fetch_recent(10, reply.clone());
        assert_eq!(reply.take(), Some(Err(StoreError::NotConfigured)));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Remote {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("Invalid API key"), "got: {msg}");
    }

    #[test]
    fn test_synthetic_timestamps_sort() {
        assert!(synthetic_timestamp(59) < synthetic_timestamp(60));
        assert!(synthetic_timestamp(3599) < synthetic_timestamp(3600));
    }
}
