// In memory implementation of the PersistenceGateway port.
//
// Purpose
// - Support store tests and local development without a real backing store.
//
// Responsibilities
// - Hold one serialized blob per storage key, like the browser-local
//   key-value store this stands in for. Reads and writes go through JSON so
//   the blob shape stays exercised even in tests.
// - `fail_writes` flips the adapter into a failing mode for
//   persist-degradation tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::event::Event;
use crate::core::ports::{GatewayError, PersistenceGateway};

pub const DEFAULT_STORAGE_KEY: &str = "campus-events-db";

pub struct InMemoryGateway {
    storage_key: String,
    blobs: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::with_storage_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            blobs: RwLock::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw blob under the storage key, for asserting on the persisted shape.
    pub async fn raw_blob(&self) -> Option<String> {
        self.blobs.read().await.get(&self.storage_key).cloned()
    }

    /// Seed the stored blob directly, bypassing serialization. Lets tests
    /// stage a corrupt backing store.
    pub async fn set_raw_blob(&self, blob: impl Into<String>) {
        self.blobs
            .write()
            .await
            .insert(self.storage_key.clone(), blob.into());
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn read_all(&self) -> Result<Vec<Event>, GatewayError> {
        let blobs = self.blobs.read().await;
        match blobs.get(&self.storage_key) {
            None => Ok(Vec::new()),
            Some(blob) => {
                serde_json::from_str(blob).map_err(|err| GatewayError::Corrupt(err.to_string()))
            }
        }
    }

    async fn write_all(&self, events: &[Event]) -> Result<(), GatewayError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend("write failure injected".into()));
        }
        let blob =
            serde_json::to_string(events).map_err(|err| GatewayError::Backend(err.to_string()))?;
        self.blobs.write().await.insert(self.storage_key.clone(), blob);
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_gateway_tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    use crate::core::event::EventCategory;

    fn sample_event(id: &str) -> Event {
        Event::new(
            id,
            "Career Paths in 2026",
            EventCategory::Seminar,
            NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_an_empty_collection_when_the_key_is_absent() {
        let gateway = InMemoryGateway::new();
        let events = gateway.read_all().await.unwrap();
        assert!(events.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_round_trip_the_collection() {
        let gateway = InMemoryGateway::new();
        let events = vec![sample_event("evt-1"), sample_event("evt-2")];
        gateway.write_all(&events).await.unwrap();
        assert_eq!(gateway.read_all().await.unwrap(), events);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_a_corrupt_blob_as_an_error() {
        let gateway = InMemoryGateway::new();
        gateway.set_raw_blob("not json").await;
        assert!(matches!(
            gateway.read_all().await,
            Err(GatewayError::Corrupt(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_writes_when_toggled() {
        let gateway = InMemoryGateway::new();
        gateway.fail_writes(true);
        assert!(gateway.write_all(&[sample_event("evt-1")]).await.is_err());
        gateway.fail_writes(false);
        assert!(gateway.write_all(&[sample_event("evt-1")]).await.is_ok());
    }
}
