// File-backed implementation of the PersistenceGateway port.
//
// Purpose
// - Durable storage for the API binary: one pretty-printed JSON file per
//   storage key under a data directory.
//
// Responsibilities
// - A missing file reads as an empty collection (first run). A file that no
//   longer parses surfaces `GatewayError::Corrupt` instead of silently
//   wiping data.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::event::Event;
use crate::core::ports::{GatewayError, PersistenceGateway};

pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(data_dir: impl AsRef<Path>, storage_key: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{storage_key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn read_all(&self) -> Result<Vec<Event>, GatewayError> {
        let blob = match tokio::fs::read_to_string(&self.path).await {
            Ok(blob) => blob,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(GatewayError::Io(err.to_string())),
        };
        serde_json::from_str(&blob).map_err(|err| GatewayError::Corrupt(err.to_string()))
    }

    async fn write_all(&self, events: &[Event]) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| GatewayError::Io(err.to_string()))?;
        }
        let blob = serde_json::to_string_pretty(events)
            .map_err(|err| GatewayError::Backend(err.to_string()))?;
        tokio::fs::write(&self.path, blob)
            .await
            .map_err(|err| GatewayError::Io(err.to_string()))
    }
}
