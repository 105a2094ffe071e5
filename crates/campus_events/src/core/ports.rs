// Ports define what the store needs from the outside world, without implementing it.
//
// Purpose
// - The Persistence Gateway is the one external collaborator worth a
//   contract: a whole-collection blob read/write under a fixed storage key.
//
// Responsibilities
// - Keep the store independent of any concrete storage by coding against
//   this trait. A missing key reads as an empty collection, not an error.
//
// Testing guidance
// - Use the in-memory adapter for store tests; it round-trips through JSON
//   so serialization stays exercised.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::event::Event;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("storage io: {0}")]
    Io(String),

    #[error("stored blob is corrupt: {0}")]
    Corrupt(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Whole-collection persistence. Every write overwrites the full blob, so a
/// write is O(collection size); acceptable at this scale (tens of events,
/// hundreds of nested items).
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Empty backing store yields an empty collection.
    async fn read_all(&self) -> Result<Vec<Event>, GatewayError>;

    async fn write_all(&self, events: &[Event]) -> Result<(), GatewayError>;
}
