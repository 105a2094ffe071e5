// Error taxonomy for store operations.
//
// Purpose
// - Typed, recoverable failures the presentation layer can map to user
//   messaging. Nothing here is fatal to the host application.

use thiserror::Error;

use crate::core::patch::PatchError;
use crate::core::ports::GatewayError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event or item not found: {id}")]
    NotFound { id: String },

    #[error("identifier already exists: {id}")]
    DuplicateId { id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("failed to load events: {0}")]
    Load(#[from] GatewayError),
}

impl From<PatchError> for StoreError {
    fn from(err: PatchError) -> Self {
        Self::Validation(err.to_string())
    }
}
