use thiserror::Error;

use crate::id_generator::{CircleId, HullId};

/// Errors returned by explicit scene operations.
///
/// Pointer-driven interaction never produces these: degenerate geometry and
/// stale selections degrade to "no boundary" or a silent no-op instead.
#[derive(Debug, Error)]
pub enum HullError {
    #[error("Unknown hull: {0}")]
    UnknownHull(HullId),

    #[error("Unknown circle: {0}")]
    UnknownCircle(CircleId),

    #[error("Duplicate hull: {0}")]
    DuplicateHull(HullId),

    #[error("Duplicate circle: {0}")]
    DuplicateCircle(CircleId),

    #[error("Id out of range: {0}")]
    IdOutOfRange(u64),

    #[error("Invalid pairing: {0}")]
    InvalidPairing(String),

    #[error("Failed to serialize: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scene operations
pub type HullResult<T> = Result<T, HullError>;
