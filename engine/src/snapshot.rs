//! Snapshot serialization of election state.
//!
//! The snapshot is the version-independent persisted layout: a logic upgrade
//! must leave these bytes unchanged, and any future layout change requires an
//! explicit versioned migration, never silent reinterpretation.

use crate::data::ElectionData;
use crate::error::ElectionError;

/// Serialize an election's persistent state.
pub fn snapshot(data: &ElectionData) -> Result<Vec<u8>, ElectionError> {
    bincode::serialize(data).map_err(|e| ElectionError::Snapshot(e.to_string()))
}

/// Restore an election's persistent state from snapshot bytes.
pub fn restore(bytes: &[u8]) -> Result<ElectionData, ElectionError> {
    bincode::deserialize(bytes).map_err(|e| ElectionError::Snapshot(e.to_string()))
}
