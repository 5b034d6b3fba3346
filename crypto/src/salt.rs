//! Random salts for vote commitments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte random salt.
///
/// The salt is what prevents dictionary attacks against a small candidate
/// set: without it, a commitment over `candidate_id` alone could be matched
/// by hashing every candidate.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salt([u8; 32]);

impl Salt {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random salt.
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", hex::encode(&self.0[..4]))
    }
}
