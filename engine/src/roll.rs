//! Voter roll: who is registered and whether they have voted or committed.

use crate::error::ElectionError;
use agora_types::{Identity, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-voter state.
///
/// `has_voted` (direct mode) and `has_committed` (commit-reveal mode) are
/// mutually exclusive: one election uses exactly one of them. Each flips
/// false→true exactly once; no operation resets either.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub registered_at: Timestamp,
    pub has_voted: bool,
    pub has_committed: bool,
}

/// Registered voters of one election.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRoll {
    voters: HashMap<Identity, Voter>,
}

impl VoterRoll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity; fails if it is already on the roll.
    pub fn register(&mut self, identity: Identity, now: Timestamp) -> Result<(), ElectionError> {
        if self.voters.contains_key(&identity) {
            return Err(ElectionError::AlreadyRegistered(identity));
        }
        self.voters.insert(
            identity,
            Voter {
                registered_at: now,
                has_voted: false,
                has_committed: false,
            },
        );
        Ok(())
    }

    pub fn get(&self, identity: &Identity) -> Option<&Voter> {
        self.voters.get(identity)
    }

    pub fn is_registered(&self, identity: &Identity) -> bool {
        self.voters.contains_key(identity)
    }

    /// Check that `identity` may cast a direct vote, without mutating.
    pub fn check_can_vote(&self, identity: &Identity) -> Result<(), ElectionError> {
        let voter = self
            .voters
            .get(identity)
            .ok_or_else(|| ElectionError::NotRegistered(identity.clone()))?;
        if voter.has_voted {
            return Err(ElectionError::AlreadyVoted(identity.clone()));
        }
        Ok(())
    }

    /// Flip `has_voted` false→true. Callers must have validated via
    /// [`Self::check_can_vote`] in the same mutation.
    pub fn mark_voted(&mut self, identity: &Identity) -> Result<(), ElectionError> {
        let voter = self
            .voters
            .get_mut(identity)
            .ok_or_else(|| ElectionError::NotRegistered(identity.clone()))?;
        if voter.has_voted {
            return Err(ElectionError::AlreadyVoted(identity.clone()));
        }
        voter.has_voted = true;
        Ok(())
    }

    /// Flip `has_committed` false→true.
    pub fn mark_committed(&mut self, identity: &Identity) -> Result<(), ElectionError> {
        let voter = self
            .voters
            .get_mut(identity)
            .ok_or_else(|| ElectionError::NotRegistered(identity.clone()))?;
        if voter.has_committed {
            return Err(ElectionError::AlreadyCommitted(identity.clone()));
        }
        voter.has_committed = true;
        Ok(())
    }

    /// Number of registered voters.
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    /// Number of voters with `has_voted = true`.
    pub fn voted_count(&self) -> u64 {
        self.voters.values().filter(|v| v.has_voted).count() as u64
    }
}
