//! Commit-reveal ledger.
//!
//! Voters first submit a hash hiding their choice, then disclose the choice
//! and salt during the reveal phase. The hash input ordering
//! `(candidate_id, salt, identity)` is fixed in `agora-crypto` and identical
//! at commit and reveal time; until reveal, the commitment discloses nothing
//! about the choice.

use crate::error::ElectionError;
use agora_crypto::{commitment_hash, Salt};
use agora_types::{CandidateId, CommitmentHash, Identity, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One voter's stored commitment. Never deleted, kept for audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Immutable after creation.
    pub hash: CommitmentHash,
    pub committed_at: Timestamp,
    /// Set exactly once, during a successful reveal.
    pub revealed: bool,
}

/// Commitments of one election, keyed by voter identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRevealLedger {
    commitments: HashMap<Identity, Commitment>,
}

impl CommitRevealLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a commitment; one per voter.
    pub fn commit(
        &mut self,
        identity: Identity,
        hash: CommitmentHash,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        if self.commitments.contains_key(&identity) {
            return Err(ElectionError::AlreadyCommitted(identity));
        }
        self.commitments.insert(
            identity,
            Commitment {
                hash,
                committed_at: now,
                revealed: false,
            },
        );
        Ok(())
    }

    /// Verify a disclosed `(candidate, salt)` against the stored commitment
    /// without mutating anything.
    pub fn check_reveal(
        &self,
        identity: &Identity,
        candidate: CandidateId,
        salt: &Salt,
    ) -> Result<(), ElectionError> {
        let commitment = self
            .commitments
            .get(identity)
            .ok_or_else(|| ElectionError::NotCommitted(identity.clone()))?;
        if commitment.revealed {
            return Err(ElectionError::AlreadyRevealed(identity.clone()));
        }
        if commitment_hash(candidate, salt, identity) != commitment.hash {
            return Err(ElectionError::RevealMismatch);
        }
        Ok(())
    }

    /// Consume the commitment after a successful [`Self::check_reveal`].
    pub fn mark_revealed(&mut self, identity: &Identity) -> Result<(), ElectionError> {
        let commitment = self
            .commitments
            .get_mut(identity)
            .ok_or_else(|| ElectionError::NotCommitted(identity.clone()))?;
        if commitment.revealed {
            return Err(ElectionError::AlreadyRevealed(identity.clone()));
        }
        commitment.revealed = true;
        Ok(())
    }

    pub fn get(&self, identity: &Identity) -> Option<&Commitment> {
        self.commitments.get(identity)
    }

    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    /// Number of commitments already revealed.
    pub fn revealed_count(&self) -> u64 {
        self.commitments.values().filter(|c| c.revealed).count() as u64
    }
}
