//! Candidate registry: append-only list of candidates and their tallies.

use crate::error::ElectionError;
use agora_types::{CandidateId, Identity};
use serde::{Deserialize, Serialize};

/// A registered candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Dense id assigned at registration (0, 1, 2, …).
    pub id: CandidateId,
    /// The candidate's identity.
    pub identity: Identity,
    /// Opaque display metadata (name, platform, …).
    pub metadata: String,
    /// Votes received. Monotonically non-decreasing once voting starts.
    pub vote_count: u64,
}

/// Append-only candidate list keyed by dense id.
///
/// Candidates are never deleted; removing one after voting started would
/// break the tally-vs-voter accounting invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new candidate and assign the next dense id.
    pub fn register(&mut self, identity: Identity, metadata: String) -> CandidateId {
        let id = CandidateId::new(self.candidates.len() as u32);
        self.candidates.push(Candidate {
            id,
            identity,
            metadata,
            vote_count: 0,
        });
        id
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(id.as_u32() as usize)
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        (id.as_u32() as usize) < self.candidates.len()
    }

    /// Current tally of one candidate.
    pub fn tally_of(&self, id: CandidateId) -> Result<u64, ElectionError> {
        self.get(id)
            .map(|c| c.vote_count)
            .ok_or(ElectionError::NotFound(id))
    }

    /// Increment a candidate's tally; returns the new tally.
    pub fn increment_tally(&mut self, id: CandidateId) -> Result<u64, ElectionError> {
        let candidate = self
            .candidates
            .get_mut(id.as_u32() as usize)
            .ok_or(ElectionError::NotFound(id))?;
        candidate.vote_count += 1;
        Ok(candidate.vote_count)
    }

    /// All candidates in registration order.
    pub fn all(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Sum of all tallies.
    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.vote_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense() {
        let mut registry = CandidateRegistry::new();
        let a = registry.register(Identity::new("alice"), "A".into());
        let b = registry.register(Identity::new("bob"), "B".into());
        assert_eq!(a, CandidateId::new(0));
        assert_eq!(b, CandidateId::new(1));
    }

    #[test]
    fn tally_starts_at_zero_and_increments() {
        let mut registry = CandidateRegistry::new();
        let id = registry.register(Identity::new("alice"), "A".into());
        assert_eq!(registry.tally_of(id), Ok(0));
        assert_eq!(registry.increment_tally(id), Ok(1));
        assert_eq!(registry.increment_tally(id), Ok(2));
        assert_eq!(registry.tally_of(id), Ok(2));
    }

    #[test]
    fn unknown_candidate_is_not_found() {
        let registry = CandidateRegistry::new();
        let missing = CandidateId::new(5);
        assert_eq!(registry.tally_of(missing), Err(ElectionError::NotFound(missing)));
    }
}
