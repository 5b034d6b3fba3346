//! Vote commitment hashing.

use crate::hash::blake2b_256_multi;
use crate::salt::Salt;
use agora_types::{CandidateId, CommitmentHash, Identity};

/// Compute the commitment digest for a vote.
///
/// The input ordering is fixed at `(candidate_id, salt, identity)` and is
/// identical at commit time and reveal time; the candidate id is encoded as
/// little-endian bytes. Binding the voter identity into the digest stops one
/// voter replaying another voter's commitment.
pub fn commitment_hash(candidate: CandidateId, salt: &Salt, identity: &Identity) -> CommitmentHash {
    let id_bytes = candidate.as_u32().to_le_bytes();
    CommitmentHash::new(blake2b_256_multi(&[
        &id_bytes,
        salt.as_bytes(),
        identity.as_str().as_bytes(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_deterministic() {
        let salt = Salt::new([7u8; 32]);
        let voter = Identity::new("alice");
        let h1 = commitment_hash(CandidateId::new(3), &salt, &voter);
        let h2 = commitment_hash(CandidateId::new(3), &salt, &voter);
        assert_eq!(h1, h2);
    }

    #[test]
    fn commitment_binds_candidate() {
        let salt = Salt::new([7u8; 32]);
        let voter = Identity::new("alice");
        let h1 = commitment_hash(CandidateId::new(0), &salt, &voter);
        let h2 = commitment_hash(CandidateId::new(1), &salt, &voter);
        assert_ne!(h1, h2);
    }

    #[test]
    fn commitment_binds_salt() {
        let voter = Identity::new("alice");
        let h1 = commitment_hash(CandidateId::new(0), &Salt::new([1u8; 32]), &voter);
        let h2 = commitment_hash(CandidateId::new(0), &Salt::new([2u8; 32]), &voter);
        assert_ne!(h1, h2);
    }

    #[test]
    fn commitment_binds_identity() {
        let salt = Salt::new([7u8; 32]);
        let h1 = commitment_hash(CandidateId::new(0), &salt, &Identity::new("alice"));
        let h2 = commitment_hash(CandidateId::new(0), &salt, &Identity::new("bob"));
        assert_ne!(h1, h2);
    }
}
