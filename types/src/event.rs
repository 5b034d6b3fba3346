//! Audit events.
//!
//! Every vote-affecting mutation emits exactly one event carrying enough
//! fields to reconstruct it (identity, election id, new values). The
//! per-election event log is the durable audit trail for external observers.

use crate::hash::CommitmentHash;
use crate::id::{CandidateId, ElectionId, LogicVersion};
use crate::identity::Identity;
use crate::state::ElectionState;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// An entry in the audit log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ElectionCreated {
        election: ElectionId,
        creator: Identity,
        logic_version: LogicVersion,
    },
    CandidateRegistered {
        election: ElectionId,
        candidate: CandidateId,
        identity: Identity,
    },
    VoterRegistered {
        election: ElectionId,
        voter: Identity,
    },
    VoteCast {
        election: ElectionId,
        voter: Identity,
        candidate: CandidateId,
        new_tally: u64,
    },
    VoteCommitted {
        election: ElectionId,
        voter: Identity,
        commitment: CommitmentHash,
        committed_at: Timestamp,
    },
    VoteRevealed {
        election: ElectionId,
        voter: Identity,
        candidate: CandidateId,
        new_tally: u64,
    },
    PhaseChanged {
        election: ElectionId,
        from: ElectionState,
        to: ElectionState,
    },
    EmergencyStop {
        election: ElectionId,
        by: Identity,
        halted_in: ElectionState,
    },
    ResultsEnabledAfterEmergency {
        election: ElectionId,
        by: Identity,
    },
}
