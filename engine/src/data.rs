//! Persistent state of one election.
//!
//! `ElectionData` is the version-independent layout: a logic upgrade changes
//! which code interprets this data, never the data itself. Everything here is
//! serde-serializable so the surrounding execution environment can persist it
//! as opaque bytes (see `snapshot`).

use crate::candidates::CandidateRegistry;
use crate::commit_reveal::CommitRevealLedger;
use crate::eligibility::EligibilityMode;
use crate::roll::VoterRoll;
use agora_types::{ElectionConfig, ElectionId, ElectionState, Event, Identity};
use serde::{Deserialize, Serialize};

/// All persistent entities of one election.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectionData {
    pub id: ElectionId,
    /// The owning identity (the creator). Authorizes settings changes,
    /// closed candidate registration, and emergency actions.
    pub owner: Identity,
    pub config: ElectionConfig,
    pub state: ElectionState,
    pub eligibility: EligibilityMode,
    pub candidates: CandidateRegistry,
    pub voters: VoterRoll,
    pub commitments: CommitRevealLedger,
    /// Emergency visibility override: results stay hidden in
    /// `EmergencyStopped` until the owner flips this.
    pub results_enabled_after_emergency: bool,
    /// Audit log; append-only.
    pub events: Vec<Event>,
    /// Reentrancy guard, set for the duration of each mutating operation.
    /// Transient: never persisted.
    #[serde(skip)]
    pub(crate) in_progress: bool,
}

impl ElectionData {
    pub fn new(
        id: ElectionId,
        owner: Identity,
        config: ElectionConfig,
        eligibility: EligibilityMode,
    ) -> Self {
        Self {
            id,
            owner,
            config,
            state: ElectionState::Created,
            eligibility,
            candidates: CandidateRegistry::new(),
            voters: VoterRoll::new(),
            commitments: CommitRevealLedger::new(),
            results_enabled_after_emergency: false,
            events: Vec::new(),
            in_progress: false,
        }
    }

    /// Append an audit event.
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Move to `to` along the lifecycle graph, recording the transition.
    pub(crate) fn transition(&mut self, to: ElectionState) {
        debug_assert!(self.state.can_transition_to(to), "{:?} -> {to:?}", self.state);
        let from = self.state;
        self.state = to;
        tracing::info!(election = %self.id, ?from, ?to, "election phase changed");
        self.events.push(Event::PhaseChanged {
            election: self.id,
            from,
            to,
        });
    }
}
