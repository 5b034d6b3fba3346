//! The replaceable behavior layer.
//!
//! Each logic version is one implementation of [`ElectionLogic`] operating on
//! the version-independent [`ElectionData`] layout. Installing a new version
//! never migrates data implicitly; a logic version that needed a different
//! state shape would have to ship an explicit, versioned migration step.

use agora_crypto::Salt;
use agora_engine::results::{self, CandidateTally};
use agora_engine::{AssetOracle, ElectionData, ElectionError, VotingEngine};
use agora_types::{
    CandidateId, CommitmentHash, ElectionConfig, ElectionState, Identity, Timestamp,
};

/// Behavior bound to persistent election state.
pub trait ElectionLogic: Send + Sync {
    fn register_candidate(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        identity: Identity,
        metadata: String,
        now: Timestamp,
    ) -> Result<CandidateId, ElectionError>;

    fn register_to_vote(
        &self,
        data: &mut ElectionData,
        identity: Identity,
        oracle: &dyn AssetOracle,
        now: Timestamp,
    ) -> Result<(), ElectionError>;

    fn vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        candidate: CandidateId,
        now: Timestamp,
    ) -> Result<u64, ElectionError>;

    fn commit_vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        hash: CommitmentHash,
        now: Timestamp,
    ) -> Result<(), ElectionError>;

    fn reveal_vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        candidate: CandidateId,
        salt: &Salt,
        now: Timestamp,
    ) -> Result<u64, ElectionError>;

    fn advance_phase(
        &self,
        data: &mut ElectionData,
        now: Timestamp,
    ) -> Result<ElectionState, ElectionError>;

    fn open_registration(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError>;

    fn start_voting(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError>;

    fn close_reveal(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError>;

    fn update_settings(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        new_config: ElectionConfig,
        now: Timestamp,
    ) -> Result<(), ElectionError>;

    fn emergency_stop(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
    ) -> Result<(), ElectionError>;

    fn enable_results_after_emergency(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
    ) -> Result<(), ElectionError>;

    fn results(&self, data: &ElectionData) -> Result<Vec<CandidateTally>, ElectionError>;

    fn winner(&self, data: &ElectionData) -> Result<CandidateTally, ElectionError>;

    fn leaderboard(&self, data: &ElectionData) -> Result<Vec<CandidateTally>, ElectionError>;
}

/// The stock behavior: delegates every operation to [`VotingEngine`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardLogic {
    engine: VotingEngine,
}

impl StandardLogic {
    pub fn new() -> Self {
        Self {
            engine: VotingEngine::new(),
        }
    }
}

impl ElectionLogic for StandardLogic {
    fn register_candidate(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        identity: Identity,
        metadata: String,
        now: Timestamp,
    ) -> Result<CandidateId, ElectionError> {
        self.engine
            .register_candidate(data, caller, identity, metadata, now)
    }

    fn register_to_vote(
        &self,
        data: &mut ElectionData,
        identity: Identity,
        oracle: &dyn AssetOracle,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.engine.register_to_vote(data, identity, oracle, now)
    }

    fn vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        candidate: CandidateId,
        now: Timestamp,
    ) -> Result<u64, ElectionError> {
        self.engine.vote(data, voter, candidate, now)
    }

    fn commit_vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        hash: CommitmentHash,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.engine.commit_vote(data, voter, hash, now)
    }

    fn reveal_vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        candidate: CandidateId,
        salt: &Salt,
        now: Timestamp,
    ) -> Result<u64, ElectionError> {
        self.engine.reveal_vote(data, voter, candidate, salt, now)
    }

    fn advance_phase(
        &self,
        data: &mut ElectionData,
        now: Timestamp,
    ) -> Result<ElectionState, ElectionError> {
        self.engine.advance_phase(data, now)
    }

    fn open_registration(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.engine.open_registration(data, caller, now)
    }

    fn start_voting(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.engine.start_voting(data, caller, now)
    }

    fn close_reveal(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.engine.close_reveal(data, caller, now)
    }

    fn update_settings(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        new_config: ElectionConfig,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.engine.update_settings(data, caller, new_config, now)
    }

    fn emergency_stop(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
    ) -> Result<(), ElectionError> {
        self.engine.emergency_stop(data, caller)
    }

    fn enable_results_after_emergency(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
    ) -> Result<(), ElectionError> {
        self.engine.enable_results_after_emergency(data, caller)
    }

    fn results(&self, data: &ElectionData) -> Result<Vec<CandidateTally>, ElectionError> {
        results::results(data)
    }

    fn winner(&self, data: &ElectionData) -> Result<CandidateTally, ElectionError> {
        results::winner(data)
    }

    fn leaderboard(&self, data: &ElectionData) -> Result<Vec<CandidateTally>, ElectionError> {
        results::leaderboard(data)
    }
}
