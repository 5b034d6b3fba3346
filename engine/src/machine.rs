//! The voting engine: phase state machine and vote accounting.
//!
//! Every operation runs to completion under the per-election reentrancy
//! guard: it validates first, then mutates, so a failed call leaves the
//! election untouched. Time-driven transitions are applied at the top of each
//! operation from the caller-supplied `now`, so the stored state always
//! reflects the clock the caller observed.

use crate::data::ElectionData;
use crate::eligibility::AssetOracle;
use crate::error::ElectionError;
use agora_crypto::Salt;
use agora_types::{
    CandidateId, CommitmentHash, ElectionConfig, ElectionState, Event, Identity, Timestamp,
};

/// The behavior layer of an election.
///
/// Stateless: all persistent state lives in [`ElectionData`], which lets the
/// registry rebind elections to a different engine version without touching
/// their data.
#[derive(Clone, Copy, Debug, Default)]
pub struct VotingEngine;

impl VotingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run `f` with the reentrancy guard held.
    fn guarded<T>(
        data: &mut ElectionData,
        f: impl FnOnce(&mut ElectionData) -> Result<T, ElectionError>,
    ) -> Result<T, ElectionError> {
        if data.in_progress {
            return Err(ElectionError::ReentrancyViolation);
        }
        data.in_progress = true;
        let result = f(data);
        data.in_progress = false;
        result
    }

    /// Apply the time-driven transitions that `now` implies.
    fn advance_by_time(data: &mut ElectionData, now: Timestamp) {
        if data.state.accepts_registration() && data.config.start_time.has_passed(now) {
            data.transition(ElectionState::Active);
        }
        if data.state == ElectionState::Active && data.config.end_time.has_passed(now) {
            let next = if data.config.use_commit_reveal {
                ElectionState::RevealPhase
            } else {
                ElectionState::Ended
            };
            data.transition(next);
        }
    }

    /// Apply any pending time-driven transition and return the current state.
    /// Permissionless: anyone may nudge the clock forward.
    pub fn advance_phase(
        &self,
        data: &mut ElectionData,
        now: Timestamp,
    ) -> Result<ElectionState, ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            Ok(data.state)
        })
    }

    /// Explicitly open registration (owner). Registration also opens
    /// implicitly on the first candidate or voter registration.
    pub fn open_registration(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if data.state != ElectionState::Created {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            data.transition(ElectionState::RegistrationOpen);
            Ok(())
        })
    }

    /// Explicitly start voting before `start_time` (owner), once the
    /// candidate registration deadline has passed.
    pub fn start_voting(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if !data.state.accepts_registration()
                || !data.config.candidate_registration_deadline.has_passed(now)
            {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            data.transition(ElectionState::Active);
            Ok(())
        })
    }

    /// Register a candidate. Owner-only unless the election allows open
    /// candidate registration; closed once the deadline passes.
    pub fn register_candidate(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        identity: Identity,
        metadata: String,
        now: Timestamp,
    ) -> Result<CandidateId, ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if !data.state.accepts_registration() {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            if now > data.config.candidate_registration_deadline {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            if !data.config.open_candidate_registration && caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if data.state == ElectionState::Created {
                data.transition(ElectionState::RegistrationOpen);
            }
            let candidate = data.candidates.register(identity.clone(), metadata);
            tracing::debug!(election = %data.id, %candidate, %identity, "candidate registered");
            let event = Event::CandidateRegistered {
                election: data.id,
                candidate,
                identity,
            };
            data.push_event(event);
            Ok(candidate)
        })
    }

    /// Register to vote. The eligibility decision is delegated to the
    /// configured mode; the oracle call completes before any mutation.
    pub fn register_to_vote(
        &self,
        data: &mut ElectionData,
        identity: Identity,
        oracle: &dyn AssetOracle,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if !data.state.accepts_registration() {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            if data.voters.is_registered(&identity) {
                return Err(ElectionError::AlreadyRegistered(identity));
            }
            if !data.eligibility.is_eligible(&identity, oracle) {
                return Err(ElectionError::NotEligible(identity));
            }
            if data.state == ElectionState::Created {
                data.transition(ElectionState::RegistrationOpen);
            }
            data.voters.register(identity.clone(), now)?;
            tracing::debug!(election = %data.id, voter = %identity, "voter registered");
            let event = Event::VoterRegistered {
                election: data.id,
                voter: identity,
            };
            data.push_event(event);
            Ok(())
        })
    }

    /// Cast a direct vote. Tally increment and the voter's `has_voted` flag
    /// change together or not at all.
    pub fn vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        candidate: CandidateId,
        now: Timestamp,
    ) -> Result<u64, ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if data.state != ElectionState::Active || data.config.use_commit_reveal {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            data.voters.check_can_vote(voter)?;
            if !data.candidates.contains(candidate) {
                return Err(ElectionError::NotFound(candidate));
            }
            data.voters.mark_voted(voter)?;
            let new_tally = data.candidates.increment_tally(candidate)?;
            tracing::debug!(election = %data.id, %voter, %candidate, new_tally, "vote cast");
            let event = Event::VoteCast {
                election: data.id,
                voter: voter.clone(),
                candidate,
                new_tally,
            };
            data.push_event(event);
            Ok(new_tally)
        })
    }

    /// Store a vote commitment (commit-reveal elections only).
    pub fn commit_vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        hash: CommitmentHash,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if data.state != ElectionState::Active || !data.config.use_commit_reveal {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            if !data.voters.is_registered(voter) {
                return Err(ElectionError::NotRegistered(voter.clone()));
            }
            data.commitments.commit(voter.clone(), hash, now)?;
            data.voters.mark_committed(voter)?;
            tracing::debug!(election = %data.id, %voter, "vote committed");
            let event = Event::VoteCommitted {
                election: data.id,
                voter: voter.clone(),
                commitment: hash,
                committed_at: now,
            };
            data.push_event(event);
            Ok(())
        })
    }

    /// Disclose a committed vote. The disclosed `(candidate, salt)` must hash
    /// to the stored commitment; a mismatch mutates nothing.
    pub fn reveal_vote(
        &self,
        data: &mut ElectionData,
        voter: &Identity,
        candidate: CandidateId,
        salt: &Salt,
        now: Timestamp,
    ) -> Result<u64, ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if data.state != ElectionState::RevealPhase {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            data.commitments.check_reveal(voter, candidate, salt)?;
            if !data.candidates.contains(candidate) {
                return Err(ElectionError::NotFound(candidate));
            }
            data.commitments.mark_revealed(voter)?;
            let new_tally = data.candidates.increment_tally(candidate)?;
            tracing::debug!(election = %data.id, %voter, %candidate, new_tally, "vote revealed");
            let event = Event::VoteRevealed {
                election: data.id,
                voter: voter.clone(),
                candidate,
                new_tally,
            };
            data.push_event(event);
            Ok(new_tally)
        })
    }

    /// Close the reveal phase (owner) and finalize the election.
    pub fn close_reveal(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if data.state != ElectionState::RevealPhase {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            data.transition(ElectionState::Ended);
            Ok(())
        })
    }

    /// Replace the configuration. Owner-only, and only before voting starts.
    pub fn update_settings(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
        new_config: ElectionConfig,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            Self::advance_by_time(data, now);
            if caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if !data.state.accepts_registration() {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            new_config.validate()?;
            tracing::info!(election = %data.id, "election settings updated");
            data.config = new_config;
            Ok(())
        })
    }

    /// Force the election into `EmergencyStopped` (owner). Terminal: blocks
    /// all further registration, voting, committing, and revealing. Prior
    /// tallies are kept.
    pub fn emergency_stop(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            if caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if data.state.is_terminal() {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            let halted_in = data.state;
            data.state = ElectionState::EmergencyStopped;
            tracing::warn!(election = %data.id, ?halted_in, "emergency stop");
            let event = Event::EmergencyStop {
                election: data.id,
                by: caller.clone(),
                halted_in,
            };
            data.push_event(event);
            Ok(())
        })
    }

    /// Re-enable result visibility after an emergency stop (owner).
    /// Emergency defaults to hidden regardless of the normal policy.
    pub fn enable_results_after_emergency(
        &self,
        data: &mut ElectionData,
        caller: &Identity,
    ) -> Result<(), ElectionError> {
        Self::guarded(data, |data| {
            if caller != &data.owner {
                return Err(ElectionError::NotAuthorized(caller.clone()));
            }
            if data.state != ElectionState::EmergencyStopped {
                return Err(ElectionError::PhaseViolation { state: data.state });
            }
            if data.results_enabled_after_emergency {
                return Ok(());
            }
            data.results_enabled_after_emergency = true;
            tracing::info!(election = %data.id, "results re-enabled after emergency");
            let event = Event::ResultsEnabledAfterEmergency {
                election: data.id,
                by: caller.clone(),
            };
            data.push_event(event);
            Ok(())
        })
    }
}
