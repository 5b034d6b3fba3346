//! Per-election configuration.

use crate::error::ConfigError;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// How results are exposed once counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingType {
    /// Only the single top candidate matters; ties are surfaced as errors.
    WinnerTakesAll,
    /// Full ranking of all candidates by tally.
    Leaderboard,
}

/// Configuration of one election.
///
/// Immutable once the election goes `Active`; before that, only the owning
/// identity may change it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// Opaque display title.
    pub title: String,
    /// Opaque display description.
    pub description: String,
    /// When voting opens.
    pub start_time: Timestamp,
    /// When voting closes.
    pub end_time: Timestamp,
    /// Last moment a candidate may register. Must not be after `start_time`.
    pub candidate_registration_deadline: Timestamp,
    pub voting_type: VotingType,
    /// If false, only the owner may register candidates.
    pub open_candidate_registration: bool,
    /// Expose tallies while voting is still in progress.
    pub live_results_enabled: bool,
    /// Expose tallies regardless of phase (emergency stop still overrides).
    pub results_public: bool,
    /// Two-phase commit-reveal voting instead of direct votes.
    pub use_commit_reveal: bool,
}

impl ElectionConfig {
    /// Check the timestamp ordering invariants and basic well-formedness.
    ///
    /// Required: `candidate_registration_deadline <= start_time < end_time`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if self.start_time >= self.end_time {
            return Err(ConfigError::StartNotBeforeEnd {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if self.candidate_registration_deadline > self.start_time {
            return Err(ConfigError::DeadlineAfterStart {
                deadline: self.candidate_registration_deadline,
                start: self.start_time,
            });
        }
        Ok(())
    }
}
