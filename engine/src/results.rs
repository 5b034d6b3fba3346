//! Result aggregation and visibility policy.

use crate::data::ElectionData;
use crate::error::ElectionError;
use agora_types::{CandidateId, ElectionState, Identity};
use serde::{Deserialize, Serialize};

/// One row of a results query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    pub candidate: CandidateId,
    pub identity: Identity,
    pub votes: u64,
}

/// Whether tallies may be read right now.
///
/// Normal policy: public results, live results while voting, or after the
/// end. An emergency stop overrides everything to hidden until the owner
/// explicitly re-enables visibility.
fn visible(data: &ElectionData) -> bool {
    match data.state {
        ElectionState::EmergencyStopped => data.results_enabled_after_emergency,
        ElectionState::Ended => true,
        ElectionState::Active => data.config.results_public || data.config.live_results_enabled,
        _ => data.config.results_public,
    }
}

fn tallies(data: &ElectionData) -> Vec<CandidateTally> {
    data.candidates
        .all()
        .iter()
        .map(|c| CandidateTally {
            candidate: c.id,
            identity: c.identity.clone(),
            votes: c.vote_count,
        })
        .collect()
}

/// Per-candidate tallies in registration order, subject to the visibility
/// policy.
pub fn results(data: &ElectionData) -> Result<Vec<CandidateTally>, ElectionError> {
    if !visible(data) {
        return Err(ElectionError::ResultsHidden);
    }
    Ok(tallies(data))
}

/// The candidate with the maximum tally.
///
/// A shared maximum is an explicit failure (`TieUnresolved`), never an
/// arbitrary pick.
pub fn winner(data: &ElectionData) -> Result<CandidateTally, ElectionError> {
    if !visible(data) {
        return Err(ElectionError::ResultsHidden);
    }
    let all = data.candidates.all();
    let top = all
        .iter()
        .max_by_key(|c| c.vote_count)
        .ok_or(ElectionError::NoCandidates)?;
    let tied = all.iter().filter(|c| c.vote_count == top.vote_count).count();
    if tied > 1 {
        return Err(ElectionError::TieUnresolved {
            votes: top.vote_count,
        });
    }
    Ok(CandidateTally {
        candidate: top.id,
        identity: top.identity.clone(),
        votes: top.vote_count,
    })
}

/// Full ranking by tally descending; ties rank by ascending candidate id.
/// The display tie-break does not affect [`winner`]'s tie failure.
pub fn leaderboard(data: &ElectionData) -> Result<Vec<CandidateTally>, ElectionError> {
    let mut board = results(data)?;
    board.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.candidate.cmp(&b.candidate)));
    Ok(board)
}
