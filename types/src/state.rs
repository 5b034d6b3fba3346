//! Election lifecycle state enum.

use serde::{Deserialize, Serialize};

/// The lifecycle state of one election: the single source of truth for
/// which operations are legal.
///
/// Transitions are monotonic along
/// `Created → RegistrationOpen → Active → RevealPhase → Ended`
/// (`RevealPhase` only for commit-reveal elections). Any non-terminal state
/// may additionally transition to `EmergencyStopped`, which is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectionState {
    /// Election exists; no registrations yet.
    Created,
    /// Candidates and voters may register.
    RegistrationOpen,
    /// Voting window is open (direct votes or commitments).
    Active,
    /// Commit-reveal only: commitments are disclosed and verified.
    RevealPhase,
    /// Voting complete; results final.
    Ended,
    /// Administratively halted; no further mutation.
    EmergencyStopped,
}

impl ElectionState {
    /// Whether no further state transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::EmergencyStopped)
    }

    /// Whether `next` is a legal direct successor of this state.
    pub fn can_transition_to(&self, next: ElectionState) -> bool {
        if next == Self::EmergencyStopped {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Self::Created, Self::RegistrationOpen)
                | (Self::Created, Self::Active)
                | (Self::RegistrationOpen, Self::Active)
                | (Self::Active, Self::RevealPhase)
                | (Self::Active, Self::Ended)
                | (Self::RevealPhase, Self::Ended)
        )
    }

    /// Whether registrations (candidate or voter) are still accepted.
    pub fn accepts_registration(&self) -> bool {
        matches!(self, Self::Created | Self::RegistrationOpen)
    }
}
