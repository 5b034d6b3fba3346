use agora_types::{CandidateId, ConfigError, ElectionState, Identity};
use thiserror::Error;

/// Errors surfaced by election operations.
///
/// All of these are local, synchronous failures: the failing operation leaves
/// election state untouched, and a failure on one election never affects
/// another.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ElectionError {
    #[error("operation is not legal in state {state:?}")]
    PhaseViolation { state: ElectionState },

    #[error("caller {0} is not authorized for this operation")]
    NotAuthorized(Identity),

    #[error("identity {0} is not eligible under the configured mode")]
    NotEligible(Identity),

    #[error("voter {0} is already registered")]
    AlreadyRegistered(Identity),

    #[error("voter {0} has already voted")]
    AlreadyVoted(Identity),

    #[error("voter {0} has already committed")]
    AlreadyCommitted(Identity),

    #[error("voter {0} has already revealed their commitment")]
    AlreadyRevealed(Identity),

    #[error("identity {0} is not a registered voter")]
    NotRegistered(Identity),

    #[error("voter {0} has no commitment to reveal")]
    NotCommitted(Identity),

    #[error("disclosed vote does not hash to the stored commitment")]
    RevealMismatch,

    #[error("winner is tied at {votes} votes")]
    TieUnresolved { votes: u64 },

    #[error("results are hidden by the election's visibility policy")]
    ResultsHidden,

    #[error("candidate {0} not found")]
    NotFound(CandidateId),

    #[error("election has no candidates")]
    NoCandidates,

    #[error("re-entrant call detected during an in-progress mutation")]
    ReentrancyViolation,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot serialization error: {0}")]
    Snapshot(String),
}
