//! Election lifecycle engine for the Agora protocol.
//!
//! Phase flow: `Created → RegistrationOpen → Active → [RevealPhase] → Ended`,
//! with `EmergencyStopped` as an absorbing override reachable from every
//! non-terminal state.
//!
//! The engine is split into a persistent state layer ([`ElectionData`]) and a
//! behavior layer ([`VotingEngine`]) so that the registry can swap behavior
//! (logic upgrades) without touching stored data.

pub mod candidates;
pub mod commit_reveal;
pub mod data;
pub mod eligibility;
pub mod error;
pub mod machine;
pub mod results;
pub mod roll;
pub mod snapshot;

pub use candidates::{Candidate, CandidateRegistry};
pub use commit_reveal::{CommitRevealLedger, Commitment};
pub use data::ElectionData;
pub use eligibility::{AssetId, AssetOracle, EligibilityMode, MemoryAssets};
pub use error::ElectionError;
pub use machine::VotingEngine;
pub use results::{leaderboard, results, winner, CandidateTally};
pub use roll::{Voter, VoterRoll};
pub use snapshot::{restore, snapshot};
