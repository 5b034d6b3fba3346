//! Fundamental types for the Agora election engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: identities, timestamps, ids, commitment hashes, election
//! configuration, the election state enum, and audit events.

pub mod config;
pub mod error;
pub mod event;
pub mod hash;
pub mod id;
pub mod identity;
pub mod state;
pub mod time;

pub use config::{ElectionConfig, VotingType};
pub use error::ConfigError;
pub use event::Event;
pub use hash::CommitmentHash;
pub use id::{CandidateId, ElectionId, LogicVersion};
pub use identity::Identity;
pub use state::ElectionState;
pub use time::Timestamp;
