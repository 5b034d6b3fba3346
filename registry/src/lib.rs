//! Election registry for the Agora protocol.
//!
//! The registry creates elections from a configuration, indexes them by id
//! and creator, and upgrades the logic governing already-deployed elections
//! in place. Persistent state and behavior are two separately replaceable
//! layers: an upgrade swaps an entry in the versioned logic table and
//! repoints instances at it, never their stored data.

pub mod error;
pub mod logic;
pub mod registry;

pub use error::RegistryError;
pub use logic::{ElectionLogic, StandardLogic};
pub use registry::{ElectionRecord, ElectionRegistry};
