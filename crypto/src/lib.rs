//! Cryptographic primitives for the Agora election engine.
//!
//! - **Blake2b-256** for vote commitment hashing
//! - Fixed commitment input ordering `(candidate_id, salt, identity)` shared
//!   by commit-time computation and reveal-time verification

pub mod commitment;
pub mod hash;
pub mod salt;

pub use commitment::commitment_hash;
pub use hash::{blake2b_256, blake2b_256_multi};
pub use salt::Salt;
