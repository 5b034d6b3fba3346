//! Voter eligibility verification.
//!
//! Eligibility logic varies per election but the check signature is uniform,
//! so the voting engine dispatches through one point without knowing the
//! details of any mode. Asset-gated modes consult an external [`AssetOracle`];
//! the engine only compares the returned balance or owner against the
//! configured parameters, it does not implement the asset ledger.

use agora_types::Identity;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Reference to an asset ledger known to the external oracle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External asset ownership oracle.
///
/// The oracle call completes before any local state mutation; the engine
/// never interleaves a call-out with a mutation in progress.
pub trait AssetOracle: Send + Sync {
    /// Fungible balance of `identity` on the referenced asset ledger.
    fn balance_of(&self, asset: &AssetId, identity: &Identity) -> u128;

    /// Current owner of a specific non-fungible token, if any.
    fn owner_of(&self, asset: &AssetId, token_id: u64) -> Option<Identity>;
}

/// Who may register to vote, selected once at election creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityMode {
    /// Membership in a pre-seeded set.
    Whitelist { members: HashSet<Identity> },
    /// Anyone may register (the voter roll still enforces one registration
    /// per identity).
    Open,
    /// Holding at least `threshold` units of a fungible asset. Exactly at
    /// the threshold is eligible.
    TokenBased { asset: AssetId, threshold: u128 },
    /// Owning a specific non-fungible token.
    NftBased { asset: AssetId, token_id: u64 },
}

impl EligibilityMode {
    /// Decide whether `identity` may register under this mode.
    pub fn is_eligible(&self, identity: &Identity, oracle: &dyn AssetOracle) -> bool {
        match self {
            Self::Whitelist { members } => members.contains(identity),
            Self::Open => true,
            Self::TokenBased { asset, threshold } => {
                oracle.balance_of(asset, identity) >= *threshold
            }
            Self::NftBased { asset, token_id } => {
                oracle.owner_of(asset, *token_id).as_ref() == Some(identity)
            }
        }
    }
}

/// In-memory asset oracle.
///
/// Serves as the oracle for deployments without asset-gated elections (all
/// balances zero, no owners) and as a controllable double in tests.
#[derive(Default)]
pub struct MemoryAssets {
    balances: HashMap<(AssetId, Identity), u128>,
    owners: HashMap<(AssetId, u64), Identity>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&mut self, asset: AssetId, identity: Identity, balance: u128) {
        self.balances.insert((asset, identity), balance);
    }

    pub fn set_owner(&mut self, asset: AssetId, token_id: u64, owner: Identity) {
        self.owners.insert((asset, token_id), owner);
    }
}

impl AssetOracle for MemoryAssets {
    fn balance_of(&self, asset: &AssetId, identity: &Identity) -> u128 {
        self.balances
            .get(&(asset.clone(), identity.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn owner_of(&self, asset: &AssetId, token_id: u64) -> Option<Identity> {
        self.owners.get(&(asset.clone(), token_id)).cloned()
    }
}
