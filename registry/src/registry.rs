//! The election registry: factory, index, and upgrade manager.

use crate::error::RegistryError;
use crate::logic::{ElectionLogic, StandardLogic};
use agora_crypto::Salt;
use agora_engine::results::CandidateTally;
use agora_engine::{snapshot, AssetOracle, ElectionData, ElectionError, EligibilityMode};
use agora_types::{
    CandidateId, CommitmentHash, ElectionConfig, ElectionId, ElectionState, Event, Identity,
    LogicVersion, Timestamp,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Registry-side record of one election. Created on `create_election`, never
/// removed. Only the logic version pointer changes after creation (via
/// upgrade); the data behind the lock belongs to the election itself.
pub struct ElectionRecord {
    id: ElectionId,
    creator: Identity,
    logic_version: LogicVersion,
    data: Mutex<ElectionData>,
}

impl ElectionRecord {
    pub fn id(&self) -> ElectionId {
        self.id
    }

    pub fn creator(&self) -> &Identity {
        &self.creator
    }

    /// The logic version currently interpreting this election's state.
    pub fn logic_version(&self) -> LogicVersion {
        self.logic_version
    }

    /// Read the election's state under its lock.
    pub fn read<T>(&self, f: impl FnOnce(&ElectionData) -> T) -> T {
        let data = self.data.lock().expect("election state lock poisoned");
        f(&data)
    }
}

/// Creates elections, indexes them, routes operations to the logic version
/// each one is bound to, and performs in-place logic upgrades.
///
/// Creation and upgrade take `&mut self` and are therefore serialized against
/// each other: no election can be created mid-upgrade with an inconsistent
/// version pointer. Per-election operations take `&self` and lock only the
/// targeted election, so distinct elections mutate concurrently; a failure on
/// one election never corrupts or blocks another.
pub struct ElectionRegistry {
    owner: Identity,
    oracle: Arc<dyn AssetOracle>,
    next_id: ElectionId,
    current_version: LogicVersion,
    logic_table: HashMap<LogicVersion, Arc<dyn ElectionLogic>>,
    elections: BTreeMap<ElectionId, ElectionRecord>,
    by_creator: HashMap<Identity, Vec<ElectionId>>,
}

impl ElectionRegistry {
    /// Create a registry with [`StandardLogic`] installed as the initial
    /// version.
    pub fn new(owner: Identity, oracle: Arc<dyn AssetOracle>) -> Self {
        let mut logic_table: HashMap<LogicVersion, Arc<dyn ElectionLogic>> = HashMap::new();
        logic_table.insert(LogicVersion::INITIAL, Arc::new(StandardLogic::new()));
        Self {
            owner,
            oracle,
            next_id: ElectionId::new(0),
            current_version: LogicVersion::INITIAL,
            logic_table,
            elections: BTreeMap::new(),
            by_creator: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    /// The logic version newly created elections are bound to.
    pub fn current_version(&self) -> LogicVersion {
        self.current_version
    }

    /// Create a new election bound to the current logic version.
    pub fn create_election(
        &mut self,
        creator: Identity,
        config: ElectionConfig,
        eligibility: EligibilityMode,
    ) -> Result<ElectionId, RegistryError> {
        config.validate()?;
        let id = self.next_id;
        self.next_id = id.next();

        let mut data = ElectionData::new(id, creator.clone(), config, eligibility);
        data.push_event(Event::ElectionCreated {
            election: id,
            creator: creator.clone(),
            logic_version: self.current_version,
        });
        tracing::info!(election = %id, %creator, version = %self.current_version, "election created");

        self.elections.insert(
            id,
            ElectionRecord {
                id,
                creator: creator.clone(),
                logic_version: self.current_version,
                data: Mutex::new(data),
            },
        );
        self.by_creator.entry(creator).or_default().push(id);
        Ok(id)
    }

    /// Install a new logic version and repoint every existing election at it.
    ///
    /// Registry-owner only. Election state is untouched: the same snapshot
    /// bytes are interpreted by the new code. A version that required a
    /// different state shape would need its own explicit migration step
    /// before installation; this method never reinterprets storage silently.
    pub fn update_election_implementation(
        &mut self,
        caller: &Identity,
        version: LogicVersion,
        logic: Arc<dyn ElectionLogic>,
    ) -> Result<(), RegistryError> {
        if caller != &self.owner {
            return Err(RegistryError::NotAuthorized(caller.clone()));
        }
        if version <= self.current_version {
            return Err(RegistryError::StaleLogicVersion {
                current: self.current_version,
                proposed: version,
            });
        }
        self.logic_table.insert(version, logic);
        let previous = self.current_version;
        self.current_version = version;
        for record in self.elections.values_mut() {
            record.logic_version = version;
        }
        tracing::info!(
            from = %previous,
            to = %version,
            elections = self.elections.len(),
            "election implementation upgraded"
        );
        Ok(())
    }

    /// Ids of all elections, in creation order.
    pub fn get_all_elections(&self) -> Vec<ElectionId> {
        self.elections.keys().copied().collect()
    }

    /// Ids of the elections created by `creator`, in creation order.
    pub fn get_creator_elections(&self, creator: &Identity) -> Vec<ElectionId> {
        self.by_creator.get(creator).cloned().unwrap_or_default()
    }

    /// Look up one election's record.
    pub fn get_election(&self, id: ElectionId) -> Result<&ElectionRecord, RegistryError> {
        self.elections.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Snapshot an election's persistent state bytes.
    pub fn snapshot_of(&self, id: ElectionId) -> Result<Vec<u8>, RegistryError> {
        let record = self.get_election(id)?;
        record.read(|data| snapshot(data)).map_err(RegistryError::from)
    }

    /// Copy of an election's audit log.
    pub fn events_of(&self, id: ElectionId) -> Result<Vec<Event>, RegistryError> {
        let record = self.get_election(id)?;
        Ok(record.read(|data| data.events.clone()))
    }

    fn with_election<T>(
        &self,
        id: ElectionId,
        f: impl FnOnce(&dyn ElectionLogic, &mut ElectionData) -> Result<T, ElectionError>,
    ) -> Result<T, RegistryError> {
        let record = self.elections.get(&id).ok_or(RegistryError::NotFound(id))?;
        let logic = self
            .logic_table
            .get(&record.logic_version)
            .ok_or(RegistryError::UnknownLogicVersion(record.logic_version))?;
        let mut data = record.data.lock().expect("election state lock poisoned");
        f(logic.as_ref(), &mut data).map_err(RegistryError::from)
    }

    fn with_election_read<T>(
        &self,
        id: ElectionId,
        f: impl FnOnce(&dyn ElectionLogic, &ElectionData) -> Result<T, ElectionError>,
    ) -> Result<T, RegistryError> {
        let record = self.elections.get(&id).ok_or(RegistryError::NotFound(id))?;
        let logic = self
            .logic_table
            .get(&record.logic_version)
            .ok_or(RegistryError::UnknownLogicVersion(record.logic_version))?;
        let data = record.data.lock().expect("election state lock poisoned");
        f(logic.as_ref(), &data).map_err(RegistryError::from)
    }

    // Per-election operations, routed through the bound logic version.

    pub fn register_candidate(
        &self,
        election: ElectionId,
        caller: &Identity,
        identity: Identity,
        metadata: String,
        now: Timestamp,
    ) -> Result<CandidateId, RegistryError> {
        self.with_election(election, |logic, data| {
            logic.register_candidate(data, caller, identity, metadata, now)
        })
    }

    pub fn register_to_vote(
        &self,
        election: ElectionId,
        identity: Identity,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| {
            logic.register_to_vote(data, identity, self.oracle.as_ref(), now)
        })
    }

    pub fn vote(
        &self,
        election: ElectionId,
        voter: &Identity,
        candidate: CandidateId,
        now: Timestamp,
    ) -> Result<u64, RegistryError> {
        self.with_election(election, |logic, data| logic.vote(data, voter, candidate, now))
    }

    pub fn commit_vote(
        &self,
        election: ElectionId,
        voter: &Identity,
        hash: CommitmentHash,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| {
            logic.commit_vote(data, voter, hash, now)
        })
    }

    pub fn reveal_vote(
        &self,
        election: ElectionId,
        voter: &Identity,
        candidate: CandidateId,
        salt: &Salt,
        now: Timestamp,
    ) -> Result<u64, RegistryError> {
        self.with_election(election, |logic, data| {
            logic.reveal_vote(data, voter, candidate, salt, now)
        })
    }

    pub fn advance_phase(
        &self,
        election: ElectionId,
        now: Timestamp,
    ) -> Result<ElectionState, RegistryError> {
        self.with_election(election, |logic, data| logic.advance_phase(data, now))
    }

    pub fn open_registration(
        &self,
        election: ElectionId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| {
            logic.open_registration(data, caller, now)
        })
    }

    pub fn start_voting(
        &self,
        election: ElectionId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| logic.start_voting(data, caller, now))
    }

    pub fn close_reveal(
        &self,
        election: ElectionId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| logic.close_reveal(data, caller, now))
    }

    pub fn update_settings(
        &self,
        election: ElectionId,
        caller: &Identity,
        new_config: ElectionConfig,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| {
            logic.update_settings(data, caller, new_config, now)
        })
    }

    pub fn emergency_stop(
        &self,
        election: ElectionId,
        caller: &Identity,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| logic.emergency_stop(data, caller))
    }

    pub fn enable_results_after_emergency(
        &self,
        election: ElectionId,
        caller: &Identity,
    ) -> Result<(), RegistryError> {
        self.with_election(election, |logic, data| {
            logic.enable_results_after_emergency(data, caller)
        })
    }

    pub fn results(&self, election: ElectionId) -> Result<Vec<CandidateTally>, RegistryError> {
        self.with_election_read(election, |logic, data| logic.results(data))
    }

    pub fn winner(&self, election: ElectionId) -> Result<CandidateTally, RegistryError> {
        self.with_election_read(election, |logic, data| logic.winner(data))
    }

    pub fn leaderboard(&self, election: ElectionId) -> Result<Vec<CandidateTally>, RegistryError> {
        self.with_election_read(election, |logic, data| logic.leaderboard(data))
    }
}
