//! End-to-end registry scenarios: full election lifecycles, upgrades, and
//! cross-election isolation.

use std::sync::Arc;

use agora_crypto::{commitment_hash, Salt};
use agora_engine::{AssetId, ElectionError, EligibilityMode, MemoryAssets};
use agora_registry::{ElectionRegistry, RegistryError, StandardLogic};
use agora_types::{
    CandidateId, ElectionConfig, ElectionState, Event, Identity, LogicVersion, Timestamp,
    VotingType,
};

fn config(commit_reveal: bool) -> ElectionConfig {
    ElectionConfig {
        title: "Integration".into(),
        description: "integration scenario".into(),
        start_time: Timestamp::new(1_000),
        end_time: Timestamp::new(2_000),
        candidate_registration_deadline: Timestamp::new(1_000),
        voting_type: VotingType::WinnerTakesAll,
        open_candidate_registration: true,
        live_results_enabled: false,
        results_public: false,
        use_commit_reveal: commit_reveal,
    }
}

fn owner() -> Identity {
    Identity::new("registry-owner")
}

fn registry() -> ElectionRegistry {
    ElectionRegistry::new(owner(), Arc::new(MemoryAssets::new()))
}

#[test]
fn direct_vote_lifecycle() {
    let mut registry = registry();
    let creator = Identity::new("creator");
    let election = registry
        .create_election(creator.clone(), config(false), EligibilityMode::Open)
        .unwrap();

    let alice = registry
        .register_candidate(
            election,
            &creator,
            Identity::new("alice"),
            "Alice".into(),
            Timestamp::new(100),
        )
        .unwrap();
    let bob = registry
        .register_candidate(
            election,
            &creator,
            Identity::new("bob"),
            "Bob".into(),
            Timestamp::new(100),
        )
        .unwrap();

    for v in 0..3 {
        registry
            .register_to_vote(election, Identity::new(format!("v{v}")), Timestamp::new(200))
            .unwrap();
    }

    registry.vote(election, &Identity::new("v0"), alice, Timestamp::new(1_100)).unwrap();
    registry.vote(election, &Identity::new("v1"), alice, Timestamp::new(1_200)).unwrap();
    registry.vote(election, &Identity::new("v2"), bob, Timestamp::new(1_300)).unwrap();

    // Hidden while active (no live results), final after the end.
    assert!(matches!(
        registry.results(election),
        Err(RegistryError::Election(ElectionError::ResultsHidden))
    ));
    registry.advance_phase(election, Timestamp::new(2_000)).unwrap();

    let top = registry.winner(election).unwrap();
    assert_eq!(top.candidate, alice);
    assert_eq!(top.votes, 2);

    let board = registry.leaderboard(election).unwrap();
    assert_eq!(board[0].candidate, alice);
    assert_eq!(board[1].candidate, bob);

    // The audit log reconstructs the whole history.
    let events = registry.events_of(election).unwrap();
    assert!(matches!(events[0], Event::ElectionCreated { .. }));
    let votes = events
        .iter()
        .filter(|e| matches!(e, Event::VoteCast { .. }))
        .count();
    assert_eq!(votes, 3);
}

#[test]
fn commit_reveal_lifecycle() {
    let mut registry = registry();
    let creator = Identity::new("creator");
    let election = registry
        .create_election(creator.clone(), config(true), EligibilityMode::Open)
        .unwrap();

    let alice = registry
        .register_candidate(
            election,
            &creator,
            Identity::new("alice"),
            "Alice".into(),
            Timestamp::new(100),
        )
        .unwrap();
    let bob = registry
        .register_candidate(
            election,
            &creator,
            Identity::new("bob"),
            "Bob".into(),
            Timestamp::new(100),
        )
        .unwrap();

    let voters: Vec<Identity> = (0..4).map(|v| Identity::new(format!("v{v}"))).collect();
    for voter in &voters {
        registry
            .register_to_vote(election, voter.clone(), Timestamp::new(200))
            .unwrap();
    }

    // Three for alice, one for bob, each with a private salt.
    let choices = [alice, alice, alice, bob];
    let salts: Vec<Salt> = (0..4u8).map(|i| Salt::new([i; 32])).collect();
    for ((voter, &choice), salt) in voters.iter().zip(&choices).zip(&salts) {
        let hash = commitment_hash(choice, salt, voter);
        registry
            .commit_vote(election, voter, hash, Timestamp::new(1_500))
            .unwrap();
    }

    // Nothing tallied during the voting window.
    registry.advance_phase(election, Timestamp::new(2_000)).unwrap();
    for ((voter, &choice), salt) in voters.iter().zip(&choices).zip(&salts) {
        registry
            .reveal_vote(election, voter, choice, salt, Timestamp::new(2_100))
            .unwrap();
    }

    registry.close_reveal(election, &creator, Timestamp::new(2_200)).unwrap();
    let top = registry.winner(election).unwrap();
    assert_eq!(top.candidate, alice);
    assert_eq!(top.votes, 3);
}

#[test]
fn token_gated_registration() {
    let asset = AssetId::new("gov-token");
    let mut oracle = MemoryAssets::new();
    oracle.set_balance(asset.clone(), Identity::new("rich"), 100);
    oracle.set_balance(asset.clone(), Identity::new("exact"), 50);
    oracle.set_balance(asset.clone(), Identity::new("poor"), 49);

    let mut registry = ElectionRegistry::new(owner(), Arc::new(oracle));
    let election = registry
        .create_election(
            Identity::new("creator"),
            config(false),
            EligibilityMode::TokenBased { asset, threshold: 50 },
        )
        .unwrap();

    registry
        .register_to_vote(election, Identity::new("rich"), Timestamp::new(100))
        .unwrap();
    registry
        .register_to_vote(election, Identity::new("exact"), Timestamp::new(100))
        .unwrap();
    let poor = Identity::new("poor");
    assert_eq!(
        registry.register_to_vote(election, poor.clone(), Timestamp::new(100)),
        Err(RegistryError::Election(ElectionError::NotEligible(poor)))
    );
}

#[test]
fn upgrade_preserves_state_and_binds_new_elections() {
    let mut registry = registry();
    let creator = Identity::new("creator");
    let before = registry
        .create_election(creator.clone(), config(false), EligibilityMode::Open)
        .unwrap();

    let candidate = registry
        .register_candidate(
            before,
            &creator,
            Identity::new("alice"),
            "Alice".into(),
            Timestamp::new(100),
        )
        .unwrap();
    registry
        .register_to_vote(before, Identity::new("v0"), Timestamp::new(200))
        .unwrap();
    registry.vote(before, &Identity::new("v0"), candidate, Timestamp::new(1_100)).unwrap();

    let snapshot_before = registry.snapshot_of(before).unwrap();

    let v2 = LogicVersion::new(2);
    registry
        .update_election_implementation(&owner(), v2, Arc::new(StandardLogic::new()))
        .unwrap();

    // Stored bytes are bit-for-bit identical; only the version pointer moved.
    assert_eq!(registry.snapshot_of(before).unwrap(), snapshot_before);
    assert_eq!(registry.get_election(before).unwrap().logic_version(), v2);

    // The upgraded election keeps working on its old data.
    registry.advance_phase(before, Timestamp::new(2_000)).unwrap();
    assert_eq!(registry.winner(before).unwrap().votes, 1);

    // New elections bind the new version.
    let after = registry
        .create_election(creator, config(false), EligibilityMode::Open)
        .unwrap();
    assert_eq!(registry.get_election(after).unwrap().logic_version(), v2);
    assert_eq!(registry.current_version(), v2);
}

#[test]
fn emergency_stop_gates_results_until_reenabled() {
    let mut registry = registry();
    let creator = Identity::new("creator");
    let mut cfg = config(false);
    cfg.results_public = true;
    let election = registry
        .create_election(creator.clone(), cfg, EligibilityMode::Open)
        .unwrap();

    let candidate = registry
        .register_candidate(
            election,
            &creator,
            Identity::new("alice"),
            "Alice".into(),
            Timestamp::new(100),
        )
        .unwrap();
    registry
        .register_to_vote(election, Identity::new("v0"), Timestamp::new(200))
        .unwrap();
    registry.vote(election, &Identity::new("v0"), candidate, Timestamp::new(1_100)).unwrap();

    registry.emergency_stop(election, &creator).unwrap();

    // Mid-window, but the stop blocks voting immediately.
    assert!(matches!(
        registry.vote(election, &Identity::new("v0"), candidate, Timestamp::new(1_200)),
        Err(RegistryError::Election(ElectionError::PhaseViolation { .. }))
    ));
    // Even public results go dark until explicitly re-enabled.
    assert!(matches!(
        registry.results(election),
        Err(RegistryError::Election(ElectionError::ResultsHidden))
    ));

    // Only the election owner may re-enable.
    assert!(matches!(
        registry.enable_results_after_emergency(election, &Identity::new("mallory")),
        Err(RegistryError::Election(ElectionError::NotAuthorized(_)))
    ));
    registry.enable_results_after_emergency(election, &creator).unwrap();
    assert_eq!(registry.results(election).unwrap()[0].votes, 1);

    // Prior tallies were never reset.
    let state = registry.get_election(election).unwrap().read(|d| d.state);
    assert_eq!(state, ElectionState::EmergencyStopped);
}

#[test]
fn tie_fails_winner_but_ranks_leaderboard() {
    let mut registry = registry();
    let creator = Identity::new("creator");
    let election = registry
        .create_election(creator.clone(), config(false), EligibilityMode::Open)
        .unwrap();

    let mut candidates = Vec::new();
    for name in ["alice", "bob", "carol"] {
        candidates.push(
            registry
                .register_candidate(
                    election,
                    &creator,
                    Identity::new(name),
                    name.into(),
                    Timestamp::new(100),
                )
                .unwrap(),
        );
    }
    // 2 votes each for alice and bob, 1 for carol.
    let ballots = [0usize, 0, 1, 1, 2];
    for (v, &c) in ballots.iter().enumerate() {
        let voter = Identity::new(format!("v{v}"));
        registry.register_to_vote(election, voter.clone(), Timestamp::new(200)).unwrap();
        registry.vote(election, &voter, candidates[c], Timestamp::new(1_100)).unwrap();
    }
    registry.advance_phase(election, Timestamp::new(2_000)).unwrap();

    assert_eq!(
        registry.winner(election),
        Err(RegistryError::Election(ElectionError::TieUnresolved { votes: 2 }))
    );
    let board = registry.leaderboard(election).unwrap();
    let order: Vec<CandidateId> = board.iter().map(|t| t.candidate).collect();
    assert_eq!(order, vec![candidates[0], candidates[1], candidates[2]]);
}

#[test]
fn failure_on_one_election_does_not_touch_another() {
    let mut registry = registry();
    let creator = Identity::new("creator");
    let healthy = registry
        .create_election(creator.clone(), config(false), EligibilityMode::Open)
        .unwrap();
    let whitelist_only = registry
        .create_election(
            creator.clone(),
            config(false),
            EligibilityMode::Whitelist {
                members: std::collections::HashSet::new(),
            },
        )
        .unwrap();

    // Everyone is rejected by the empty whitelist.
    assert!(matches!(
        registry.register_to_vote(whitelist_only, Identity::new("v0"), Timestamp::new(100)),
        Err(RegistryError::Election(ElectionError::NotEligible(_)))
    ));

    // The other election is unaffected.
    registry
        .register_to_vote(healthy, Identity::new("v0"), Timestamp::new(100))
        .unwrap();
    assert_eq!(
        registry.get_election(healthy).unwrap().read(|d| d.voters.len()),
        1
    );
}

#[test]
fn voter_registration_closes_at_start_time() {
    let mut registry = registry();
    let election = registry
        .create_election(Identity::new("creator"), config(false), EligibilityMode::Open)
        .unwrap();
    assert!(matches!(
        registry.register_to_vote(election, Identity::new("late"), Timestamp::new(1_000)),
        Err(RegistryError::Election(ElectionError::PhaseViolation { .. }))
    ));
}
