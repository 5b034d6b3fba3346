use proptest::prelude::*;

use agora_types::{CandidateId, CommitmentHash, ElectionId, ElectionState, Timestamp};

proptest! {
    /// CommitmentHash roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn commitment_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = CommitmentHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// CommitmentHash::is_zero is true only for all-zero bytes.
    #[test]
    fn commitment_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = CommitmentHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// CommitmentHash bincode serialization roundtrip.
    #[test]
    fn commitment_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = CommitmentHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: CommitmentHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), hash.as_bytes());
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// has_passed is consistent with ordering.
    #[test]
    fn timestamp_has_passed(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let deadline = Timestamp::new(a);
        let now = Timestamp::new(b);
        prop_assert_eq!(deadline.has_passed(now), b >= a);
    }

    /// Election ids are dense: next() increments by exactly one.
    #[test]
    fn election_id_next_dense(id in 0u64..u64::MAX - 1) {
        prop_assert_eq!(ElectionId::new(id).next(), ElectionId::new(id + 1));
    }

    /// Candidate ids are dense: next() increments by exactly one.
    #[test]
    fn candidate_id_next_dense(id in 0u32..u32::MAX - 1) {
        prop_assert_eq!(CandidateId::new(id).next(), CandidateId::new(id + 1));
    }
}

/// Audit events survive a JSON roundtrip (the format external auditors
/// consume them in).
#[test]
fn event_json_roundtrip() {
    use agora_types::{Event, Identity, LogicVersion};
    let event = Event::VoteCast {
        election: ElectionId::new(4),
        voter: Identity::new("alice"),
        candidate: CandidateId::new(1),
        new_tally: 3,
    };
    let json = serde_json::to_string(&event).unwrap();
    let decoded: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, event);

    let created = Event::ElectionCreated {
        election: ElectionId::new(0),
        creator: Identity::new("creator"),
        logic_version: LogicVersion::INITIAL,
    };
    let json = serde_json::to_string(&created).unwrap();
    assert_eq!(serde_json::from_str::<Event>(&json).unwrap(), created);
}

/// Every state except Ended may transition to EmergencyStopped, which is
/// itself terminal.
#[test]
fn emergency_stop_reachable_from_non_terminal() {
    use ElectionState::*;
    for state in [Created, RegistrationOpen, Active, RevealPhase] {
        assert!(state.can_transition_to(EmergencyStopped), "{state:?}");
    }
    assert!(!Ended.can_transition_to(EmergencyStopped));
    assert!(!EmergencyStopped.can_transition_to(EmergencyStopped));
    assert!(EmergencyStopped.is_terminal());
}

/// No backward transitions along the lifecycle graph.
#[test]
fn transitions_are_monotonic() {
    use ElectionState::*;
    let order = [Created, RegistrationOpen, Active, RevealPhase, Ended];
    for (i, from) in order.iter().enumerate() {
        for to in &order[..=i] {
            assert!(!from.can_transition_to(*to), "{from:?} -> {to:?}");
        }
    }
}
