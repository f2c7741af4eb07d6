//! End-to-end scenarios against a genesis asset, driven by a deterministic
//! clock and an event recorder.

use parcel_asset::{
    AssetConfig, AssetError, AssetEvent, Envelope, FailureKind, FractionalAsset,
    OperationOutcome, StateSnapshot,
};
use parcel_governance::ProposalStatus;
use parcel_ledger::{AccessControl, OwnerAdminPolicy};
use parcel_nullables::{EventRecorder, NullClock};
use parcel_types::{AccountId, ProposalId, Timestamp, Units, Weight};

fn acct(name: &str) -> AccountId {
    AccountId::new(format!("prcl_{name}"))
}

fn genesis(supply: u64) -> (FractionalAsset, EventRecorder<AssetEvent>) {
    let config = AssetConfig {
        owner: acct("owner"),
        initial_supply: supply,
        ..Default::default()
    };
    let mut asset = FractionalAsset::genesis(&config).unwrap();
    let recorder = EventRecorder::new();
    asset.subscribe(recorder.listener());
    (asset, recorder)
}

#[test]
fn sole_holder_passes_and_executes_once() {
    let clock = NullClock::new(1_000);
    let (mut asset, recorder) = genesis(1000);
    let a = acct("owner");
    asset.update_voting_power(&a, &a, Weight::new(1000)).unwrap();

    let id = asset
        .create_proposal(&a, "raise rent", 3600, clock.now())
        .unwrap();
    assert_eq!(id, ProposalId::FIRST);

    clock.advance(10);
    asset.vote(&a, id, true, clock.now()).unwrap();
    assert_eq!(asset.proposal(id).unwrap().yes_votes, Weight::new(1000));

    let deadline = asset.proposal(id).unwrap().vote_deadline;
    assert_eq!(
        asset.execute_proposal(&a, id, deadline).unwrap_err().kind(),
        FailureKind::VotingStillOpen
    );

    clock.pass(deadline);
    asset.execute_proposal(&a, id, clock.now()).unwrap();
    assert!(asset.proposal(id).unwrap().executed);
    assert_eq!(
        asset.proposal_status(id, clock.now()),
        Some(ProposalStatus::Executed)
    );

    let err = asset.execute_proposal(&a, id, clock.now()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::AlreadyExecuted);

    let executed: Vec<_> = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, AssetEvent::ProposalExecuted { .. }))
        .collect();
    assert_eq!(executed, vec![AssetEvent::ProposalExecuted { id }]);
}

#[test]
fn quorum_and_majority_boundaries() {
    let clock = NullClock::new(0);
    let (mut asset, _recorder) = genesis(1000);
    let owner = acct("owner");
    let powers = [
        ("y499", 499),
        ("y500", 500),
        ("y501", 501),
        ("n600", 600),
        ("y100", 100),
        ("n100", 100),
    ];
    for (name, power) in powers {
        asset
            .update_voting_power(&owner, &acct(name), Weight::new(power))
            .unwrap();
    }

    let mut open = |votes: &[(&str, bool)]| {
        let id = asset
            .create_proposal(&owner, "boundary", 60, clock.now())
            .unwrap();
        for (voter, support) in votes {
            asset.vote(&acct(voter), id, *support, clock.now()).unwrap();
        }
        id
    };
    let below_quorum = open(&[("y499", true)]);
    let at_quorum = open(&[("y500", true)]);
    let outvoted = open(&[("y501", true), ("n600", false)]);
    let tie = open(&[("y100", true), ("n100", false)]);

    let after = clock.advance(61);
    let kind = |r: Result<(), AssetError>| r.map_err(|e| e.kind());
    assert_eq!(
        kind(asset.execute_proposal(&owner, below_quorum, after)),
        Err(FailureKind::QuorumNotMet)
    );
    assert_eq!(kind(asset.execute_proposal(&owner, at_quorum, after)), Ok(()));
    assert_eq!(
        kind(asset.execute_proposal(&owner, outvoted, after)),
        Err(FailureKind::ProposalRejected)
    );
    assert_eq!(
        kind(asset.execute_proposal(&owner, tie, after)),
        Err(FailureKind::ProposalRejected)
    );
}

#[test]
fn burned_out_supply_reports_quorum_not_met() {
    let clock = NullClock::new(0);
    let (mut asset, _recorder) = genesis(10);
    let owner = acct("owner");
    asset
        .update_voting_power(&owner, &owner, Weight::new(5))
        .unwrap();
    let id = asset.create_proposal(&owner, "wind down", 5, clock.now()).unwrap();
    asset.vote(&owner, id, true, clock.now()).unwrap();
    asset.burn(&owner, &owner, Units::new(10)).unwrap();
    assert_eq!(asset.total_supply(), Units::ZERO);

    let err = asset
        .execute_proposal(&owner, id, clock.advance(6))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::QuorumNotMet);
}

#[test]
fn rejected_operations_leave_state_and_listeners_untouched() {
    let clock = NullClock::new(0);
    let (mut asset, recorder) = genesis(100);
    let owner = acct("owner");
    let bob = acct("bob");
    asset.transfer(&owner, &bob, Units::new(10)).unwrap();
    asset.update_voting_power(&owner, &bob, Weight::new(7)).unwrap();
    let before = StateSnapshot::capture(&asset).unwrap();
    recorder.take();

    let failures = [
        asset.transfer(&bob, &AccountId::null(), Units::new(1)).map(|_| ()),
        asset.transfer(&bob, &owner, Units::new(11)).map(|_| ()),
        asset
            .transfer_with_voting(&bob, &owner, Units::new(11), true)
            .map(|_| ()),
        asset.mint(&bob, &bob, Units::new(1)),
        asset.burn(&owner, &bob, Units::new(11)),
        asset.force_transfer(&bob, &owner, &bob, Units::new(1)),
        asset.update_voting_power(&bob, &bob, Weight::new(1)),
        asset.set_admin(&bob, &bob, true),
        asset.change_jurisdiction(&bob, "elsewhere"),
        asset
            .create_proposal(&acct("nobody"), "x", 10, clock.now())
            .map(|_| ()),
        asset.vote(&bob, ProposalId::new(9), true, clock.now()),
        asset.execute_proposal(&bob, ProposalId::FIRST, clock.now()),
    ];
    let kinds: Vec<_> = failures.iter().map(|r| r.as_ref().unwrap_err().kind()).collect();
    assert_eq!(
        kinds,
        vec![
            FailureKind::InvalidRecipient,
            FailureKind::InsufficientBalance,
            FailureKind::InsufficientBalance,
            FailureKind::Unauthorized,
            FailureKind::InsufficientBalance,
            FailureKind::Unauthorized,
            FailureKind::Unauthorized,
            FailureKind::Unauthorized,
            FailureKind::Unauthorized,
            FailureKind::NoStake,
            FailureKind::ProposalNotFound,
            FailureKind::ProposalNotFound,
        ]
    );

    assert!(recorder.is_empty());
    assert_eq!(StateSnapshot::capture(&asset).unwrap().digest, before.digest);
    assert_eq!(asset.voting_power_of(&bob), Weight::new(7));
}

#[test]
fn power_moves_whole_and_survives_self_transfer() {
    let (mut asset, recorder) = genesis(100);
    let owner = acct("owner");
    let (a, b) = (acct("a"), acct("b"));
    asset.transfer(&owner, &a, Units::new(50)).unwrap();
    asset.update_voting_power(&owner, &a, Weight::new(30)).unwrap();
    asset.update_voting_power(&owner, &b, Weight::new(4)).unwrap();

    assert!(asset.transfer_with_voting(&a, &a, Units::new(5), true).unwrap());
    assert_eq!(asset.voting_power_of(&a), Weight::new(30));
    assert_eq!(asset.balance_of(&a), Units::new(50));

    recorder.take();
    assert!(asset.transfer_with_voting(&a, &b, Units::new(1), true).unwrap());
    assert_eq!(asset.voting_power_of(&a), Weight::ZERO);
    assert_eq!(asset.voting_power_of(&b), Weight::new(34));
    assert_eq!(
        recorder.events(),
        vec![AssetEvent::Transfer {
            from: a.clone(),
            to: b.clone(),
            amount: Units::new(1),
        }]
    );
}

#[test]
fn votes_are_weighted_at_cast_time() {
    let clock = NullClock::new(0);
    let (mut asset, _recorder) = genesis(100);
    let owner = acct("owner");
    let voter = acct("voter");
    asset.update_voting_power(&owner, &voter, Weight::new(60)).unwrap();
    let id = asset.create_proposal(&owner, "paint", 100, clock.now()).unwrap();
    asset.vote(&voter, id, true, clock.advance(1)).unwrap();

    asset.update_voting_power(&owner, &voter, Weight::ZERO).unwrap();
    let err = asset.vote(&voter, id, false, clock.advance(1)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::AlreadyVoted);

    let proposal = asset.proposal(id).unwrap();
    assert_eq!(proposal.yes_votes, Weight::new(60));
    assert_eq!(proposal.no_votes, Weight::ZERO);
    let deadline = proposal.vote_deadline;

    let err = asset
        .vote(&owner, id, true, clock.pass(deadline))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::VotingClosed);
    asset.execute_proposal(&owner, id, clock.now()).unwrap();
}

#[test]
fn replayed_stream_matches_direct_calls() {
    let lines = [
        r#"{"caller":"prcl_owner","now":1,"op":{"transfer":{"to":"prcl_bob","amount":400}}}"#,
        r#"{"caller":"prcl_owner","now":2,"op":{"update_voting_power":{"account":"prcl_bob","power":600}}}"#,
        r#"{"caller":"prcl_bob","now":3,"op":{"create_proposal":{"description":"solar panels","voting_period_secs":100}}}"#,
        r#"{"caller":"prcl_bob","now":4,"op":{"vote":{"id":1,"support":true}}}"#,
        r#"{"caller":"prcl_bob","now":5,"op":{"vote":{"id":1,"support":true}}}"#,
        r#"{"caller":"prcl_carol","now":103,"op":{"execute_proposal":{"id":1}}}"#,
        r#"{"caller":"prcl_carol","now":200,"op":{"execute_proposal":{"id":1}}}"#,
        r#"{"caller":"prcl_owner","now":201,"op":{"change_jurisdiction":{"jurisdiction":"NL-NH"}}}"#,
    ];
    let (mut replayed, recorder) = genesis(1000);
    let outcomes: Vec<_> = lines
        .iter()
        .map(|line| {
            let env = Envelope::parse_line(line).unwrap();
            replayed.apply(&env).map_err(|e| e.kind())
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            Ok(OperationOutcome::Transferred(true)),
            Ok(OperationOutcome::Done),
            Ok(OperationOutcome::ProposalCreated(ProposalId::FIRST)),
            Ok(OperationOutcome::Done),
            Err(FailureKind::AlreadyVoted),
            Err(FailureKind::VotingStillOpen),
            Ok(OperationOutcome::Done),
            Ok(OperationOutcome::Done),
        ]
    );
    assert_eq!(recorder.len(), 6);
    assert_eq!(replayed.metadata().jurisdiction, "NL-NH");

    let (mut direct, _) = genesis(1000);
    let (owner, bob, carol) = (acct("owner"), acct("bob"), acct("carol"));
    let clock = NullClock::new(1);
    direct.transfer(&owner, &bob, Units::new(400)).unwrap();
    direct.update_voting_power(&owner, &bob, Weight::new(600)).unwrap();
    let id = direct.create_proposal(&bob, "solar panels", 100, clock.advance(2)).unwrap();
    direct.vote(&bob, id, true, clock.advance(1)).unwrap();
    direct.execute_proposal(&carol, id, Timestamp::new(200)).unwrap();
    direct.change_jurisdiction(&owner, "NL-NH").unwrap();

    assert_eq!(
        StateSnapshot::capture(&direct).unwrap().digest,
        StateSnapshot::capture(&replayed).unwrap().digest
    );
}

#[test]
fn snapshot_file_round_trip() {
    let clock = NullClock::new(50);
    let (mut asset, _recorder) = genesis(250);
    let owner = acct("owner");
    asset.set_admin(&owner, &acct("arbiter"), true).unwrap();
    asset.update_voting_power(&owner, &owner, Weight::new(250)).unwrap();
    let id = asset.create_proposal(&owner, "sell", 10, clock.now()).unwrap();
    asset.vote(&owner, id, false, clock.now()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asset.snap");
    StateSnapshot::capture(&asset).unwrap().save_to(&path).unwrap();

    let loaded = StateSnapshot::load_from(&path).unwrap();
    let mut policy = OwnerAdminPolicy::new(owner.clone());
    policy.set_admin(&acct("arbiter"), true);
    let mut restored = FractionalAsset::restore(loaded, policy).unwrap();

    assert_eq!(restored.balance_of(&owner), Units::new(250));
    assert!(restored.is_admin(&acct("arbiter")));
    assert_eq!(restored.proposal(id).unwrap().no_votes, Weight::new(250));
    let err = restored.vote(&owner, id, true, clock.now()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::AlreadyVoted);
    let err = restored
        .execute_proposal(&owner, id, clock.advance(11))
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::ProposalRejected);
}

#[test]
fn corrupted_snapshot_file_is_rejected() {
    let (asset, _recorder) = genesis(5);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asset.snap");
    StateSnapshot::capture(&asset).unwrap().save_to(&path).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    std::fs::write(&path, &bytes).unwrap();

    let err = StateSnapshot::load_from(&path).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Environment);
    assert!(StateSnapshot::load_from(dir.path().join("missing")).is_err());
}
