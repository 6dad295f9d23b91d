//! End-to-end persistence: run a governance scenario against the nullable
//! infrastructure, save the engine, reload it, and compare every observable.

use agora_governance::{GovernanceEngine, GovernanceParams, ProposalStatus, TokenKind};
use agora_nullables::{NullClock, NullStore, NullTokenLedger};
use agora_types::{AccountAddress, TokenAmount};

fn owner() -> AccountAddress {
    AccountAddress::new("acct_owner")
}

fn alice() -> AccountAddress {
    AccountAddress::new("acct_alice")
}

fn bob() -> AccountAddress {
    AccountAddress::new("acct_bob")
}

#[test]
fn engine_state_survives_save_and_load() {
    let clock = NullClock::new(1_000_000);
    let ledger = NullTokenLedger::new();
    ledger.set_balance(&alice(), 150);
    ledger.set_balance(&bob(), 200);

    let mut engine = GovernanceEngine::new(owner(), GovernanceParams::default());
    engine
        .set_governance_token(
            &owner(),
            AccountAddress::new("prog_token"),
            "fungible",
            None,
        )
        .unwrap();
    engine
        .set_minimum_threshold(&owner(), TokenAmount::new(100))
        .unwrap();

    let end = clock.now().plus_secs(2 * 86_400);
    let open = engine
        .submit_proposal(&alice(), clock.now(), end, "QmOpen", &ledger)
        .unwrap();
    let canceled = engine
        .submit_proposal(&bob(), clock.now(), end, "QmCanceled", &ledger)
        .unwrap();

    engine.vote(&alice(), open, "for", &ledger).unwrap();
    engine.vote(&bob(), open, "against", &ledger).unwrap();
    engine.cancel_proposal(&bob(), clock.now(), canceled).unwrap();

    let store = NullStore::new();
    engine.save_to_store(&store).unwrap();

    let restored =
        GovernanceEngine::load_from_store(&store, owner(), GovernanceParams::default())
            .unwrap();

    // Singleton cells.
    assert_eq!(
        restored.governance_token_info().unwrap().kind,
        TokenKind::Fungible
    );
    assert_eq!(restored.minimum_threshold().raw(), 100);
    assert_eq!(restored.last_proposal_id(), 2);

    // Proposal table, field for field.
    for id in [open, canceled] {
        assert_eq!(
            engine.get_proposal(id).unwrap(),
            restored.get_proposal(id).unwrap()
        );
    }
    assert_eq!(
        restored.get_proposal(canceled).unwrap().status,
        ProposalStatus::Canceled
    );

    // Vote table.
    assert_eq!(
        engine.get_vote(&alice(), open),
        restored.get_vote(&alice(), open)
    );
    assert_eq!(restored.get_vote(&bob(), open).unwrap().weight.raw(), 200);

    // Event log order.
    assert_eq!(engine.events(), restored.events());
}

#[test]
fn lifecycle_driven_by_nullable_clock() {
    let clock = NullClock::new(500_000);
    let ledger = NullTokenLedger::new();
    ledger.set_balance(&alice(), 10);

    let mut engine = GovernanceEngine::new(owner(), GovernanceParams::default());
    engine
        .set_governance_token(
            &owner(),
            AccountAddress::new("prog_token"),
            "fungible",
            None,
        )
        .unwrap();

    let end = clock.now().plus_secs(3 * 86_400);
    let id = engine
        .submit_proposal(&alice(), clock.now(), end, "QmClock", &ledger)
        .unwrap();

    // Too early to close.
    clock.advance(86_400);
    assert!(engine.close_proposal(clock.now(), id).is_err());

    // Reaching the deadline closes it.
    clock.set(end.as_secs());
    engine.close_proposal(clock.now(), id).unwrap();
    assert_eq!(
        engine.get_proposal(id).unwrap().status,
        ProposalStatus::Closed
    );
}
