use std::collections::HashMap;

use proptest::prelude::*;

use agora_governance::{
    GovernanceEngine, GovernanceError, GovernanceParams, TokenLedger, VoteChoice,
};
use agora_types::{AccountAddress, Timestamp, TokenAmount};

struct FixedLedger {
    balances: HashMap<String, u128>,
}

impl TokenLedger for FixedLedger {
    fn balance_of(&self, holder: &AccountAddress) -> Result<TokenAmount, GovernanceError> {
        Ok(TokenAmount::new(
            self.balances.get(holder.as_str()).copied().unwrap_or(0),
        ))
    }

    fn balance_of_id(
        &self,
        holder: &AccountAddress,
        _id: u64,
    ) -> Result<TokenAmount, GovernanceError> {
        self.balance_of(holder)
    }
}

fn owner() -> AccountAddress {
    AccountAddress::new("acct_owner")
}

fn voter(n: usize) -> AccountAddress {
    AccountAddress::new(format!("acct_voter_{n}"))
}

fn choice_str(c: usize) -> &'static str {
    ["for", "against", "abstain"][c % 3]
}

fn engine_with_proposal(ledger: &FixedLedger) -> (GovernanceEngine, u64) {
    let mut engine = GovernanceEngine::new(owner(), GovernanceParams::default());
    engine
        .set_governance_token(
            &owner(),
            AccountAddress::new("prog_token"),
            "fungible",
            None,
        )
        .unwrap();
    let now = Timestamp::new(1_000_000);
    let end = now.plus_secs(2 * 86_400);
    let id = engine
        .submit_proposal(&owner(), now, end, "hash", ledger)
        .unwrap();
    (engine, id)
}

proptest! {
    /// After any sequence of votes by distinct holders, each tally bucket
    /// equals the sum of the weights recorded for that choice.
    #[test]
    fn tally_is_sum_of_recorded_votes(
        balances in proptest::collection::vec(0u128..1_000_000, 1..20),
        choices in proptest::collection::vec(0usize..3, 1..20),
    ) {
        let n = balances.len().min(choices.len());
        let mut map = HashMap::new();
        map.insert(owner().to_string(), 1u128);
        for (i, b) in balances.iter().enumerate().take(n) {
            map.insert(voter(i).to_string(), *b);
        }
        let ledger = FixedLedger { balances: map };
        let (mut engine, id) = engine_with_proposal(&ledger);

        let mut sums = [0u128; 3];
        for i in 0..n {
            let result = engine.vote(&voter(i), id, choice_str(choices[i]), &ledger);
            if balances[i] == 0 {
                prop_assert!(matches!(result, Err(GovernanceError::NotTokenHolder)));
            } else {
                prop_assert!(result.is_ok());
                sums[choices[i] % 3] += balances[i];
            }

            let tally = engine.get_proposal(id).unwrap().tally;
            prop_assert_eq!(tally.for_sum.raw(), sums[0]);
            prop_assert_eq!(tally.against_sum.raw(), sums[1]);
            prop_assert_eq!(tally.abstain_sum.raw(), sums[2]);
        }
    }

    /// A second vote by the same holder always fails and never moves the
    /// tally, regardless of the new choice.
    #[test]
    fn double_vote_never_changes_tally(
        balance in 1u128..1_000_000,
        first in 0usize..3,
        second in 0usize..3,
    ) {
        let mut map = HashMap::new();
        map.insert(owner().to_string(), 1u128);
        map.insert(voter(0).to_string(), balance);
        let ledger = FixedLedger { balances: map };
        let (mut engine, id) = engine_with_proposal(&ledger);

        engine.vote(&voter(0), id, choice_str(first), &ledger).unwrap();
        let before = engine.get_proposal(id).unwrap().tally;

        let result = engine.vote(&voter(0), id, choice_str(second), &ledger);
        prop_assert!(matches!(result, Err(GovernanceError::AlreadyVoted)));
        prop_assert_eq!(engine.get_proposal(id).unwrap().tally, before);

        let recorded = engine.get_vote(&voter(0), id).unwrap();
        let expected = VoteChoice::parse(choice_str(first)).unwrap();
        prop_assert_eq!(recorded.choice, expected);
    }

    /// Proposal ids form the sequence 1..=n over any number of submissions.
    #[test]
    fn ids_are_dense_and_increasing(count in 1usize..30) {
        let mut map = HashMap::new();
        map.insert(owner().to_string(), 1u128);
        let ledger = FixedLedger { balances: map };

        let mut engine = GovernanceEngine::new(owner(), GovernanceParams::default());
        engine
            .set_governance_token(
                &owner(),
                AccountAddress::new("prog_token"),
                "fungible",
                None,
            )
            .unwrap();

        let now = Timestamp::new(1_000_000);
        let end = now.plus_secs(2 * 86_400);
        for expected in 1..=count as u64 {
            let id = engine
                .submit_proposal(&owner(), now, end, "hash", &ledger)
                .unwrap();
            prop_assert_eq!(id, expected);
            prop_assert_eq!(engine.last_proposal_id(), expected);
        }
    }
}
