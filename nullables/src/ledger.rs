//! Nullable token ledger — programmable balances for testing.

use agora_governance::{GovernanceError, TokenLedger};
use agora_types::{AccountAddress, TokenAmount};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory token ledger with programmable balances.
///
/// Unset holders have balance zero. Balances can be changed between
/// operations to exercise the weight-snapshot behavior of the engine.
pub struct NullTokenLedger {
    fungible: Mutex<HashMap<String, u128>>,
    multi: Mutex<HashMap<(String, u64), u128>>,
}

impl NullTokenLedger {
    pub fn new() -> Self {
        Self {
            fungible: Mutex::new(HashMap::new()),
            multi: Mutex::new(HashMap::new()),
        }
    }

    /// Set a holder's fungible balance.
    pub fn set_balance(&self, holder: &AccountAddress, amount: u128) {
        self.fungible
            .lock()
            .unwrap()
            .insert(holder.to_string(), amount);
    }

    /// Set a holder's balance in a multi-id pool.
    pub fn set_balance_id(&self, holder: &AccountAddress, id: u64, amount: u128) {
        self.multi
            .lock()
            .unwrap()
            .insert((holder.to_string(), id), amount);
    }
}

impl Default for NullTokenLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenLedger for NullTokenLedger {
    fn balance_of(&self, holder: &AccountAddress) -> Result<TokenAmount, GovernanceError> {
        Ok(TokenAmount::new(
            self.fungible
                .lock()
                .unwrap()
                .get(holder.as_str())
                .copied()
                .unwrap_or(0),
        ))
    }

    fn balance_of_id(
        &self,
        holder: &AccountAddress,
        id: u64,
    ) -> Result<TokenAmount, GovernanceError> {
        Ok(TokenAmount::new(
            self.multi
                .lock()
                .unwrap()
                .get(&(holder.to_string(), id))
                .copied()
                .unwrap_or(0),
        ))
    }
}
