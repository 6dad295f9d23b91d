//! Token gateway — resolves voting power against the external token ledger.

use crate::config::{GovernanceTokenConfig, TokenKind};
use crate::error::GovernanceError;
use agora_types::{AccountAddress, TokenAmount};

/// The external token ledger's balance queries.
///
/// This is the only trust boundary the engine crosses during an operation.
/// Implementations answer synchronously; the engine treats the result as
/// authoritative and uses it immediately, never caching it across
/// operations.
pub trait TokenLedger {
    /// Balance query for a fungible token.
    fn balance_of(&self, holder: &AccountAddress) -> Result<TokenAmount, GovernanceError>;

    /// Balance query for a multi-id token: `(holder, id)`.
    fn balance_of_id(
        &self,
        holder: &AccountAddress,
        id: u64,
    ) -> Result<TokenAmount, GovernanceError>;
}

/// Dispatches the right balance query for the configured token kind.
pub struct TokenGateway<'a> {
    config: &'a GovernanceTokenConfig,
    ledger: &'a dyn TokenLedger,
}

impl<'a> TokenGateway<'a> {
    /// Build a gateway from the current configuration.
    ///
    /// Fails with `TokenNotConfigured` before the admin has set a token.
    pub fn new(
        config: Option<&'a GovernanceTokenConfig>,
        ledger: &'a dyn TokenLedger,
    ) -> Result<Self, GovernanceError> {
        match config {
            Some(config) => Ok(Self { config, ledger }),
            None => Err(GovernanceError::TokenNotConfigured),
        }
    }

    /// The caller's voting power: its current token balance.
    pub fn voting_power_of(
        &self,
        holder: &AccountAddress,
    ) -> Result<TokenAmount, GovernanceError> {
        match self.config.kind {
            TokenKind::Fungible => self.ledger.balance_of(holder),
            TokenKind::MultiId { id } => self.ledger.balance_of_id(holder, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneBalanceLedger;

    impl TokenLedger for OneBalanceLedger {
        fn balance_of(&self, _holder: &AccountAddress) -> Result<TokenAmount, GovernanceError> {
            Ok(TokenAmount::new(42))
        }

        fn balance_of_id(
            &self,
            _holder: &AccountAddress,
            id: u64,
        ) -> Result<TokenAmount, GovernanceError> {
            Ok(TokenAmount::new(id as u128))
        }
    }

    #[test]
    fn test_unconfigured_gateway_fails() {
        let ledger = OneBalanceLedger;
        assert!(matches!(
            TokenGateway::new(None, &ledger),
            Err(GovernanceError::TokenNotConfigured)
        ));
    }

    #[test]
    fn test_dispatch_by_kind() {
        let ledger = OneBalanceLedger;
        let holder = AccountAddress::new("acct_holder");

        let fungible = GovernanceTokenConfig {
            address: AccountAddress::new("prog_token"),
            kind: TokenKind::Fungible,
        };
        let gateway = TokenGateway::new(Some(&fungible), &ledger).unwrap();
        assert_eq!(gateway.voting_power_of(&holder).unwrap().raw(), 42);

        let multi = GovernanceTokenConfig {
            address: AccountAddress::new("prog_token"),
            kind: TokenKind::MultiId { id: 9 },
        };
        let gateway = TokenGateway::new(Some(&multi), &ledger).unwrap();
        assert_eq!(gateway.voting_power_of(&holder).unwrap().raw(), 9);
    }
}
