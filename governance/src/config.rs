//! Governance token configuration.

use crate::error::GovernanceError;
use agora_types::AccountAddress;
use serde::{Deserialize, Serialize};

/// Which balance query the external token ledger answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// A plain fungible token: one balance per holder.
    Fungible,
    /// A multi-id token: balances are per `(holder, id)` pair.
    MultiId { id: u64 },
}

impl TokenKind {
    /// Parse a caller-supplied kind string, case-insensitively.
    ///
    /// `id` is required for `multi-id` and ignored for `fungible`, matching
    /// the optional-argument shape of the public operation.
    pub fn parse(kind: &str, id: Option<u64>) -> Result<Self, GovernanceError> {
        match kind.to_ascii_lowercase().as_str() {
            "fungible" => Ok(TokenKind::Fungible),
            "multi-id" => match id {
                Some(id) => Ok(TokenKind::MultiId { id }),
                None => Err(GovernanceError::InvalidTokenKind(format!(
                    "{kind} requires an id"
                ))),
            },
            other => Err(GovernanceError::InvalidTokenKind(other.to_string())),
        }
    }
}

/// The admin-owned singleton naming which token ledger to query for voting
/// power. Set at most once unless reconfiguration is explicitly enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceTokenConfig {
    /// Address of the token ledger program.
    pub address: AccountAddress,
    /// How to query it.
    pub kind: TokenKind,
}
