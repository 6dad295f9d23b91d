//! Account address type with `acct_`/`prog_` prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An Agora account address.
///
/// Plain end-user accounts carry the `acct_` prefix; deployed programs
/// (contracts, including the governance token itself) carry `prog_`. The
/// distinction matters because several operations are restricted to direct
/// accounts and must reject calls relayed through another program.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Prefix for plain end-user accounts.
    pub const ACCOUNT_PREFIX: &'static str = "acct_";

    /// Prefix for program (contract) addresses.
    pub const PROGRAM_PREFIX: &'static str = "prog_";

    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string carries neither recognized prefix.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            s.starts_with(Self::ACCOUNT_PREFIX) || s.starts_with(Self::PROGRAM_PREFIX),
            "address must start with acct_ or prog_"
        );
        Self(s)
    }

    /// Whether this address belongs to a deployed program rather than a
    /// plain account.
    pub fn is_program(&self) -> bool {
        self.0.starts_with(Self::PROGRAM_PREFIX)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        (self.0.starts_with(Self::ACCOUNT_PREFIX) || self.0.starts_with(Self::PROGRAM_PREFIX))
            && self.0.len() > Self::ACCOUNT_PREFIX.len()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_is_not_program() {
        let a = AccountAddress::new("acct_alice");
        assert!(!a.is_program());
        assert!(a.is_valid());
    }

    #[test]
    fn test_program_prefix_detected() {
        let p = AccountAddress::new("prog_token_ledger");
        assert!(p.is_program());
        assert!(p.is_valid());
    }

    #[test]
    #[should_panic(expected = "address must start with")]
    fn test_unknown_prefix_rejected() {
        AccountAddress::new("user_alice");
    }

    #[test]
    fn test_display_roundtrip() {
        let a = AccountAddress::new("acct_alice");
        assert_eq!(a.to_string(), "acct_alice");
        assert_eq!(a.as_str(), "acct_alice");
    }
}
