//! Fundamental types for the Agora governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account addresses, token amounts, timestamps, and proposal ids.

pub mod address;
pub mod amount;
pub mod time;

pub use address::AccountAddress;
pub use amount::TokenAmount;
pub use time::Timestamp;

/// Identifier of a governance proposal.
///
/// The sequence starts at 1, is strictly increasing, and ids are never reused.
/// `0` is reserved to mean "no proposal allocated yet".
pub type ProposalId = u64;
