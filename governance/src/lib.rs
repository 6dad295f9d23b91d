//! Token-weighted governance for the Agora engine.
//!
//! Account holders submit proposals, vote on them with voting power derived
//! from their configured governance-token balance, and proposals move
//! through a small lifecycle: Active → Closed or Canceled.
//!
//! Key principle: vote weight is the voter's token balance snapshotted at
//! the moment of voting. It is never re-read afterward, so tallies stay
//! auditable and balance changes after the fact cannot move a result.
//!
//! The engine trusts its environment for three things it never produces
//! itself: the current time, the authenticated caller identity, and the
//! token-ledger balance answers (behind the [`TokenLedger`] trait).

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod gateway;
pub mod params;
pub mod proposal;

pub use config::{GovernanceTokenConfig, TokenKind};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use event::GovernanceEvent;
pub use gateway::{TokenGateway, TokenLedger};
pub use params::GovernanceParams;
pub use proposal::{Proposal, ProposalSnapshot, ProposalStatus, Tally, TokenVote, VoteChoice};
