//! Proposals, votes, and tallies.

use crate::error::GovernanceError;
use agora_types::{AccountAddress, ProposalId, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal.
///
/// `Active` transitions exactly once to `Closed` or `Canceled`; both are
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Voting is open.
    Active,
    /// End time was reached and the proposal was closed.
    Closed,
    /// The creator withdrew the proposal within the grace window.
    Canceled,
}

impl ProposalStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Canceled)
    }
}

/// A governance proposal.
///
/// Every field except `status` is immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Who submitted it.
    pub creator: AccountAddress,
    /// Creation timestamp.
    pub start_time: Timestamp,
    /// Voting deadline.
    pub end_time: Timestamp,
    /// Opaque content reference; not interpreted by the engine.
    pub ipfs_hash: String,
    pub status: ProposalStatus,
}

/// A voter's choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

impl VoteChoice {
    /// Parse a caller-supplied choice string, case-insensitively.
    pub fn parse(choice: &str) -> Result<Self, GovernanceError> {
        match choice.to_ascii_lowercase().as_str() {
            "for" => Ok(Self::For),
            "against" => Ok(Self::Against),
            "abstain" => Ok(Self::Abstain),
            other => Err(GovernanceError::InvalidChoice(other.to_string())),
        }
    }
}

/// One account's recorded vote on one proposal. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenVote {
    pub choice: VoteChoice,
    /// The voter's token balance snapshotted at the moment of voting.
    pub weight: TokenAmount,
}

/// Running per-choice sums for one proposal.
///
/// Maintained incrementally: each recorded vote adds its weight to exactly
/// one bucket, so the tally always equals the sum over the vote table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub for_sum: TokenAmount,
    pub against_sum: TokenAmount,
    pub abstain_sum: TokenAmount,
}

impl Tally {
    /// Add `weight` to the bucket for `choice`, with checked arithmetic.
    pub fn accumulate(
        &mut self,
        choice: VoteChoice,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        let bucket = match choice {
            VoteChoice::For => &mut self.for_sum,
            VoteChoice::Against => &mut self.against_sum,
            VoteChoice::Abstain => &mut self.abstain_sum,
        };
        *bucket = bucket.checked_add(weight).ok_or(GovernanceError::Overflow)?;
        Ok(())
    }
}

/// Immutable read-only view of a proposal plus its current tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSnapshot {
    pub id: ProposalId,
    pub creator: AccountAddress,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub ipfs_hash: String,
    pub status: ProposalStatus,
    pub tally: Tally,
}

impl ProposalSnapshot {
    pub fn new(proposal: &Proposal, tally: Tally) -> Self {
        Self {
            id: proposal.id,
            creator: proposal.creator.clone(),
            start_time: proposal.start_time,
            end_time: proposal.end_time,
            ipfs_hash: proposal.ipfs_hash.clone(),
            status: proposal.status,
            tally,
        }
    }
}
