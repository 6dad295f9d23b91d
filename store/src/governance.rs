//! Governance storage trait.
//!
//! Rows are opaque bincode-encoded bytes; the engine owns the entity types
//! and their encoding, the store only keys and retrieves them.

use crate::StoreError;
use agora_types::{AccountAddress, ProposalId};

/// Trait for storing governance state: the proposal table, the per-voter
/// vote table, and the per-proposal tally table.
pub trait GovernanceStore {
    /// Store a proposal row.
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal row by id.
    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError>;

    /// Iterate all proposal rows.
    fn iter_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError>;

    /// Store a vote row keyed by `(proposal, voter)`.
    fn put_vote(
        &self,
        proposal: ProposalId,
        voter: &AccountAddress,
        data: &[u8],
    ) -> Result<(), StoreError>;

    /// Get a specific voter's vote row on a proposal.
    fn get_vote(
        &self,
        proposal: ProposalId,
        voter: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Iterate all vote rows across all proposals.
    fn iter_votes(&self) -> Result<Vec<(ProposalId, AccountAddress, Vec<u8>)>, StoreError>;

    /// All vote rows for a single proposal.
    fn votes_for(
        &self,
        proposal: ProposalId,
    ) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .iter_votes()?
            .into_iter()
            .filter(|(id, _, _)| *id == proposal)
            .map(|(_, voter, data)| (voter, data))
            .collect())
    }

    /// Store a tally row.
    fn put_tally(&self, proposal: ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a tally row by proposal id.
    fn get_tally(&self, proposal: ProposalId) -> Result<Option<Vec<u8>>, StoreError>;

    /// Iterate all tally rows.
    fn iter_tallies(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError>;
}
