//! Nullable store — thread-safe in-memory storage for testing.

use agora_store::{GovernanceStore, MetaStore, StoreError};
use agora_types::{AccountAddress, ProposalId};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// An in-memory governance + meta store for testing.
///
/// `BTreeMap`s keep iteration order deterministic across runs.
pub struct NullStore {
    proposals: Mutex<BTreeMap<ProposalId, Vec<u8>>>,
    votes: Mutex<BTreeMap<(ProposalId, String), Vec<u8>>>,
    tallies: Mutex<BTreeMap<ProposalId, Vec<u8>>>,
    meta: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            proposals: Mutex::new(BTreeMap::new()),
            votes: Mutex::new(BTreeMap::new()),
            tallies: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernanceStore for NullStore {
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        self.proposals.lock().unwrap().insert(id, data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.proposals.lock().unwrap().get(&id).cloned())
    }

    fn iter_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }

    fn put_vote(
        &self,
        proposal: ProposalId,
        voter: &AccountAddress,
        data: &[u8],
    ) -> Result<(), StoreError> {
        self.votes
            .lock()
            .unwrap()
            .insert((proposal, voter.to_string()), data.to_vec());
        Ok(())
    }

    fn get_vote(
        &self,
        proposal: ProposalId,
        voter: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&(proposal, voter.to_string()))
            .cloned())
    }

    fn iter_votes(&self) -> Result<Vec<(ProposalId, AccountAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .map(|((id, voter), data)| {
                (*id, AccountAddress::new(voter.clone()), data.clone())
            })
            .collect())
    }

    fn put_tally(&self, proposal: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        self.tallies.lock().unwrap().insert(proposal, data.to_vec());
        Ok(())
    }

    fn get_tally(&self, proposal: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.tallies.lock().unwrap().get(&proposal).cloned())
    }

    fn iter_tallies(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        Ok(self
            .tallies
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (*id, data.clone()))
            .collect())
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn delete_meta(&self, key: &str) -> Result<(), StoreError> {
        self.meta.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter() -> AccountAddress {
        AccountAddress::new("acct_voter")
    }

    #[test]
    fn test_proposal_rows_roundtrip() {
        let store = NullStore::new();
        store.put_proposal(1, b"row").unwrap();
        assert_eq!(store.get_proposal(1).unwrap().unwrap(), b"row");
        assert!(store.get_proposal(2).unwrap().is_none());
    }

    #[test]
    fn test_vote_rows_keyed_by_proposal_and_voter() {
        let store = NullStore::new();
        store.put_vote(1, &voter(), b"a").unwrap();
        store.put_vote(2, &voter(), b"b").unwrap();
        assert_eq!(store.get_vote(1, &voter()).unwrap().unwrap(), b"a");
        assert_eq!(store.get_vote(2, &voter()).unwrap().unwrap(), b"b");
        assert_eq!(store.votes_for(1).unwrap().len(), 1);
        assert_eq!(store.iter_votes().unwrap().len(), 2);
    }

    #[test]
    fn test_meta_cells() {
        let store = NullStore::new();
        assert!(store.get_meta("last_proposal_id").unwrap().is_none());
        store.put_meta("last_proposal_id", &7u64.to_be_bytes()).unwrap();
        assert_eq!(
            store.get_meta("last_proposal_id").unwrap().unwrap(),
            7u64.to_be_bytes()
        );
        store.delete_meta("last_proposal_id").unwrap();
        assert!(store.get_meta("last_proposal_id").unwrap().is_none());
    }
}
