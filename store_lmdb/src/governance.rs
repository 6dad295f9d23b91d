//! LMDB implementation of `GovernanceStore`.
//!
//! Key layout:
//! - proposals: `id` as 8 big-endian bytes
//! - votes: `id` as 8 big-endian bytes ++ voter address bytes, so a prefix
//!   scan on the id yields all votes of one proposal
//! - tallies: `id` as 8 big-endian bytes

use agora_store::{GovernanceStore, StoreError};
use agora_types::{AccountAddress, ProposalId};

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

fn vote_key(proposal: ProposalId, voter: &AccountAddress) -> Vec<u8> {
    let mut key = proposal.to_be_bytes().to_vec();
    key.extend_from_slice(voter.as_str().as_bytes());
    key
}

fn split_vote_key(key: &[u8]) -> Result<(ProposalId, AccountAddress), LmdbError> {
    if key.len() <= 8 {
        return Err(LmdbError::Serialization(
            "vote key shorter than its id prefix".to_string(),
        ));
    }
    let id = u64::from_be_bytes(key[..8].try_into().expect("checked length"));
    let voter = std::str::from_utf8(&key[8..])
        .map_err(|e| LmdbError::Serialization(e.to_string()))?;
    Ok((id, AccountAddress::new(voter.to_string())))
}

impl GovernanceStore for LmdbEnvironment {
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.proposals_db
            .put(&mut wtxn, &id.to_be_bytes(), data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .proposals_db
            .get(&rtxn, &id.to_be_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(|v| v.to_vec()))
    }

    fn iter_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut rows = Vec::new();
        for entry in self.proposals_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, data) = entry.map_err(LmdbError::from)?;
            if key.len() != 8 {
                Err(LmdbError::Serialization(
                    "proposal key has unexpected byte length".to_string(),
                ))?;
            }
            let id = u64::from_be_bytes(key.try_into().expect("checked length"));
            rows.push((id, data.to_vec()));
        }
        Ok(rows)
    }

    fn put_vote(
        &self,
        proposal: ProposalId,
        voter: &AccountAddress,
        data: &[u8],
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.votes_db
            .put(&mut wtxn, &vote_key(proposal, voter), data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_vote(
        &self,
        proposal: ProposalId,
        voter: &AccountAddress,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .votes_db
            .get(&rtxn, &vote_key(proposal, voter))
            .map_err(LmdbError::from)?;
        Ok(val.map(|v| v.to_vec()))
    }

    fn iter_votes(&self) -> Result<Vec<(ProposalId, AccountAddress, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut rows = Vec::new();
        for entry in self.votes_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, data) = entry.map_err(LmdbError::from)?;
            let (id, voter) = split_vote_key(key)?;
            rows.push((id, voter, data.to_vec()));
        }
        Ok(rows)
    }

    fn votes_for(
        &self,
        proposal: ProposalId,
    ) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = proposal.to_be_bytes();
        let mut rows = Vec::new();
        for entry in self
            .votes_db
            .prefix_iter(&rtxn, &prefix)
            .map_err(LmdbError::from)?
        {
            let (key, data) = entry.map_err(LmdbError::from)?;
            let (_, voter) = split_vote_key(key)?;
            rows.push((voter, data.to_vec()));
        }
        Ok(rows)
    }

    fn put_tally(&self, proposal: ProposalId, data: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.tallies_db
            .put(&mut wtxn, &proposal.to_be_bytes(), data)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_tally(&self, proposal: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .tallies_db
            .get(&rtxn, &proposal.to_be_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(|v| v.to_vec()))
    }

    fn iter_tallies(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut rows = Vec::new();
        for entry in self.tallies_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, data) = entry.map_err(LmdbError::from)?;
            if key.len() != 8 {
                Err(LmdbError::Serialization(
                    "tally key has unexpected byte length".to_string(),
                ))?;
            }
            let id = u64::from_be_bytes(key.try_into().expect("checked length"));
            rows.push((id, data.to_vec()));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAP_SIZE;

    fn open_env(dir: &tempfile::TempDir) -> LmdbEnvironment {
        LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap()
    }

    fn voter(name: &str) -> AccountAddress {
        AccountAddress::new(format!("acct_{name}"))
    }

    #[test]
    fn test_proposal_row_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let env = open_env(&dir);
        env.put_proposal(1, b"row_one").unwrap();
        env.put_proposal(2, b"row_two").unwrap();

        assert_eq!(env.get_proposal(1).unwrap().unwrap(), b"row_one");
        assert!(env.get_proposal(3).unwrap().is_none());
        assert_eq!(
            env.iter_proposals().unwrap(),
            vec![(1, b"row_one".to_vec()), (2, b"row_two".to_vec())]
        );
    }

    #[test]
    fn test_vote_prefix_scan_isolates_proposals() {
        let dir = tempfile::tempdir().unwrap();
        let env = open_env(&dir);
        env.put_vote(1, &voter("alice"), b"a").unwrap();
        env.put_vote(1, &voter("bob"), b"b").unwrap();
        env.put_vote(2, &voter("alice"), b"c").unwrap();

        let votes = env.votes_for(1).unwrap();
        assert_eq!(votes.len(), 2);
        assert!(votes.iter().all(|(v, _)| !v.is_program()));
        assert_eq!(env.votes_for(2).unwrap().len(), 1);
        assert_eq!(env.iter_votes().unwrap().len(), 3);

        assert_eq!(env.get_vote(1, &voter("bob")).unwrap().unwrap(), b"b");
        assert!(env.get_vote(2, &voter("bob")).unwrap().is_none());
    }

    #[test]
    fn test_tally_row_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let env = open_env(&dir);
        env.put_tally(9, b"tally").unwrap();
        assert_eq!(env.get_tally(9).unwrap().unwrap(), b"tally");
        assert_eq!(env.iter_tallies().unwrap(), vec![(9, b"tally".to_vec())]);
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let env = open_env(&dir);
            env.put_proposal(5, b"persisted").unwrap();
        }
        let env = open_env(&dir);
        assert_eq!(env.get_proposal(5).unwrap().unwrap(), b"persisted");
    }
}
