//! Core governance engine — admin configuration, proposal lifecycle, and
//! vote tallying.
//!
//! The engine owns all governance state exclusively. It executes one
//! operation at a time to completion; the surrounding environment guarantees
//! sequential, atomic invocation and supplies the trusted clock and caller
//! identity as explicit arguments. Every operation checks all of its
//! preconditions before the first mutation, so a failure never leaves a
//! partial effect behind.

use std::collections::HashMap;

use agora_store::{GovernanceStore, MetaStore};
use agora_types::{AccountAddress, ProposalId, Timestamp, TokenAmount};
use tracing::{debug, info};

use crate::config::{GovernanceTokenConfig, TokenKind};
use crate::error::GovernanceError;
use crate::event::GovernanceEvent;
use crate::gateway::{TokenGateway, TokenLedger};
use crate::params::GovernanceParams;
use crate::proposal::{
    Proposal, ProposalSnapshot, ProposalStatus, Tally, TokenVote, VoteChoice,
};

/// Meta-store keys for the singleton cells.
const META_TOKEN_CONFIG: &str = "token_config";
const META_MIN_THRESHOLD: &str = "minimum_threshold";
const META_LAST_PROPOSAL_ID: &str = "last_proposal_id";
const META_EVENT_LOG: &str = "event_log";

/// The governance engine.
pub struct GovernanceEngine {
    /// The administrative identity. Fixed at construction.
    owner: AccountAddress,
    params: GovernanceParams,
    token_config: Option<GovernanceTokenConfig>,
    minimum_threshold: TokenAmount,
    /// Highest allocated proposal id; 0 before the first submission.
    last_id: ProposalId,
    proposals: HashMap<ProposalId, Proposal>,
    votes: HashMap<(ProposalId, AccountAddress), TokenVote>,
    tallies: HashMap<ProposalId, Tally>,
    /// Append-only notification log, in operation order.
    events: Vec<GovernanceEvent>,
}

impl GovernanceEngine {
    pub fn new(owner: AccountAddress, params: GovernanceParams) -> Self {
        Self {
            owner,
            params,
            token_config: None,
            minimum_threshold: TokenAmount::ZERO,
            last_id: 0,
            proposals: HashMap::new(),
            votes: HashMap::new(),
            tallies: HashMap::new(),
            events: Vec::new(),
        }
    }

    fn only_owner(&self, caller: &AccountAddress) -> Result<(), GovernanceError> {
        if caller != &self.owner {
            return Err(GovernanceError::NotOwner);
        }
        Ok(())
    }

    fn only_direct_caller(caller: &AccountAddress) -> Result<(), GovernanceError> {
        if caller.is_program() {
            return Err(GovernanceError::OnlyDirectCaller);
        }
        Ok(())
    }

    // ── AdminConfig ──────────────────────────────────────────────────────

    /// Configure which token ledger voting power is read from.
    ///
    /// Admin-only. Write-once unless `params.allow_token_reconfig` is set.
    /// `id` is required iff `kind` is a multi-id token.
    pub fn set_governance_token(
        &mut self,
        caller: &AccountAddress,
        address: AccountAddress,
        kind: &str,
        id: Option<u64>,
    ) -> Result<(), GovernanceError> {
        self.only_owner(caller)?;
        if self.token_config.is_some() && !self.params.allow_token_reconfig {
            return Err(GovernanceError::AlreadyConfigured);
        }
        let kind = TokenKind::parse(kind, id)?;
        info!(token = %address, ?kind, "governance token configured");
        self.token_config = Some(GovernanceTokenConfig { address, kind });
        Ok(())
    }

    /// Set the minimum voting power required to submit a proposal.
    ///
    /// Admin-only, strictly positive, may be changed any number of times.
    pub fn set_minimum_threshold(
        &mut self,
        caller: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), GovernanceError> {
        self.only_owner(caller)?;
        if amount.is_zero() {
            return Err(GovernanceError::InvalidThreshold);
        }
        info!(%amount, "minimum threshold set");
        self.minimum_threshold = amount;
        Ok(())
    }

    /// Current token configuration, or `None` before the first write.
    pub fn governance_token_info(&self) -> Option<&GovernanceTokenConfig> {
        self.token_config.as_ref()
    }

    /// Current submission threshold (zero before the first write).
    pub fn minimum_threshold(&self) -> TokenAmount {
        self.minimum_threshold
    }

    // ── ProposalRegistry ─────────────────────────────────────────────────

    /// Submit a new proposal; returns its id.
    pub fn submit_proposal(
        &mut self,
        caller: &AccountAddress,
        now: Timestamp,
        end_time: Timestamp,
        ipfs_hash: impl Into<String>,
        ledger: &dyn TokenLedger,
    ) -> Result<ProposalId, GovernanceError> {
        Self::only_direct_caller(caller)?;
        let min = self.params.min_voting_lead_secs;
        let max = self.params.max_voting_lead_secs;
        if end_time <= now.plus_secs(min) || end_time > now.plus_secs(max) {
            return Err(GovernanceError::InvalidEndTime {
                min_secs: min,
                max_secs: max,
            });
        }

        let gateway = TokenGateway::new(self.token_config.as_ref(), ledger)?;
        let power = gateway.voting_power_of(caller)?;
        if power < self.minimum_threshold {
            return Err(GovernanceError::ThresholdNotMet {
                have: power.raw(),
                need: self.minimum_threshold.raw(),
            });
        }

        let id = self
            .last_id
            .checked_add(1)
            .ok_or(GovernanceError::Overflow)?;
        self.last_id = id;
        self.proposals.insert(
            id,
            Proposal {
                id,
                creator: caller.clone(),
                start_time: now,
                end_time,
                ipfs_hash: ipfs_hash.into(),
                status: ProposalStatus::Active,
            },
        );
        self.events.push(GovernanceEvent::ProposalSubmitted {
            id,
            creator: caller.clone(),
        });
        info!(proposal = id, creator = %caller, %end_time, "proposal submitted");
        Ok(id)
    }

    /// Cancel an active proposal.
    ///
    /// Creator-only, and only within the grace window after creation. Votes
    /// already cast stay recorded but are no longer actionable.
    pub fn cancel_proposal(
        &mut self,
        caller: &AccountAddress,
        now: Timestamp,
        id: ProposalId,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;
        if proposal.creator != *caller {
            return Err(GovernanceError::NotCreator);
        }
        if proposal.status != ProposalStatus::Active {
            return Err(GovernanceError::NotActive);
        }
        if proposal
            .start_time
            .has_expired(self.params.cancel_grace_secs, now)
        {
            return Err(GovernanceError::GraceExpired);
        }

        proposal.status = ProposalStatus::Canceled;
        self.events.push(GovernanceEvent::ProposalCanceled { id });
        info!(proposal = id, "proposal canceled");
        Ok(())
    }

    /// Close an active proposal whose end time has been reached. Anyone may
    /// call.
    pub fn close_proposal(
        &mut self,
        now: Timestamp,
        id: ProposalId,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;
        if proposal.status != ProposalStatus::Active {
            return Err(GovernanceError::NotActive);
        }
        if now < proposal.end_time {
            return Err(GovernanceError::EndTimeNotReached);
        }

        proposal.status = ProposalStatus::Closed;
        self.events.push(GovernanceEvent::ProposalClosed { id });
        info!(proposal = id, "proposal closed");
        Ok(())
    }

    /// Snapshot of a proposal's fields plus its current tally (all-zero if
    /// nobody voted yet).
    pub fn get_proposal(&self, id: ProposalId) -> Result<ProposalSnapshot, GovernanceError> {
        let proposal = self
            .proposals
            .get(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;
        let tally = self.tallies.get(&id).cloned().unwrap_or_default();
        Ok(ProposalSnapshot::new(proposal, tally))
    }

    /// The highest allocated proposal id, or 0 if none.
    pub fn last_proposal_id(&self) -> ProposalId {
        self.last_id
    }

    // ── VoteTally ────────────────────────────────────────────────────────

    /// Cast a vote on an active proposal.
    ///
    /// The caller's full token balance at this moment becomes the vote's
    /// weight; the matching tally bucket is incremented by the same amount.
    /// Both writes happen together after every precondition has passed.
    ///
    /// The voting window is bounded by proposal status, not the clock: a
    /// proposal past its end time still accepts votes until someone closes
    /// it.
    pub fn vote(
        &mut self,
        caller: &AccountAddress,
        id: ProposalId,
        choice: &str,
        ledger: &dyn TokenLedger,
    ) -> Result<(), GovernanceError> {
        Self::only_direct_caller(caller)?;
        let proposal = self
            .proposals
            .get(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;
        if proposal.status != ProposalStatus::Active {
            return Err(GovernanceError::NotActive);
        }

        let gateway = TokenGateway::new(self.token_config.as_ref(), ledger)?;
        let weight = gateway.voting_power_of(caller)?;
        if weight.is_zero() {
            return Err(GovernanceError::NotTokenHolder);
        }

        let choice = VoteChoice::parse(choice)?;
        let key = (id, caller.clone());
        if self.votes.contains_key(&key) {
            return Err(GovernanceError::AlreadyVoted);
        }

        // Stage the tally update first: if it overflows, nothing is written.
        let mut tally = self.tallies.get(&id).cloned().unwrap_or_default();
        tally.accumulate(choice, weight)?;

        self.votes.insert(key, TokenVote { choice, weight });
        self.tallies.insert(id, tally);
        debug!(proposal = id, voter = %caller, ?choice, %weight, "vote recorded");
        Ok(())
    }

    /// A voter's recorded vote on a proposal, or `None` if they never voted.
    pub fn get_vote(&self, voter: &AccountAddress, id: ProposalId) -> Option<&TokenVote> {
        self.votes.get(&(id, voter.clone()))
    }

    // ── Notifications ────────────────────────────────────────────────────

    /// The full notification log, in operation order.
    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    /// Notifications for one proposal, in operation order.
    pub fn events_for(&self, id: ProposalId) -> Vec<&GovernanceEvent> {
        self.events
            .iter()
            .filter(|e| e.proposal_id() == id)
            .collect()
    }
}

impl GovernanceEngine {
    /// Persist all engine state through the store traits.
    pub fn save_to_store<S>(&self, store: &S) -> Result<(), GovernanceError>
    where
        S: GovernanceStore + MetaStore + ?Sized,
    {
        let config_bytes = bincode::serialize(&self.token_config)
            .map_err(|e| GovernanceError::Store(e.to_string()))?;
        store.put_meta(META_TOKEN_CONFIG, &config_bytes)?;

        store.put_meta(
            META_MIN_THRESHOLD,
            &self.minimum_threshold.raw().to_be_bytes(),
        )?;
        store.put_meta(META_LAST_PROPOSAL_ID, &self.last_id.to_be_bytes())?;

        let events_bytes = bincode::serialize(&self.events)
            .map_err(|e| GovernanceError::Store(e.to_string()))?;
        store.put_meta(META_EVENT_LOG, &events_bytes)?;

        for (id, proposal) in &self.proposals {
            let bytes = bincode::serialize(proposal)
                .map_err(|e| GovernanceError::Store(e.to_string()))?;
            store.put_proposal(*id, &bytes)?;
        }
        for ((id, voter), vote) in &self.votes {
            let bytes = bincode::serialize(vote)
                .map_err(|e| GovernanceError::Store(e.to_string()))?;
            store.put_vote(*id, voter, &bytes)?;
        }
        for (id, tally) in &self.tallies {
            let bytes = bincode::serialize(tally)
                .map_err(|e| GovernanceError::Store(e.to_string()))?;
            store.put_tally(*id, &bytes)?;
        }
        Ok(())
    }

    /// Restore an engine from a store. `owner` and `params` are
    /// construction-time configuration and are not persisted.
    pub fn load_from_store<S>(
        store: &S,
        owner: AccountAddress,
        params: GovernanceParams,
    ) -> Result<Self, GovernanceError>
    where
        S: GovernanceStore + MetaStore + ?Sized,
    {
        let token_config = match store.get_meta(META_TOKEN_CONFIG)? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Store(e.to_string()))?,
            None => None,
        };

        let minimum_threshold = match store.get_meta(META_MIN_THRESHOLD)? {
            Some(bytes) if bytes.len() == 16 => {
                let arr: [u8; 16] = bytes[..].try_into().expect("checked length");
                TokenAmount::new(u128::from_be_bytes(arr))
            }
            _ => TokenAmount::ZERO,
        };

        let last_id = match store.get_meta(META_LAST_PROPOSAL_ID)? {
            Some(bytes) if bytes.len() == 8 => {
                let arr: [u8; 8] = bytes[..].try_into().expect("checked length");
                u64::from_be_bytes(arr)
            }
            _ => 0,
        };

        let events = match store.get_meta(META_EVENT_LOG)? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Store(e.to_string()))?,
            None => Vec::new(),
        };

        let mut proposals = HashMap::new();
        for (id, bytes) in store.iter_proposals()? {
            let proposal: Proposal = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Store(e.to_string()))?;
            proposals.insert(id, proposal);
        }

        let mut votes = HashMap::new();
        for (id, voter, bytes) in store.iter_votes()? {
            let vote: TokenVote = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Store(e.to_string()))?;
            votes.insert((id, voter), vote);
        }

        let mut tallies = HashMap::new();
        for (id, bytes) in store.iter_tallies()? {
            let tally: Tally = bincode::deserialize(&bytes)
                .map_err(|e| GovernanceError::Store(e.to_string()))?;
            tallies.insert(id, tally);
        }

        Ok(Self {
            owner,
            params,
            token_config,
            minimum_threshold,
            last_id,
            proposals,
            votes,
            tallies,
            events,
        })
    }
}
