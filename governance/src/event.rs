//! Governance notifications.
//!
//! Appended to an ordered in-engine log as transitions happen; external
//! observers read the log, the engine never consumes it.

use agora_types::{AccountAddress, ProposalId};
use serde::{Deserialize, Serialize};

/// A notification emitted by a successful state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    ProposalSubmitted {
        id: ProposalId,
        creator: AccountAddress,
    },
    ProposalCanceled {
        id: ProposalId,
    },
    ProposalClosed {
        id: ProposalId,
    },
}

impl GovernanceEvent {
    /// The proposal this event indexes on.
    pub fn proposal_id(&self) -> ProposalId {
        match self {
            Self::ProposalSubmitted { id, .. } => *id,
            Self::ProposalCanceled { id } => *id,
            Self::ProposalClosed { id } => *id,
        }
    }
}
