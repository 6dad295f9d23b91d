use agora_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("caller is not the administrative identity")]
    NotOwner,

    #[error("governance token is already configured")]
    AlreadyConfigured,

    #[error("unrecognized token kind: {0}")]
    InvalidTokenKind(String),

    #[error("minimum threshold must be strictly positive")]
    InvalidThreshold,

    #[error("only a direct account may call this, not a program")]
    OnlyDirectCaller,

    #[error("end time must fall between {min_secs}s and {max_secs}s after now")]
    InvalidEndTime { min_secs: u64, max_secs: u64 },

    #[error("no governance token has been configured")]
    TokenNotConfigured,

    #[error("submission threshold not met: have {have}, need {need}")]
    ThresholdNotMet { have: u128, need: u128 },

    #[error("proposal {0} not found")]
    UnknownProposal(ProposalId),

    #[error("only the creator may cancel a proposal")]
    NotCreator,

    #[error("proposal is not active")]
    NotActive,

    #[error("the cancellation grace window has expired")]
    GraceExpired,

    #[error("voting end time has not been reached yet")]
    EndTimeNotReached,

    #[error("caller holds no governance tokens")]
    NotTokenHolder,

    #[error("unrecognized vote choice: {0}")]
    InvalidChoice(String),

    #[error("caller has already voted on this proposal")]
    AlreadyVoted,

    #[error("tally arithmetic overflow")]
    Overflow,

    #[error("token ledger error: {0}")]
    Ledger(String),

    #[error("storage error: {0}")]
    Store(String),
}

impl From<agora_store::StoreError> for GovernanceError {
    fn from(e: agora_store::StoreError) -> Self {
        GovernanceError::Store(e.to_string())
    }
}
