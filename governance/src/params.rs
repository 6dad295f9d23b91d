//! Engine parameters.

use agora_types::time::{DAY_SECS, HOUR_SECS};

/// Tunable rules of the proposal lifecycle.
///
/// Constructed once when the engine is created. The defaults match the
/// public contract of the engine: voting windows between 1 and 7 days, a
/// 3-hour creator cancellation grace, and a write-once token configuration.
#[derive(Clone, Debug)]
pub struct GovernanceParams {
    /// Minimum lead time of `end_time` over `now` at submission.
    /// `end_time` must be strictly greater than `now + min_voting_lead_secs`.
    pub min_voting_lead_secs: u64,

    /// Maximum lead time of `end_time` over `now` at submission (inclusive).
    pub max_voting_lead_secs: u64,

    /// How long after creation the creator may still cancel (inclusive).
    pub cancel_grace_secs: u64,

    /// Whether `set_governance_token` may overwrite an existing
    /// configuration. When `false`, a second call fails `AlreadyConfigured`.
    pub allow_token_reconfig: bool,
}

impl GovernanceParams {
    /// The public-contract defaults.
    pub fn agora_defaults() -> Self {
        Self {
            min_voting_lead_secs: DAY_SECS,
            max_voting_lead_secs: 7 * DAY_SECS,
            cancel_grace_secs: 3 * HOUR_SECS,
            allow_token_reconfig: false,
        }
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self::agora_defaults()
    }
}
