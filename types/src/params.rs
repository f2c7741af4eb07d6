//! Governance parameters.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Tunable governance thresholds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum yes-vote weight, as a truncated percentage of total supply,
    /// required for a proposal to execute.
    #[serde(default = "default_quorum_percent")]
    pub quorum_percent: u8,

    /// Upper bound on the voting period a proposer may request, in seconds.
    /// Zero means unlimited.
    #[serde(default)]
    pub max_voting_period_secs: u64,
}

fn default_quorum_percent() -> u8 {
    50
}

impl GovernanceParams {
    /// Check the parameters are internally consistent.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.quorum_percent > 100 {
            return Err(TypesError::QuorumOutOfRange(self.quorum_percent));
        }
        Ok(())
    }

    /// Whether a requested voting period is within the configured cap.
    pub fn allows_period(&self, secs: u64) -> bool {
        self.max_voting_period_secs == 0 || secs <= self.max_voting_period_secs
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            quorum_percent: default_quorum_percent(),
            max_voting_period_secs: 0,
        }
    }
}
