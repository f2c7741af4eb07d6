//! Governance proposals and their lifecycle.

use parcel_types::{AccountId, ProposalId, Timestamp, Weight};
use serde::{Deserialize, Serialize};

/// Where a proposal sits in its lifecycle at a given time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes: `now <= vote_deadline`.
    Open,
    /// Deadline passed, not yet executed.
    ClosedPending,
    /// Executed. Terminal.
    Executed,
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: AccountId,
    pub description: String,
    /// Last instant at which votes are accepted.
    pub vote_deadline: Timestamp,
    pub yes_votes: Weight,
    pub no_votes: Weight,
    /// Flips false → true once, on execution.
    pub executed: bool,
}

impl Proposal {
    pub fn status(&self, now: Timestamp) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if self.vote_deadline.has_passed(now) {
            ProposalStatus::ClosedPending
        } else {
            ProposalStatus::Open
        }
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        !self.vote_deadline.has_passed(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(deadline: u64) -> Proposal {
        Proposal {
            id: ProposalId::FIRST,
            proposer: AccountId::new("prcl_alice"),
            description: "raise rent".into(),
            vote_deadline: Timestamp::new(deadline),
            yes_votes: Weight::ZERO,
            no_votes: Weight::ZERO,
            executed: false,
        }
    }

    #[test]
    fn open_through_the_deadline_inclusive() {
        let p = proposal(100);
        assert_eq!(p.status(Timestamp::new(99)), ProposalStatus::Open);
        assert_eq!(p.status(Timestamp::new(100)), ProposalStatus::Open);
        assert_eq!(p.status(Timestamp::new(101)), ProposalStatus::ClosedPending);
    }

    #[test]
    fn executed_is_terminal() {
        let mut p = proposal(100);
        p.executed = true;
        assert_eq!(p.status(Timestamp::new(5_000)), ProposalStatus::Executed);
    }
}
