//! Governance engine: create, vote, execute.
//!
//! The engine holds only parameters. Every call receives the state it reads
//! and writes, validates all preconditions first, and mutates only once they
//! hold, so a rejected call leaves the store untouched. It reads the ledger
//! (balances, total supply) and the power registry but never writes them.

use parcel_ledger::{Ledger, VotingPowerRegistry};
use parcel_types::{AccountId, GovernanceParams, ProposalId, Timestamp, Units, Weight};

use crate::error::GovernanceError;
use crate::proposal::Proposal;
use crate::store::ProposalStore;

/// A committed vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteRecord {
    pub proposal: ProposalId,
    pub voter: AccountId,
    pub support: bool,
    pub weight: Weight,
}

/// `floor(yes * 100 / supply)`, or `None` when supply is zero.
///
/// Voting power is independent of balance, so the result may exceed 100.
/// Computed exactly without widening: `yes = q * supply + r` gives
/// `100 * q + floor(100 * r / supply)`, and the second term is accumulated
/// modulo `supply` so `100 * r` never has to fit in a u128. Only when
/// `100 * q` itself overflows does the result saturate at `u128::MAX`, and
/// then the exact value is at least that large.
pub fn turnout_percent(yes: Weight, supply: Units) -> Option<u128> {
    if supply.is_zero() {
        return None;
    }
    let (yes, supply) = (yes.raw(), supply.raw());
    let whole = yes / supply;
    let rem = yes % supply;

    // acc < supply throughout
    let mut frac = 0u128;
    let mut acc = 0u128;
    for _ in 0..100 {
        let gap = supply - acc;
        if rem >= gap {
            acc = rem - gap;
            frac += 1;
        } else {
            acc += rem;
        }
    }
    Some(
        whole
            .checked_mul(100)
            .and_then(|scaled| scaled.checked_add(frac))
            .unwrap_or(u128::MAX),
    )
}

#[derive(Clone, Debug, Default)]
pub struct GovernanceEngine {
    params: GovernanceParams,
}

impl GovernanceEngine {
    pub fn new(params: GovernanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Open a new proposal. The proposer must hold a non-zero balance.
    pub fn create_proposal(
        &self,
        store: &mut ProposalStore,
        ledger: &Ledger,
        proposer: &AccountId,
        description: impl Into<String>,
        voting_period_secs: u64,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if ledger.balance_of(proposer).is_zero() {
            return Err(GovernanceError::NoStake);
        }
        if !self.params.allows_period(voting_period_secs) {
            return Err(GovernanceError::VotingPeriodTooLong {
                requested: voting_period_secs,
                max: self.params.max_voting_period_secs,
            });
        }
        let vote_deadline = now
            .checked_add_secs(voting_period_secs)
            .ok_or(GovernanceError::Overflow("vote deadline"))?;
        let id = store.next_id()?;

        store.insert(Proposal {
            id,
            proposer: proposer.clone(),
            description: description.into(),
            vote_deadline,
            yes_votes: Weight::ZERO,
            no_votes: Weight::ZERO,
            executed: false,
        });
        tracing::info!(
            proposal = %id,
            proposer = %proposer,
            deadline = %vote_deadline,
            "proposal created"
        );
        Ok(id)
    }

    /// Cast a weighted vote while the proposal is open.
    ///
    /// The weight is the voter's registry power at this moment; later power
    /// changes do not revise it.
    pub fn cast_vote(
        &self,
        store: &mut ProposalStore,
        powers: &VotingPowerRegistry,
        voter: &AccountId,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<VoteRecord, GovernanceError> {
        let proposal = store
            .get(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if !proposal.is_open(now) {
            return Err(GovernanceError::VotingClosed);
        }
        if store.has_voted(voter, id) {
            return Err(GovernanceError::AlreadyVoted);
        }
        let weight = powers.power_of(voter);
        if weight.is_zero() {
            return Err(GovernanceError::NoVotingPower);
        }
        let tally = if support {
            proposal.yes_votes
        } else {
            proposal.no_votes
        };
        let tally_after = tally
            .checked_add(weight)
            .ok_or(GovernanceError::Overflow("vote tally"))?;

        let proposal = store
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if support {
            proposal.yes_votes = tally_after;
        } else {
            proposal.no_votes = tally_after;
        }
        store.record_receipt(voter, id);
        tracing::debug!(
            proposal = %id,
            voter = %voter,
            support,
            weight = weight.raw(),
            "vote cast"
        );

        Ok(VoteRecord {
            proposal: id,
            voter: voter.clone(),
            support,
            weight,
        })
    }

    /// Mark a closed proposal executed if it carried a strict majority and
    /// met quorum. A tie is a rejection. Zero supply never meets quorum.
    pub fn execute_proposal(
        &self,
        store: &mut ProposalStore,
        ledger: &Ledger,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = store
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if !proposal.vote_deadline.has_passed(now) {
            return Err(GovernanceError::VotingStillOpen);
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        if proposal.yes_votes <= proposal.no_votes {
            return Err(GovernanceError::ProposalRejected {
                yes: proposal.yes_votes.raw(),
                no: proposal.no_votes.raw(),
            });
        }
        let need_percent = self.params.quorum_percent;
        let turnout = turnout_percent(proposal.yes_votes, ledger.total_supply());
        let have_percent = turnout.unwrap_or(0);
        if turnout.is_none() || have_percent < u128::from(need_percent) {
            return Err(GovernanceError::QuorumNotMet {
                have_percent,
                need_percent,
            });
        }

        proposal.executed = true;
        tracing::info!(
            proposal = %id,
            yes = proposal.yes_votes.raw(),
            no = proposal.no_votes.raw(),
            turnout_percent = %have_percent,
            "proposal executed"
        );
        Ok(())
    }
}
