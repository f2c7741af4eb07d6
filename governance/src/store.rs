//! Proposal storage: records keyed by sequential id plus write-once vote receipts.

use std::collections::{BTreeMap, HashSet};

use parcel_types::{AccountId, ProposalId};

use crate::error::GovernanceError;
use crate::proposal::Proposal;

#[derive(Clone, Debug, Default)]
pub struct ProposalStore {
    proposals: BTreeMap<ProposalId, Proposal>,
    /// (voter, proposal) pairs that have cast a vote.
    receipts: HashSet<(AccountId, ProposalId)>,
    /// Last id handed out; 0 before the first proposal.
    proposal_count: u64,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted proposals and receipts.
    ///
    /// Ids must be unique and dense from 1, and every receipt must name a
    /// stored proposal.
    pub fn restore(
        proposals: impl IntoIterator<Item = Proposal>,
        receipts: impl IntoIterator<Item = (AccountId, ProposalId)>,
    ) -> Result<Self, GovernanceError> {
        let mut by_id = BTreeMap::new();
        for proposal in proposals {
            let id = proposal.id;
            if by_id.insert(id, proposal).is_some() {
                return Err(GovernanceError::InconsistentStore(format!(
                    "proposal {id} appears more than once"
                )));
            }
        }
        let proposals = by_id;
        for (expected, id) in (1u64..).zip(proposals.keys()) {
            if id.get() != expected {
                return Err(GovernanceError::InconsistentStore(format!(
                    "expected proposal #{expected}, found {id}"
                )));
            }
        }
        let receipts: HashSet<(AccountId, ProposalId)> = receipts.into_iter().collect();
        if let Some((voter, id)) = receipts.iter().find(|(_, id)| !proposals.contains_key(id)) {
            return Err(GovernanceError::InconsistentStore(format!(
                "receipt for {voter} names unknown proposal {id}"
            )));
        }
        let proposal_count = proposals.len() as u64;
        Ok(Self {
            proposals,
            receipts,
            proposal_count,
        })
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// The last assigned id, or 0 if no proposal exists yet.
    pub fn proposal_count(&self) -> u64 {
        self.proposal_count
    }

    pub fn has_voted(&self, voter: &AccountId, id: ProposalId) -> bool {
        self.receipts.contains(&(voter.clone(), id))
    }

    /// Proposals in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    /// All vote receipts, in no particular order.
    pub fn receipts(&self) -> impl Iterator<Item = &(AccountId, ProposalId)> {
        self.receipts.iter()
    }

    pub(crate) fn next_id(&self) -> Result<ProposalId, GovernanceError> {
        ProposalId::new(self.proposal_count)
            .next()
            .ok_or(GovernanceError::Overflow("proposal id"))
    }

    /// Store a proposal carrying the id returned by [`Self::next_id`].
    pub(crate) fn insert(&mut self, proposal: Proposal) {
        debug_assert_eq!(proposal.id.get(), self.proposal_count + 1);
        self.proposal_count = proposal.id.get();
        self.proposals.insert(proposal.id, proposal);
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        self.proposals.get_mut(&id)
    }

    pub(crate) fn record_receipt(&mut self, voter: &AccountId, id: ProposalId) {
        self.receipts.insert((voter.clone(), id));
    }
}
