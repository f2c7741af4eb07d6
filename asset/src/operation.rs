//! Serialized operations, for replaying an ordered stream against an asset.
//!
//! One [`Envelope`] per line of JSON:
//!
//! ```json
//! {"caller":"prcl_alice","now":1700000000,"op":{"transfer":{"to":"prcl_bob","amount":10}}}
//! ```

use parcel_ledger::AccessControl;
use parcel_types::{AccountId, ProposalId, Timestamp, Units, Weight};
use serde::{Deserialize, Serialize};

use crate::asset::FractionalAsset;
use crate::error::AssetError;

/// One public operation with its arguments. The caller and time travel in
/// the enclosing [`Envelope`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Transfer {
        to: AccountId,
        amount: Units,
    },
    TransferWithVoting {
        to: AccountId,
        amount: Units,
        move_power: bool,
    },
    UpdateVotingPower {
        account: AccountId,
        power: Weight,
    },
    SetAdmin {
        account: AccountId,
        is_admin: bool,
    },
    Mint {
        to: AccountId,
        amount: Units,
    },
    Burn {
        from: AccountId,
        amount: Units,
    },
    ForceTransfer {
        from: AccountId,
        to: AccountId,
        amount: Units,
    },
    CreateProposal {
        description: String,
        voting_period_secs: u64,
    },
    Vote {
        id: ProposalId,
        support: bool,
    },
    ExecuteProposal {
        id: ProposalId,
    },
    ChangeJurisdiction {
        jurisdiction: String,
    },
}

impl Operation {
    /// Short stable name, used in logs and replay summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::TransferWithVoting { .. } => "transfer_with_voting",
            Self::UpdateVotingPower { .. } => "update_voting_power",
            Self::SetAdmin { .. } => "set_admin",
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::ForceTransfer { .. } => "force_transfer",
            Self::CreateProposal { .. } => "create_proposal",
            Self::Vote { .. } => "vote",
            Self::ExecuteProposal { .. } => "execute_proposal",
            Self::ChangeJurisdiction { .. } => "change_jurisdiction",
        }
    }
}

/// An operation as delivered by the environment: who called it, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub caller: AccountId,
    pub now: Timestamp,
    pub op: Operation,
}

impl Envelope {
    /// Parse one JSON-encoded envelope.
    pub fn parse_line(line: &str) -> Result<Self, AssetError> {
        serde_json::from_str(line.trim())
            .map_err(|e| AssetError::Decode(e.to_string()))
    }

    pub fn to_line(&self) -> Result<String, AssetError> {
        serde_json::to_string(self).map_err(|e| AssetError::Decode(e.to_string()))
    }
}

/// What a committed operation returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationOutcome {
    Done,
    Transferred(bool),
    ProposalCreated(ProposalId),
}

impl<A: AccessControl> FractionalAsset<A> {
    /// Dispatch one enveloped operation.
    pub fn apply(&mut self, envelope: &Envelope) -> Result<OperationOutcome, AssetError> {
        let caller = &envelope.caller;
        let now = envelope.now;
        match &envelope.op {
            Operation::Transfer { to, amount } => self
                .transfer(caller, to, *amount)
                .map(OperationOutcome::Transferred),
            Operation::TransferWithVoting {
                to,
                amount,
                move_power,
            } => self
                .transfer_with_voting(caller, to, *amount, *move_power)
                .map(OperationOutcome::Transferred),
            Operation::UpdateVotingPower { account, power } => self
                .update_voting_power(caller, account, *power)
                .map(|()| OperationOutcome::Done),
            Operation::SetAdmin { account, is_admin } => self
                .set_admin(caller, account, *is_admin)
                .map(|()| OperationOutcome::Done),
            Operation::Mint { to, amount } => self
                .mint(caller, to, *amount)
                .map(|()| OperationOutcome::Done),
            Operation::Burn { from, amount } => self
                .burn(caller, from, *amount)
                .map(|()| OperationOutcome::Done),
            Operation::ForceTransfer { from, to, amount } => self
                .force_transfer(caller, from, to, *amount)
                .map(|()| OperationOutcome::Done),
            Operation::CreateProposal {
                description,
                voting_period_secs,
            } => self
                .create_proposal(caller, description.as_str(), *voting_period_secs, now)
                .map(OperationOutcome::ProposalCreated),
            Operation::Vote { id, support } => self
                .vote(caller, *id, *support, now)
                .map(|()| OperationOutcome::Done),
            Operation::ExecuteProposal { id } => self
                .execute_proposal(caller, *id, now)
                .map(|()| OperationOutcome::Done),
            Operation::ChangeJurisdiction { jurisdiction } => self
                .change_jurisdiction(caller, jurisdiction.as_str())
                .map(|()| OperationOutcome::Done),
        }
    }
}
