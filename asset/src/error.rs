use parcel_governance::GovernanceError;
use parcel_ledger::LedgerError;
use parcel_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("invalid value: {0}")]
    Types(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("malformed operation: {0}")]
    Decode(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The flat failure taxonomy callers match on, independent of which
/// component detected the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidRecipient,
    InsufficientBalance,
    Unauthorized,
    NoStake,
    VotingClosed,
    AlreadyVoted,
    NoVotingPower,
    VotingStillOpen,
    AlreadyExecuted,
    ProposalRejected,
    QuorumNotMet,
    ProposalNotFound,
    InvalidInput,
    Overflow,
    Environment,
}

impl AssetError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Ledger(e) => match e {
                LedgerError::InvalidRecipient => FailureKind::InvalidRecipient,
                LedgerError::InsufficientBalance { .. } => FailureKind::InsufficientBalance,
                LedgerError::Unauthorized { .. } => FailureKind::Unauthorized,
                LedgerError::DuplicateAccount(_) => FailureKind::Environment,
                LedgerError::Overflow(_) => FailureKind::Overflow,
            },
            Self::Governance(e) => match e {
                GovernanceError::NoStake => FailureKind::NoStake,
                GovernanceError::ProposalNotFound(_) => FailureKind::ProposalNotFound,
                GovernanceError::VotingPeriodTooLong { .. } => FailureKind::InvalidInput,
                GovernanceError::VotingClosed => FailureKind::VotingClosed,
                GovernanceError::AlreadyVoted => FailureKind::AlreadyVoted,
                GovernanceError::NoVotingPower => FailureKind::NoVotingPower,
                GovernanceError::VotingStillOpen => FailureKind::VotingStillOpen,
                GovernanceError::AlreadyExecuted => FailureKind::AlreadyExecuted,
                GovernanceError::ProposalRejected { .. } => FailureKind::ProposalRejected,
                GovernanceError::QuorumNotMet { .. } => FailureKind::QuorumNotMet,
                GovernanceError::InconsistentStore(_) => FailureKind::Environment,
                GovernanceError::Overflow(_) => FailureKind::Overflow,
            },
            Self::Types(_) | Self::Decode(_) => FailureKind::InvalidInput,
            Self::Config(_) | Self::Snapshot(_) | Self::Io(_) => FailureKind::Environment,
        }
    }
}
