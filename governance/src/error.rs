use parcel_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("proposer holds no balance")]
    NoStake,

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting period of {requested}s exceeds the {max}s limit")]
    VotingPeriodTooLong { requested: u64, max: u64 },

    #[error("voting window has closed")]
    VotingClosed,

    #[error("account has already voted on this proposal")]
    AlreadyVoted,

    #[error("account has no voting power")]
    NoVotingPower,

    #[error("voting window is still open")]
    VotingStillOpen,

    #[error("proposal has already been executed")]
    AlreadyExecuted,

    #[error("proposal rejected: {yes} yes <= {no} no")]
    ProposalRejected { yes: u128, no: u128 },

    #[error("quorum not met: {have_percent}% < {need_percent}%")]
    QuorumNotMet { have_percent: u128, need_percent: u8 },

    #[error("proposal store is inconsistent: {0}")]
    InconsistentStore(String),

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}
