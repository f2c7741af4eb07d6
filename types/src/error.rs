//! Errors raised while constructing or validating core types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("quorum percentage {0} is above 100")]
    QuorumOutOfRange(u8),
}
