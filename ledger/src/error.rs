use parcel_types::AccountId;
use thiserror::Error;

use crate::access::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("recipient is the null identity")]
    InvalidRecipient,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("{caller} is not authorized as {role}")]
    Unauthorized { caller: AccountId, role: Role },

    #[error("{0} appears more than once")]
    DuplicateAccount(AccountId),

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}
