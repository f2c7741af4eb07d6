//! Fractional ownership ledger.
//!
//! Holds per-account balances and the total supply, plus the voting-power
//! registry that governance weights votes with. Balance and voting power are
//! independent: they only interact when a holder explicitly moves power along
//! with a transfer.
//!
//! Authorization is never decided here. Gated entry points take an
//! [`AccessControl`] capability supplied by the caller and only query it.

pub mod access;
pub mod error;
pub mod ledger;
pub mod voting;

pub use access::{AccessControl, OwnerAdminPolicy, Role};
pub use error::LedgerError;
pub use ledger::{Ledger, TransferRecord};
pub use voting::{PowerUpdate, VotingPowerRegistry};
