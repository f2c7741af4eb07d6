//! Fundamental types for the Parcel ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identities, balance and voting-power amounts, proposal ids, timestamps,
//! and the governance parameters.

pub mod address;
pub mod amount;
pub mod error;
pub mod id;
pub mod params;
pub mod time;

pub use address::AccountId;
pub use amount::{Units, Weight};
pub use error::TypesError;
pub use id::ProposalId;
pub use params::GovernanceParams;
pub use time::Timestamp;
