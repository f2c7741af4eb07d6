//! Holder governance for a fractional asset.
//!
//! Proposal lifecycle: Open (until the deadline, inclusive) → Closed-Pending
//! (deadline passed) → Executed (terminal). There is no cancel, amend or
//! re-open.
//!
//! Any holder with a non-zero balance may propose. Votes are weighted by the
//! voter's registry power at cast time, one vote per account per proposal.
//! Execution needs a strict yes majority and a yes turnout of at least the
//! quorum percentage of total supply, computed with truncating division.
//! Executing only flips the `executed` flag; what a passed proposal does is
//! left to whoever observes the execution.

pub mod engine;
pub mod error;
pub mod proposal;
pub mod store;

pub use engine::{turnout_percent, GovernanceEngine, VoteRecord};
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalStatus};
pub use store::ProposalStore;
