//! A fractionally owned asset: one authoritative state.
//!
//! [`FractionalAsset`] owns the ledger, the voting-power registry, the
//! proposal store and the metadata, and exposes every public operation as a
//! single all-or-nothing step:
//! - Validates, then mutates; a failed operation changes nothing
//! - Emits [`AssetEvent`]s synchronously after commit, in commit order
//! - Consults an injected [`AccessControl`](parcel_ledger::AccessControl)
//!   for owner and admin checks
//!
//! Operations arrive already ordered by the surrounding environment, either
//! as direct method calls or as an [`Envelope`] stream passed to
//! [`FractionalAsset::apply`].

pub mod asset;
pub mod config;
pub mod error;
pub mod event;
pub mod metadata;
pub mod operation;
pub mod snapshot;

pub use asset::FractionalAsset;
pub use config::AssetConfig;
pub use error::{AssetError, FailureKind};
pub use event::{AssetEvent, EventBus};
pub use metadata::AssetMetadata;
pub use operation::{Envelope, Operation, OperationOutcome};
pub use snapshot::{SnapshotBody, StateSnapshot};
