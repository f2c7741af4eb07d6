//! Descriptive metadata carried alongside the ledger.
//!
//! None of these fields affect balances or governance; they are stored and
//! handed back unchanged. Only the jurisdiction has an update operation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Legal jurisdiction the asset is held under.
    #[serde(default)]
    pub jurisdiction: String,
    /// Pointer to an external title or land registry record.
    #[serde(default)]
    pub registry: Option<String>,
    /// Identifier of the underlying property.
    #[serde(default)]
    pub property_id: String,
}
