//! Asset configuration with TOML file support.

use serde::{Deserialize, Serialize};

use parcel_types::{AccountId, GovernanceParams};

use crate::error::AssetError;
use crate::metadata::AssetMetadata;

/// Genesis and runtime configuration for a fractional asset.
///
/// Can be loaded from a TOML file via [`AssetConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Initial owner: receives the genesis supply and the admin flag.
    #[serde(default = "default_owner")]
    pub owner: AccountId,

    /// Units minted to the owner at genesis.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub governance: GovernanceParams,

    #[serde(default)]
    pub metadata: AssetMetadata,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_owner() -> AccountId {
    AccountId::new("prcl_owner")
}

fn default_initial_supply() -> u64 {
    1_000_000
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AssetConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AssetError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AssetError> {
        let config: Self = toml::from_str(s).map_err(|e| AssetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, AssetError> {
        toml::to_string_pretty(self).map_err(|e| AssetError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.owner.is_null() {
            return Err(AssetError::Config("owner must not be the null identity".into()));
        }
        self.governance.validate()?;
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            initial_supply: default_initial_supply(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            governance: GovernanceParams::default(),
            metadata: AssetMetadata::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = AssetConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = AssetConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = AssetConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.owner, AccountId::new("prcl_owner"));
        assert_eq!(config.initial_supply, 1_000_000);
        assert_eq!(config.governance.quorum_percent, 50);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            owner = "prcl_landlord"
            initial_supply = 1000

            [governance]
            quorum_percent = 66

            [metadata]
            jurisdiction = "NL"
            property_id = "parcel-17"
        "#;
        let config = AssetConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.owner, AccountId::new("prcl_landlord"));
        assert_eq!(config.initial_supply, 1000);
        assert_eq!(config.governance.quorum_percent, 66);
        assert_eq!(config.governance.max_voting_period_secs, 0);
        assert_eq!(config.metadata.jurisdiction, "NL");
        assert_eq!(config.metadata.registry, None);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_owner = AssetConfig::from_toml_str(r#"owner = "landlord""#);
        assert!(matches!(bad_owner, Err(AssetError::Config(_))));

        let null_owner = AssetConfig::from_toml_str(r#"owner = "prcl_0000""#);
        assert!(matches!(null_owner, Err(AssetError::Config(_))));

        let quorum = AssetConfig::from_toml_str("[governance]\nquorum_percent = 150");
        assert_eq!(quorum.unwrap_err().kind(), FailureKind::InvalidInput);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = AssetConfig::from_toml_file("/nonexistent/parcel.toml");
        assert!(matches!(result, Err(AssetError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcel.toml");
        std::fs::write(&path, "initial_supply = 42\n").unwrap();
        let config = AssetConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.initial_supply, 42);
    }
}
