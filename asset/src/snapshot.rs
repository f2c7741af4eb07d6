//! State snapshots: the whole asset state at a point in the operation stream.
//!
//! Every collection is sorted before encoding, so two states that compare
//! equal always produce the same bytes and the same digest. The digest is
//! Blake2b-256 over the bincode encoding of the body and is checked on load.

use std::path::Path;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

use parcel_governance::{Proposal, ProposalStore};
use parcel_ledger::{AccessControl, Ledger, VotingPowerRegistry};
use parcel_types::{AccountId, GovernanceParams, ProposalId, Units, Weight};

use crate::asset::FractionalAsset;
use crate::error::AssetError;
use crate::metadata::AssetMetadata;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotBody {
    pub version: u32,
    pub balances: Vec<(AccountId, Units)>,
    pub total_supply: Units,
    pub powers: Vec<(AccountId, Weight)>,
    pub proposals: Vec<Proposal>,
    pub receipts: Vec<(AccountId, ProposalId)>,
    pub proposal_count: u64,
    pub params: GovernanceParams,
    pub metadata: AssetMetadata,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub body: SnapshotBody,
    pub digest: [u8; 32],
}

impl StateSnapshot {
    /// Capture the current state of `asset`.
    pub fn capture<A: AccessControl>(asset: &FractionalAsset<A>) -> Result<Self, AssetError> {
        let mut balances: Vec<_> = asset
            .ledger
            .iter()
            .filter(|(_, b)| !b.is_zero())
            .map(|(a, b)| (a.clone(), *b))
            .collect();
        balances.sort();
        let mut powers: Vec<_> = asset
            .powers
            .iter()
            .filter(|(_, w)| !w.is_zero())
            .map(|(a, w)| (a.clone(), *w))
            .collect();
        powers.sort();
        let mut receipts: Vec<_> = asset.proposals.receipts().cloned().collect();
        receipts.sort();

        let body = SnapshotBody {
            version: SNAPSHOT_VERSION,
            balances,
            total_supply: asset.ledger.total_supply(),
            powers,
            proposals: asset.proposals.iter().cloned().collect(),
            receipts,
            proposal_count: asset.proposals.proposal_count(),
            params: asset.governance.params().clone(),
            metadata: asset.metadata.clone(),
        };
        let digest = digest_of(&body)?;
        Ok(Self { body, digest })
    }

    pub fn verify(&self) -> Result<(), AssetError> {
        if digest_of(&self.body)? != self.digest {
            return Err(AssetError::Snapshot("digest mismatch".into()));
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AssetError> {
        bincode::serialize(self).map_err(|e| AssetError::Snapshot(e.to_string()))
    }

    /// Decode and verify a snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| AssetError::Snapshot(e.to_string()))?;
        if snapshot.body.version != SNAPSHOT_VERSION {
            return Err(AssetError::Snapshot(format!(
                "unsupported version {}",
                snapshot.body.version
            )));
        }
        snapshot.verify()?;
        Ok(snapshot)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn digest_hex(&self) -> String {
        self.digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

fn digest_of(body: &SnapshotBody) -> Result<[u8; 32], AssetError> {
    let encoded = bincode::serialize(body).map_err(|e| AssetError::Snapshot(e.to_string()))?;
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(&encoded);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    Ok(out)
}

impl<A: AccessControl> FractionalAsset<A> {
    /// Rebuild an asset from a verified snapshot. The identity policy is not
    /// part of the state and is supplied by the caller.
    pub fn restore(snapshot: StateSnapshot, access: A) -> Result<Self, AssetError> {
        snapshot.verify()?;
        let body = snapshot.body;
        body.params.validate()?;

        let ledger = Ledger::from_balances(body.balances)?;
        if ledger.total_supply() != body.total_supply {
            return Err(AssetError::Snapshot(format!(
                "total supply {} does not match balances {}",
                body.total_supply,
                ledger.total_supply()
            )));
        }
        let proposals = ProposalStore::restore(body.proposals, body.receipts)?;
        if proposals.proposal_count() != body.proposal_count {
            return Err(AssetError::Snapshot(format!(
                "proposal counter {} does not match {} stored proposals",
                body.proposal_count,
                proposals.proposal_count()
            )));
        }

        tracing::info!(
            supply = %ledger.total_supply(),
            proposals = proposals.proposal_count(),
            "state restored from snapshot"
        );
        Ok(Self::from_parts(
            ledger,
            VotingPowerRegistry::from_powers(body.powers)?,
            proposals,
            body.params,
            body.metadata,
            access,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use crate::error::FailureKind;
    use parcel_ledger::OwnerAdminPolicy;
    use parcel_types::Timestamp;

    fn acct(name: &str) -> AccountId {
        AccountId::new(format!("prcl_{name}"))
    }

    fn busy_asset() -> FractionalAsset {
        let config = AssetConfig {
            owner: acct("owner"),
            initial_supply: 500,
            ..Default::default()
        };
        let mut asset = FractionalAsset::genesis(&config).unwrap();
        let owner = acct("owner");
        asset.transfer(&owner, &acct("bob"), Units::new(200)).unwrap();
        asset
            .update_voting_power(&owner, &acct("bob"), Weight::new(300))
            .unwrap();
        let id = asset
            .create_proposal(&acct("bob"), "fix the gutter", 60, Timestamp::new(10))
            .unwrap();
        asset.vote(&acct("bob"), id, true, Timestamp::new(20)).unwrap();
        asset
    }

    #[test]
    fn capture_is_deterministic() {
        let asset = busy_asset();
        let a = StateSnapshot::capture(&asset).unwrap();
        let b = StateSnapshot::capture(&asset).unwrap();
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.digest_hex().len(), 64);
        assert_eq!(a.body.balances.len(), 2);
        assert_eq!(a.body.receipts, vec![(acct("bob"), ProposalId::FIRST)]);
    }

    #[test]
    fn restore_reproduces_state() {
        let asset = busy_asset();
        let snap = StateSnapshot::capture(&asset).unwrap();
        let bytes = snap.to_bytes().unwrap();
        let decoded = StateSnapshot::from_bytes(&bytes).unwrap();
        let restored =
            FractionalAsset::restore(decoded, OwnerAdminPolicy::new(acct("owner"))).unwrap();

        assert_eq!(restored.balance_of(&acct("bob")), Units::new(200));
        assert_eq!(restored.total_supply(), Units::new(500));
        assert_eq!(restored.voting_power_of(&acct("bob")), Weight::new(300));
        assert_eq!(restored.proposal_count(), 1);
        assert!(restored.has_voted(&acct("bob"), ProposalId::FIRST));
        assert_eq!(
            StateSnapshot::capture(&restored).unwrap().digest,
            snap.digest
        );
    }

    #[test]
    fn tampered_body_is_rejected() {
        let mut snap = StateSnapshot::capture(&busy_asset()).unwrap();
        snap.body.total_supply = Units::new(501);
        let bytes = snap.to_bytes().unwrap();
        let err = StateSnapshot::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Environment);
        assert!(FractionalAsset::restore(snap, OwnerAdminPolicy::new(acct("owner"))).is_err());
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        let bytes = StateSnapshot::capture(&busy_asset())
            .unwrap()
            .to_bytes()
            .unwrap();
        assert!(StateSnapshot::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn repeated_entries_are_rejected_even_with_valid_digest() {
        let owner = || OwnerAdminPolicy::new(acct("owner"));
        let snap = StateSnapshot::capture(&busy_asset()).unwrap();

        let mut powers = snap.clone();
        powers.body.powers.push((acct("bob"), Weight::new(1)));
        powers.digest = digest_of(&powers.body).unwrap();
        let err = FractionalAsset::restore(powers, owner()).err().expect("restore should fail");
        assert_eq!(err.kind(), FailureKind::Environment);

        let mut proposals = snap;
        let shadow = proposals.body.proposals[0].clone();
        proposals.body.proposals.push(shadow);
        proposals.digest = digest_of(&proposals.body).unwrap();
        let err = FractionalAsset::restore(proposals, owner()).err().expect("restore should fail");
        assert_eq!(err.kind(), FailureKind::Environment);
    }
}
