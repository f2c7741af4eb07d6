#![no_main]

use libfuzzer_sys::fuzz_target;

use parcel_asset::{FractionalAsset, StateSnapshot};
use parcel_ledger::OwnerAdminPolicy;
use parcel_types::AccountId;

// Decoding arbitrary bytes as a snapshot must never panic. Anything that
// decodes has a valid digest, and restoring it either fails cleanly or
// yields a consistent ledger.
fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = StateSnapshot::from_bytes(data) else {
        return;
    };
    assert!(snapshot.verify().is_ok());
    let policy = OwnerAdminPolicy::new(AccountId::new("prcl_owner"));
    if let Ok(asset) = FractionalAsset::restore(snapshot, policy) {
        assert!(asset.is_consistent());
    }
});
