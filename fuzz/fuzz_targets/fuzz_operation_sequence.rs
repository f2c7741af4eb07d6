#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use parcel_asset::{AssetConfig, FractionalAsset};
use parcel_types::{AccountId, ProposalId, Timestamp, Units, Weight};

const ACCOUNTS: [&str; 4] = ["prcl_owner", "prcl_alice", "prcl_bob", "prcl_carol"];

#[derive(Arbitrary, Debug)]
enum Step {
    Transfer { from: u8, to: u8, amount: u64 },
    TransferWithVoting { from: u8, to: u8, amount: u64, move_power: bool },
    SetPower { account: u8, power: u64 },
    Mint { to: u8, amount: u64 },
    Burn { from: u8, amount: u64 },
    ForceTransfer { from: u8, to: u8, amount: u64 },
    Propose { by: u8, period: u16 },
    Vote { by: u8, id: u8, support: bool },
    Execute { id: u8 },
    Tick { secs: u16 },
}

fn account(i: u8) -> AccountId {
    AccountId::new(ACCOUNTS[usize::from(i) % ACCOUNTS.len()])
}

// Any sequence of operations, accepted or rejected, must leave total supply
// equal to the sum of balances and never panic.
fuzz_target!(|steps: Vec<Step>| {
    let config = AssetConfig {
        owner: account(0),
        initial_supply: 10_000,
        ..Default::default()
    };
    let Ok(mut asset) = FractionalAsset::genesis(&config) else {
        return;
    };
    let owner = account(0);
    let mut now = Timestamp::new(0);

    for step in steps {
        let _ = match step {
            Step::Transfer { from, to, amount } => asset
                .transfer(&account(from), &account(to), Units::from(u128::from(amount)))
                .map(|_| ()),
            Step::TransferWithVoting { from, to, amount, move_power } => asset
                .transfer_with_voting(
                    &account(from),
                    &account(to),
                    Units::from(u128::from(amount)),
                    move_power,
                )
                .map(|_| ()),
            Step::SetPower { account: a, power } => {
                asset.update_voting_power(&owner, &account(a), Weight::from(u128::from(power)))
            }
            Step::Mint { to, amount } => {
                asset.mint(&owner, &account(to), Units::from(u128::from(amount)))
            }
            Step::Burn { from, amount } => {
                asset.burn(&owner, &account(from), Units::from(u128::from(amount)))
            }
            Step::ForceTransfer { from, to, amount } => asset.force_transfer(
                &owner,
                &account(from),
                &account(to),
                Units::from(u128::from(amount)),
            ),
            Step::Propose { by, period } => asset
                .create_proposal(&account(by), "fuzz", u64::from(period), now)
                .map(|_| ()),
            Step::Vote { by, id, support } => {
                asset.vote(&account(by), ProposalId::new(u64::from(id)), support, now)
            }
            Step::Execute { id } => {
                asset.execute_proposal(&owner, ProposalId::new(u64::from(id)), now)
            }
            Step::Tick { secs } => {
                now = Timestamp::new(now.as_secs() + u64::from(secs));
                Ok(())
            }
        };
        assert!(asset.is_consistent());
    }
});
