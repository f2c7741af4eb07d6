//! Voting-power registry.
//!
//! Per-account governance weight, tracked separately from balances. Power
//! changes in exactly two ways: the owner overwrites an account's value, or a
//! holder moves all of their power along with a transfer
//! (see [`crate::Ledger::transfer_with_voting`]).

use std::collections::HashMap;

use parcel_types::{AccountId, Weight};

use crate::access::{AccessControl, Role};
use crate::error::LedgerError;

/// The new power value of an account after an assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUpdate {
    pub account: AccountId,
    pub power: Weight,
}

/// A validated whole-power move, ready to commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PowerMove {
    from: AccountId,
    to: AccountId,
    to_after: Weight,
}

#[derive(Clone, Debug, Default)]
pub struct VotingPowerRegistry {
    powers: HashMap<AccountId, Weight>,
}

impl VotingPowerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from stored `(account, power)` pairs. Each account
    /// may appear once.
    pub fn from_powers(
        entries: impl IntoIterator<Item = (AccountId, Weight)>,
    ) -> Result<Self, LedgerError> {
        let mut powers = HashMap::new();
        for (account, power) in entries {
            if powers.contains_key(&account) {
                return Err(LedgerError::DuplicateAccount(account));
            }
            powers.insert(account, power);
        }
        Ok(Self { powers })
    }

    pub fn power_of(&self, account: &AccountId) -> Weight {
        self.powers.get(account).copied().unwrap_or(Weight::ZERO)
    }

    /// Sum of all power values, or `None` if it does not fit in a u128.
    pub fn total_power(&self) -> Option<Weight> {
        self.powers
            .values()
            .try_fold(Weight::ZERO, |acc, w| acc.checked_add(*w))
    }

    /// All `(account, power)` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Weight)> {
        self.powers.iter()
    }

    /// Owner-only overwrite of an account's power. No conservation applies.
    pub fn set_power(
        &mut self,
        access: &dyn AccessControl,
        caller: &AccountId,
        account: &AccountId,
        power: Weight,
    ) -> Result<PowerUpdate, LedgerError> {
        access.require(caller, Role::Owner)?;
        self.powers.insert(account.clone(), power);
        Ok(PowerUpdate {
            account: account.clone(),
            power,
        })
    }

    /// Validate moving all of `from`'s power onto `to`.
    ///
    /// Returns `None` when nothing would change: a self-move, or a source
    /// with zero power.
    pub(crate) fn plan_move_all(
        &self,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<Option<PowerMove>, LedgerError> {
        let moved = self.power_of(from);
        if from == to || moved.is_zero() {
            return Ok(None);
        }
        let to_after = self
            .power_of(to)
            .checked_add(moved)
            .ok_or(LedgerError::Overflow("voting power move"))?;
        Ok(Some(PowerMove {
            from: from.clone(),
            to: to.clone(),
            to_after,
        }))
    }

    pub(crate) fn commit_move(&mut self, plan: PowerMove) {
        self.powers.insert(plan.to, plan.to_after);
        self.powers.insert(plan.from, Weight::ZERO);
    }
}
