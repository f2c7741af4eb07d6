//! Balances and total supply.
//!
//! Every mutating method validates first and writes second, so a failed call
//! leaves the ledger exactly as it was. After every successful call the total
//! supply equals the sum of all balances.

use std::collections::HashMap;

use parcel_types::{AccountId, Units};

use crate::access::{AccessControl, Role};
use crate::error::LedgerError;
use crate::voting::VotingPowerRegistry;

/// A committed balance movement. Mints come from the null identity and burns
/// go to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Units,
}

/// Post-move balances computed during validation.
struct BalanceMove {
    from_after: Units,
    to_after: Units,
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    balances: HashMap<AccountId, Units>,
    total_supply: Units,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored `(account, balance)` pairs, deriving the
    /// total supply from them. Each account may appear once.
    pub fn from_balances(
        entries: impl IntoIterator<Item = (AccountId, Units)>,
    ) -> Result<Self, LedgerError> {
        let mut balances = HashMap::new();
        for (account, balance) in entries {
            if balances.contains_key(&account) {
                return Err(LedgerError::DuplicateAccount(account));
            }
            balances.insert(account, balance);
        }
        let total_supply = balances
            .values()
            .try_fold(Units::ZERO, |acc, b| acc.checked_add(*b))
            .ok_or(LedgerError::Overflow("total supply"))?;
        Ok(Self {
            balances,
            total_supply,
        })
    }

    pub fn balance_of(&self, account: &AccountId) -> Units {
        self.balances.get(account).copied().unwrap_or(Units::ZERO)
    }

    pub fn total_supply(&self) -> Units {
        self.total_supply
    }

    /// All `(account, balance)` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Units)> {
        self.balances.iter()
    }

    /// Recompute the sum of balances from scratch.
    /// Matches `total_supply()` whenever the ledger is consistent.
    pub fn sum_of_balances(&self) -> Option<Units> {
        self.balances
            .values()
            .try_fold(Units::ZERO, |acc, b| acc.checked_add(*b))
    }

    /// Move `amount` from `sender` to `to` on the sender's own authority.
    pub fn transfer(
        &mut self,
        sender: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<TransferRecord, LedgerError> {
        let plan = self.plan_move(sender, to, amount)?;
        Ok(self.commit_move(sender, to, amount, plan))
    }

    /// Transfer, optionally moving the sender's entire voting power to `to`.
    ///
    /// The power move is all-or-nothing and not proportional to `amount`.
    /// When `sender == to` the power is left untouched.
    pub fn transfer_with_voting(
        &mut self,
        powers: &mut VotingPowerRegistry,
        sender: &AccountId,
        to: &AccountId,
        amount: Units,
        move_power: bool,
    ) -> Result<TransferRecord, LedgerError> {
        let plan = self.plan_move(sender, to, amount)?;
        let power_plan = if move_power {
            powers.plan_move_all(sender, to)?
        } else {
            None
        };
        let record = self.commit_move(sender, to, amount, plan);
        if let Some(power_plan) = power_plan {
            powers.commit_move(power_plan);
        }
        Ok(record)
    }

    /// Owner-only issuance of new units to `to`.
    pub fn mint(
        &mut self,
        access: &dyn AccessControl,
        caller: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<TransferRecord, LedgerError> {
        access.require(caller, Role::Owner)?;
        if to.is_null() {
            return Err(LedgerError::InvalidRecipient);
        }
        let supply_after = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("total supply"))?;
        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("balance"))?;
        self.balances.insert(to.clone(), to_after);
        self.total_supply = supply_after;
        Ok(TransferRecord {
            from: AccountId::null(),
            to: to.clone(),
            amount,
        })
    }

    /// Owner-only destruction of `amount` units held by `from`.
    pub fn burn(
        &mut self,
        access: &dyn AccessControl,
        caller: &AccountId,
        from: &AccountId,
        amount: Units,
    ) -> Result<TransferRecord, LedgerError> {
        access.require(caller, Role::Owner)?;
        let available = self.balance_of(from);
        let from_after = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        // supply >= any single balance while the ledger is consistent
        let supply_after = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow("total supply"))?;
        self.balances.insert(from.clone(), from_after);
        self.total_supply = supply_after;
        Ok(TransferRecord {
            from: from.clone(),
            to: AccountId::null(),
            amount,
        })
    }

    /// Admin-gated move of `amount` from any holder, without the holder's
    /// consent. Any admin-flagged account may do this unconditionally.
    pub fn force_transfer(
        &mut self,
        access: &dyn AccessControl,
        caller: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<TransferRecord, LedgerError> {
        access.require(caller, Role::Admin)?;
        let plan = self.plan_move(from, to, amount)?;
        Ok(self.commit_move(from, to, amount, plan))
    }

    fn plan_move(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<BalanceMove, LedgerError> {
        if to.is_null() {
            return Err(LedgerError::InvalidRecipient);
        }
        let available = self.balance_of(from);
        let from_after = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        if from == to {
            return Ok(BalanceMove {
                from_after: available,
                to_after: available,
            });
        }
        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("balance"))?;
        Ok(BalanceMove {
            from_after,
            to_after,
        })
    }

    fn commit_move(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Units,
        plan: BalanceMove,
    ) -> TransferRecord {
        self.balances.insert(from.clone(), plan.from_after);
        self.balances.insert(to.clone(), plan.to_after);
        TransferRecord {
            from: from.clone(),
            to: to.clone(),
            amount,
        }
    }
}
