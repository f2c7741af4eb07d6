//! Authorization capability.
//!
//! Who the owner is and which accounts carry the admin flag is an external
//! concern. The ledger and governance entry points only ask the two
//! predicates on [`AccessControl`]; [`OwnerAdminPolicy`] is the default
//! single-owner implementation used at genesis.

use std::collections::BTreeSet;
use std::fmt;

use parcel_types::AccountId;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// The authority an entry point requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The single owning identity (mint, burn, power assignment, admin flags).
    Owner,
    /// Any admin-flagged account (forced transfers).
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Capability check supplied by the identity collaborator.
pub trait AccessControl {
    fn is_owner(&self, caller: &AccountId) -> bool;

    fn is_admin(&self, caller: &AccountId) -> bool;

    /// Record an admin flag change. Called only after the core has checked
    /// that the requester is the owner.
    fn set_admin(&mut self, account: &AccountId, is_admin: bool);

    /// Fail with `Unauthorized` unless `caller` holds `role`.
    fn require(&self, caller: &AccountId, role: Role) -> Result<(), LedgerError> {
        let granted = match role {
            Role::Owner => self.is_owner(caller),
            Role::Admin => self.is_admin(caller),
        };
        if granted {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: caller.clone(),
                role,
            })
        }
    }
}

/// A single owner plus a set of admin-flagged accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerAdminPolicy {
    owner: AccountId,
    admins: BTreeSet<AccountId>,
}

impl OwnerAdminPolicy {
    /// A policy owned by `owner` with no admin flags set.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            admins: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Hand ownership to another identity. Admin flags are left untouched.
    pub fn transfer_ownership(&mut self, new_owner: AccountId) {
        self.owner = new_owner;
    }

    pub fn admins(&self) -> impl Iterator<Item = &AccountId> {
        self.admins.iter()
    }
}

impl AccessControl for OwnerAdminPolicy {
    fn is_owner(&self, caller: &AccountId) -> bool {
        &self.owner == caller
    }

    fn is_admin(&self, caller: &AccountId) -> bool {
        self.admins.contains(caller)
    }

    fn set_admin(&mut self, account: &AccountId, is_admin: bool) {
        if is_admin {
            self.admins.insert(account.clone());
        } else {
            self.admins.remove(account);
        }
    }
}
