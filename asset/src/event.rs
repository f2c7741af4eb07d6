//! Notifications emitted after committed operations.

use parcel_types::{AccountId, ProposalId, Timestamp, Units, Weight};
use serde::{Deserialize, Serialize};

/// Asset-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetEvent {
    /// Units moved between accounts. Mints come from the null identity,
    /// burns go to it.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Units,
    },
    /// The owner assigned an account's voting power.
    VotingPowerUpdated { account: AccountId, power: Weight },
    /// An account's admin flag changed.
    AdminChanged { account: AccountId, is_admin: bool },
    ProposalCreated {
        id: ProposalId,
        proposer: AccountId,
        description: String,
        deadline: Timestamp,
    },
    VoteCast {
        id: ProposalId,
        voter: AccountId,
        support: bool,
        weight: Weight,
    },
    /// A proposal passed and was marked executed. Acting on it is up to
    /// the listener.
    ProposalExecuted { id: ProposalId },
    JurisdictionChanged { jurisdiction: String },
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the committing call, in subscription order.
/// Keep handlers fast and never call back into the asset from one.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&AssetEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&AssetEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &AssetEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
