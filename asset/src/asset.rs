//! The fractional asset state context.

use parcel_governance::{GovernanceEngine, Proposal, ProposalStatus, ProposalStore};
use parcel_ledger::{
    AccessControl, Ledger, OwnerAdminPolicy, Role, TransferRecord, VotingPowerRegistry,
};
use parcel_types::{AccountId, GovernanceParams, ProposalId, Timestamp, Units, Weight};
use parcel_utils::StatsCounter;

use crate::config::AssetConfig;
use crate::error::AssetError;
use crate::event::{AssetEvent, EventBus};
use crate::metadata::AssetMetadata;

pub(crate) const OPS_COMMITTED: &str = "ops_committed";
pub(crate) const OPS_REJECTED: &str = "ops_rejected";

/// The single authoritative state of one fractionally owned asset.
///
/// Every operation takes `&mut self`, so operations are applied one at a
/// time in the order the caller issues them. Each one either commits fully
/// and then notifies listeners, or fails without touching any state.
pub struct FractionalAsset<A: AccessControl = OwnerAdminPolicy> {
    pub(crate) ledger: Ledger,
    pub(crate) powers: VotingPowerRegistry,
    pub(crate) proposals: ProposalStore,
    pub(crate) governance: GovernanceEngine,
    pub(crate) metadata: AssetMetadata,
    access: A,
    events: EventBus,
    stats: StatsCounter,
}

impl FractionalAsset<OwnerAdminPolicy> {
    /// Build the genesis state with the default single-owner policy.
    pub fn genesis(config: &AssetConfig) -> Result<Self, AssetError> {
        Self::genesis_with(config, OwnerAdminPolicy::new(config.owner.clone()))
    }
}

impl<A: AccessControl> FractionalAsset<A> {
    /// Build the genesis state: the configured owner is flagged admin and
    /// receives the initial supply. `access` must recognise that owner.
    pub fn genesis_with(config: &AssetConfig, mut access: A) -> Result<Self, AssetError> {
        config.validate()?;
        access.require(&config.owner, Role::Owner)?;
        access.set_admin(&config.owner, true);

        let mut asset = Self::from_parts(
            Ledger::new(),
            VotingPowerRegistry::new(),
            ProposalStore::new(),
            config.governance.clone(),
            config.metadata.clone(),
            access,
        );
        if config.initial_supply > 0 {
            asset.ledger.mint(
                &asset.access,
                &config.owner,
                &config.owner,
                Units::new(u128::from(config.initial_supply)),
            )?;
        }
        tracing::info!(
            owner = %config.owner,
            supply = config.initial_supply,
            "genesis state created"
        );
        Ok(asset)
    }

    pub(crate) fn from_parts(
        ledger: Ledger,
        powers: VotingPowerRegistry,
        proposals: ProposalStore,
        params: GovernanceParams,
        metadata: AssetMetadata,
        access: A,
    ) -> Self {
        Self {
            ledger,
            powers,
            proposals,
            governance: GovernanceEngine::new(params),
            metadata,
            access,
            events: EventBus::new(),
            stats: StatsCounter::new(&[OPS_COMMITTED, OPS_REJECTED]),
        }
    }

    /// Register a listener for events emitted after each committed operation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&AssetEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Ledger operations ──────────────────────────────────────────────

    /// Move `amount` of the caller's balance to `to`.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<bool, AssetError> {
        let result = self
            .ledger
            .transfer(caller, to, amount)
            .map(|record| (true, vec![transfer_event(record)]))
            .map_err(AssetError::from);
        self.finish("transfer", caller, result)
    }

    /// Transfer, and if `move_power` is set also hand the caller's entire
    /// voting power to `to`. A self-transfer never changes power.
    pub fn transfer_with_voting(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: Units,
        move_power: bool,
    ) -> Result<bool, AssetError> {
        let result = self
            .ledger
            .transfer_with_voting(&mut self.powers, caller, to, amount, move_power)
            .map(|record| (true, vec![transfer_event(record)]))
            .map_err(AssetError::from);
        self.finish("transfer_with_voting", caller, result)
    }

    pub fn mint(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<(), AssetError> {
        let result = self
            .ledger
            .mint(&self.access, caller, to, amount)
            .map(|record| ((), vec![transfer_event(record)]))
            .map_err(AssetError::from);
        self.finish("mint", caller, result)
    }

    pub fn burn(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        amount: Units,
    ) -> Result<(), AssetError> {
        let result = self
            .ledger
            .burn(&self.access, caller, from, amount)
            .map(|record| ((), vec![transfer_event(record)]))
            .map_err(AssetError::from);
        self.finish("burn", caller, result)
    }

    /// Admin move of another holder's units, for dispute remediation.
    ///
    /// Any admin-flagged account can move any balance; there is no second
    /// approval. Every committed call is logged at `warn`.
    pub fn force_transfer(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Units,
    ) -> Result<(), AssetError> {
        let result = self
            .ledger
            .force_transfer(&self.access, caller, from, to, amount)
            .map(|record| ((), vec![transfer_event(record)]))
            .map_err(AssetError::from);
        if result.is_ok() {
            tracing::warn!(
                admin = %caller,
                from = %from,
                to = %to,
                amount = %amount,
                "forced transfer"
            );
        }
        self.finish("force_transfer", caller, result)
    }

    // ── Administrative operations ──────────────────────────────────────

    /// Owner-only overwrite of an account's voting power.
    pub fn update_voting_power(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        power: Weight,
    ) -> Result<(), AssetError> {
        let result = self
            .powers
            .set_power(&self.access, caller, account, power)
            .map(|update| {
                let event = AssetEvent::VotingPowerUpdated {
                    account: update.account,
                    power: update.power,
                };
                ((), vec![event])
            })
            .map_err(AssetError::from);
        self.finish("update_voting_power", caller, result)
    }

    /// Owner-only change of an account's admin flag.
    pub fn set_admin(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        is_admin: bool,
    ) -> Result<(), AssetError> {
        let result = match self.access.require(caller, Role::Owner) {
            Ok(()) => {
                self.access.set_admin(account, is_admin);
                let event = AssetEvent::AdminChanged {
                    account: account.clone(),
                    is_admin,
                };
                Ok(((), vec![event]))
            }
            Err(e) => Err(e.into()),
        };
        self.finish("set_admin", caller, result)
    }

    /// Owner-only replacement of the jurisdiction text.
    pub fn change_jurisdiction(
        &mut self,
        caller: &AccountId,
        jurisdiction: impl Into<String>,
    ) -> Result<(), AssetError> {
        let result = match self.access.require(caller, Role::Owner) {
            Ok(()) => {
                let jurisdiction = jurisdiction.into();
                self.metadata.jurisdiction = jurisdiction.clone();
                Ok(((), vec![AssetEvent::JurisdictionChanged { jurisdiction }]))
            }
            Err(e) => Err(e.into()),
        };
        self.finish("change_jurisdiction", caller, result)
    }

    // ── Governance ─────────────────────────────────────────────────────

    /// Open a proposal voting until `now + voting_period_secs`.
    /// The caller must hold a non-zero balance.
    pub fn create_proposal(
        &mut self,
        caller: &AccountId,
        description: impl Into<String>,
        voting_period_secs: u64,
        now: Timestamp,
    ) -> Result<ProposalId, AssetError> {
        let description = description.into();
        let result = self
            .governance
            .create_proposal(
                &mut self.proposals,
                &self.ledger,
                caller,
                description.clone(),
                voting_period_secs,
                now,
            )
            .map_err(AssetError::from)
            .and_then(|id| {
                let proposal = self
                    .proposals
                    .get(id)
                    .ok_or(parcel_governance::GovernanceError::ProposalNotFound(id))?;
                let event = AssetEvent::ProposalCreated {
                    id,
                    proposer: caller.clone(),
                    description,
                    deadline: proposal.vote_deadline,
                };
                Ok((id, vec![event]))
            });
        self.finish("create_proposal", caller, result)
    }

    /// Cast the caller's current voting power for or against a proposal.
    pub fn vote(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<(), AssetError> {
        let result = self
            .governance
            .cast_vote(&mut self.proposals, &self.powers, caller, id, support, now)
            .map(|record| {
                let event = AssetEvent::VoteCast {
                    id: record.proposal,
                    voter: record.voter,
                    support: record.support,
                    weight: record.weight,
                };
                ((), vec![event])
            })
            .map_err(AssetError::from);
        self.finish("vote", caller, result)
    }

    /// Mark a closed, passing proposal executed. Anyone may call this.
    pub fn execute_proposal(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<(), AssetError> {
        let result = self
            .governance
            .execute_proposal(&mut self.proposals, &self.ledger, id, now)
            .map(|()| ((), vec![AssetEvent::ProposalExecuted { id }]))
            .map_err(AssetError::from);
        self.finish("execute_proposal", caller, result)
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountId) -> Units {
        self.ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> Units {
        self.ledger.total_supply()
    }

    pub fn voting_power_of(&self, account: &AccountId) -> Weight {
        self.powers.power_of(account)
    }

    /// Sum of all voting power, or `None` if it exceeds a u128.
    pub fn total_voting_power(&self) -> Option<Weight> {
        self.powers.total_power()
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.proposal_count()
    }

    pub fn proposal_status(&self, id: ProposalId, now: Timestamp) -> Option<ProposalStatus> {
        self.proposals.get(id).map(|p| p.status(now))
    }

    pub fn has_voted(&self, account: &AccountId, id: ProposalId) -> bool {
        self.proposals.has_voted(account, id)
    }

    pub fn is_owner(&self, account: &AccountId) -> bool {
        self.access.is_owner(account)
    }

    pub fn is_admin(&self, account: &AccountId) -> bool {
        self.access.is_admin(account)
    }

    pub fn metadata(&self) -> &AssetMetadata {
        &self.metadata
    }

    pub fn governance_params(&self) -> &GovernanceParams {
        self.governance.params()
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    /// `(name, count)` pairs for committed and rejected operations.
    pub fn stats(&self) -> Vec<(&'static str, u64)> {
        self.stats.snapshot()
    }

    /// Whether total supply still equals the sum of balances.
    pub fn is_consistent(&self) -> bool {
        self.ledger.sum_of_balances() == Some(self.ledger.total_supply())
    }

    /// Commit bookkeeping shared by every operation: count, log, and on
    /// success emit the events in order.
    fn finish<T>(
        &self,
        op: &'static str,
        caller: &AccountId,
        result: Result<(T, Vec<AssetEvent>), AssetError>,
    ) -> Result<T, AssetError> {
        match result {
            Ok((value, events)) => {
                self.stats.increment(OPS_COMMITTED);
                tracing::debug!(op, caller = %caller, events = events.len(), "operation committed");
                for event in &events {
                    self.events.emit(event);
                }
                Ok(value)
            }
            Err(err) => {
                self.stats.increment(OPS_REJECTED);
                tracing::debug!(op, caller = %caller, error = %err, "operation rejected");
                Err(err)
            }
        }
    }
}

fn transfer_event(record: TransferRecord) -> AssetEvent {
    AssetEvent::Transfer {
        from: record.from,
        to: record.to,
        amount: record.amount,
    }
}
