//! Ledger Façade
//!
//! [`LedgerService`] is the entry point callers use. Each operation loads a
//! group from the [`GroupStore`], runs the split or settlement engine on an
//! owned copy, checks the zero-sum invariant, and saves the result. A failed
//! operation writes nothing.
//!
//! Operations on the same group are serialized with a per-group lock;
//! different groups proceed independently.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use chrono::Utc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use core_kernel::{GroupId, MemberId, Money, TransactionId};
use crate::balance;
use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::group::Group;
use crate::member::Member;
use crate::requests::{AddMemberRequest, CreateGroupRequest, RecordTransactionRequest};
use crate::settlement::{self, SettlementOutcome};
use crate::split::{compute_owed_deltas, SplitPolicy};
use crate::store::{GroupStore, InMemoryGroupStore};
use crate::summary::BalanceSheet;
use crate::transaction::Transaction;

/// Result of a settlement: what moved and the updated member set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub outcome: SettlementOutcome,
    pub members: Vec<Member>,
}

/// One mutex per stored group, created on first use
///
/// The mutexes guard no data of their own: a group only changes when the
/// store saves it, so a guard released by a panic leaves nothing half-written.
#[derive(Debug, Default)]
struct GroupLocks {
    locks: Mutex<HashMap<GroupId, Arc<Mutex<()>>>>,
}

impl GroupLocks {
    /// Returns the lock for `id`, registering it only if the group exists
    fn for_group(&self, id: GroupId, store: &dyn GroupStore) -> Result<Arc<Mutex<()>>, LedgerError> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(&id) {
            return Ok(Arc::clone(lock));
        }
        if store.load_group(id)?.is_none() {
            return Err(LedgerError::GroupNotFound(id));
        }
        Ok(Arc::clone(locks.entry(id).or_default()))
    }

    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Application service for the shared expense ledger
pub struct LedgerService {
    store: Arc<dyn GroupStore>,
    config: LedgerConfig,
    locks: GroupLocks,
}

impl LedgerService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn GroupStore>, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            locks: GroupLocks::default(),
        }
    }

    /// Creates a service backed by a fresh [`InMemoryGroupStore`]
    pub fn in_memory(config: LedgerConfig) -> Self {
        Self::new(Arc::new(InMemoryGroupStore::new()), config)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Creates an empty group
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub fn create_group(&self, request: CreateGroupRequest) -> Result<Group, LedgerError> {
        request.validate()?;

        let currency = request.currency.unwrap_or(self.config.currency);
        let group = Group::new(GroupId::new_v7(), request.title.trim(), currency);
        self.store.save_group(&group)?;

        info!(group_id = %group.id, %currency, "group created");
        Ok(group)
    }

    /// Lists every group, oldest first
    pub fn list_groups(&self) -> Result<Vec<Group>, LedgerError> {
        Ok(self.store.list_groups()?)
    }

    /// Loads a group with its members and transactions
    pub fn get_group(&self, group_id: GroupId) -> Result<Group, LedgerError> {
        self.store
            .load_group(group_id)?
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    /// Adds a member with a zero balance
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if the group does not exist
    /// - `DuplicateMemberName` if the name is taken, ignoring case
    #[instrument(skip(self, request), fields(%group_id))]
    pub fn add_member(&self, group_id: GroupId, request: AddMemberRequest) -> Result<Group, LedgerError> {
        request.validate()?;
        let lock = self.locks.for_group(group_id, self.store.as_ref())?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut group = self.load_checked(group_id)?;
        let member_id = group.add_member(&request.name)?.id;
        self.commit(&group)?;

        info!(%member_id, name = %request.name.trim(), "member added");
        Ok(group)
    }

    /// Records an expense and updates balances
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`, `PayerNotFound` for failed lookups
    /// - `InvalidAmount` if the amount is not positive or has sub-cent precision
    /// - `MissingSplitDetails`, `InvalidSplit`, `SplitTotalMismatch` for bad split input
    /// - `Money(Overflow)` if the amount is too large to split in minor units
    /// - `InvariantViolation` if the result would not be zero-sum
    #[instrument(skip(self, request), fields(%group_id, split = %request.split_type))]
    pub fn record_transaction(
        &self,
        group_id: GroupId,
        request: RecordTransactionRequest,
    ) -> Result<Transaction, LedgerError> {
        request.validate()?;
        let lock = self.locks.for_group(group_id, self.store.as_ref())?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut group = self.load_checked(group_id)?;
        let amount = Money::exact(request.amount, group.currency)
            .map_err(|e| LedgerError::InvalidAmount(e.to_string()))?;
        let (payer_id, payer_name) = group
            .member_by_name(&request.paid_by)
            .map(|m| (m.id, m.name.clone()))
            .ok_or_else(|| LedgerError::PayerNotFound(request.paid_by.clone()))?;

        let policy = SplitPolicy::from_parts(request.split_type, request.split_details)?;
        let deltas = compute_owed_deltas(
            &group.members,
            payer_id,
            amount,
            &policy,
            self.config.split_options(),
        )?;
        balance::apply(&mut group.members, &deltas)?;

        let transaction = Transaction {
            id: TransactionId::new_v7(),
            group_id,
            title: request.title.trim().to_string(),
            amount,
            paid_by: payer_name,
            payer_id,
            split_type: policy.split_type(),
            shares: deltas.debits,
            recorded_at: Utc::now(),
        };
        group.record(transaction.clone());
        self.commit(&group)?;

        info!(
            transaction_id = %transaction.id,
            %amount,
            %payer_id,
            credit = %deltas.credit,
            "transaction recorded"
        );
        Ok(transaction)
    }

    /// Applies a payment from a debtor to the group's creditors
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`, `MemberNotFound` for failed lookups
    /// - `NothingToSettle` if the member does not owe anything
    /// - `InvalidAmount` if the amount is not positive or has sub-cent precision
    /// - `InvariantViolation` if creditors cannot absorb the payment
    #[instrument(skip(self), fields(%group_id, %member_id))]
    pub fn settle_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
        amount: Decimal,
    ) -> Result<SettlementReceipt, LedgerError> {
        let lock = self.locks.for_group(group_id, self.store.as_ref())?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut group = self.load_checked(group_id)?;
        let amount = Money::exact(amount, group.currency)
            .map_err(|e| LedgerError::InvalidAmount(e.to_string()))?;

        let outcome = settlement::settle(
            &mut group.members,
            member_id,
            amount,
            self.config.settlement_options(),
        )?;
        self.commit(&group)?;

        if outcome.was_capped() {
            warn!(requested = %outcome.requested, settled = %outcome.settled, "settlement capped at amount owed");
        }
        info!(settled = %outcome.settled, transfers = outcome.transfers.len(), "member settled");

        Ok(SettlementReceipt {
            outcome,
            members: group.members,
        })
    }

    /// Removes a member whose balance is exactly zero
    ///
    /// # Errors
    ///
    /// - `GroupNotFound`, `MemberNotFound` for failed lookups
    /// - `MemberNotSettled` if the balance is not zero
    #[instrument(skip(self), fields(%group_id, %member_id))]
    pub fn remove_member(&self, group_id: GroupId, member_id: MemberId) -> Result<(), LedgerError> {
        let lock = self.locks.for_group(group_id, self.store.as_ref())?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut group = self.load_checked(group_id)?;
        let removed = group.remove_member(member_id)?;
        self.commit(&group)?;

        info!(name = %removed.name, "member removed");
        Ok(())
    }

    /// Recorded expenses in recording order
    pub fn transactions(&self, group_id: GroupId) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.get_group(group_id)?.transactions)
    }

    /// Balances of every member as seen by `viewer`
    pub fn balance_sheet(&self, group_id: GroupId, viewer: Option<&str>) -> Result<BalanceSheet, LedgerError> {
        let group = self.get_group(group_id)?;
        BalanceSheet::for_group(&group, viewer)
    }

    /// Loads a group for mutation, refusing groups that are already corrupt
    fn load_checked(&self, group_id: GroupId) -> Result<Group, LedgerError> {
        let group = self.get_group(group_id)?;
        group.verify_zero_sum().inspect_err(|_| {
            error!(%group_id, "stored group violates zero-sum invariant; operation aborted");
        })?;
        Ok(group)
    }

    /// Verifies the invariant and writes the group back
    fn commit(&self, group: &Group) -> Result<(), LedgerError> {
        group.verify_zero_sum().inspect_err(|_| {
            error!(group_id = %group.id, "refusing to save group that violates zero-sum invariant");
        })?;
        self.store.save_group(group)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service_with_group() -> (LedgerService, GroupId) {
        let service = LedgerService::in_memory(LedgerConfig::default());
        let group = service.create_group(CreateGroupRequest::new("Trip")).unwrap();
        (service, group.id)
    }

    #[test]
    fn test_group_locks_are_shared_per_group() {
        let (service, id) = service_with_group();
        let other = service.create_group(CreateGroupRequest::new("Flat")).unwrap().id;
        let store = service.store.as_ref();

        let a = service.locks.for_group(id, store).unwrap();
        let b = service.locks.for_group(id, store).unwrap();
        let c = service.locks.for_group(other, store).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_missing_group_leaves_lock_table_unchanged() {
        let (service, id) = service_with_group();
        service.add_member(id, AddMemberRequest::new("Alice")).unwrap();
        assert_eq!(service.locks.len(), 1);

        let missing = GroupId::new_v7();
        let result = service.record_transaction(
            missing,
            RecordTransactionRequest::equal("Lunch", dec!(20), "Alice"),
        );
        assert!(matches!(result, Err(LedgerError::GroupNotFound(g)) if g == missing));
        assert!(matches!(
            service.settle_member(missing, MemberId::new(), dec!(1)),
            Err(LedgerError::GroupNotFound(_))
        ));
        assert!(matches!(
            service.remove_member(missing, MemberId::new()),
            Err(LedgerError::GroupNotFound(_))
        ));
        assert!(matches!(
            service.add_member(missing, AddMemberRequest::new("Bob")),
            Err(LedgerError::GroupNotFound(_))
        ));
        assert_eq!(service.locks.len(), 1);
    }

    #[test]
    fn test_lock_released_by_panic_is_reusable() {
        let (service, id) = service_with_group();
        let lock = service.locks.for_group(id, service.store.as_ref()).unwrap();

        let poisoner = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("worker died holding the group lock");
        })
        .join();
        assert!(lock.is_poisoned());

        let group = service.add_member(id, AddMemberRequest::new("Alice")).unwrap();
        assert_eq!(group.members.len(), 1);
    }
}
