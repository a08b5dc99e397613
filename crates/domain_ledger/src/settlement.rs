//! Settlement Engine
//!
//! Applies a real payment from a debtor to the group. Creditors are paid
//! greedily: largest balance first, ties broken by ascending member id.
//! The payment is capped at what the debtor owes.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use core_kernel::{MemberId, Money};
use crate::error::LedgerError;
use crate::member::{find_member, Member};

/// Knobs for the settlement engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementOptions {
    /// Reject requests larger than the debt instead of capping them
    pub reject_overpayment: bool,
}

/// Value moved from the debtor to one creditor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub creditor_id: MemberId,
    pub amount: Money,
}

/// What a settlement did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementOutcome {
    pub debtor_id: MemberId,
    /// Amount the caller asked to pay
    pub requested: Money,
    /// Amount actually moved (requested, capped at the debt)
    pub settled: Money,
    /// Transfers in the order they were made
    pub transfers: Vec<Transfer>,
}

impl SettlementOutcome {
    /// Returns true if the request exceeded the debt and was capped
    pub fn was_capped(&self) -> bool {
        self.settled != self.requested
    }
}

/// Settles up to `amount` of `debtor_id`'s debt
///
/// # Errors
///
/// - `MemberNotFound` if the debtor is not in `members`
/// - `NothingToSettle` if the debtor's balance is zero or positive
/// - `InvalidAmount` if `amount` is not positive
/// - `Overpayment` if `amount` exceeds the debt and overpayment is rejected
/// - `InvariantViolation` if creditors cannot absorb the payment; no balance is changed
pub fn settle(
    members: &mut [Member],
    debtor_id: MemberId,
    amount: Money,
    options: SettlementOptions,
) -> Result<SettlementOutcome, LedgerError> {
    let debtor = find_member(members, debtor_id).ok_or(LedgerError::MemberNotFound(debtor_id))?;
    if !debtor.is_debtor() {
        return Err(LedgerError::NothingToSettle {
            member_id: debtor_id,
            balance: debtor.balance,
        });
    }
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!("settlement amount must be positive, got {}", amount)));
    }

    let owed = debtor.balance.abs();
    if options.reject_overpayment && amount > owed {
        return Err(LedgerError::Overpayment { requested: amount, owed });
    }
    let to_distribute = owed.min(&amount)?;

    let mut staged: Vec<Money> = members.iter().map(|m| m.balance).collect();
    let debtor_index = members
        .iter()
        .position(|m| m.id == debtor_id)
        .ok_or(LedgerError::MemberNotFound(debtor_id))?;

    let mut remaining = to_distribute;
    let mut transfers = Vec::new();

    for index in creditor_order(members) {
        if remaining.is_zero() {
            break;
        }
        let transfer = staged[index].min(&remaining)?;
        staged[index] = staged[index].checked_sub(&transfer)?;
        staged[debtor_index] = staged[debtor_index].checked_add(&transfer)?;
        remaining = remaining.checked_sub(&transfer)?;

        debug!(creditor_id = %members[index].id, amount = %transfer, "settlement transfer");
        transfers.push(Transfer {
            creditor_id: members[index].id,
            amount: transfer,
        });
    }

    if !remaining.is_zero() {
        error!(
            %debtor_id,
            remaining = %remaining,
            "creditors exhausted before settlement completed; balances are corrupt"
        );
        return Err(LedgerError::invariant(format!(
            "{} of settlement for {} could not be placed with any creditor",
            remaining, debtor_id
        )));
    }

    for (member, balance) in members.iter_mut().zip(staged) {
        member.balance = balance;
    }

    Ok(SettlementOutcome {
        debtor_id,
        requested: amount,
        settled: to_distribute,
        transfers,
    })
}

/// Indices of creditors, largest balance first, then ascending id
pub fn creditor_order(members: &[Member]) -> Vec<usize> {
    let mut indices: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_creditor())
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| {
        let (ma, mb) = (&members[a], &members[b]);
        mb.balance
            .amount()
            .cmp(&ma.balance.amount())
            .then_with(|| ma.id.cmp(&mb.id))
    });
    indices
}
