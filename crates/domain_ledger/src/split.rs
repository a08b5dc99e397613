//! Split Engine
//!
//! Converts an expense into the amount each non-payer member owes the payer.
//! The payer is never debited; they are credited with exactly the sum of the
//! other members' debits, so every split preserves the zero-sum invariant
//! on its own.
//!
//! # Policies
//!
//! - **Equal**: the amount is floored to the cent per member. Leftover cents
//!   go one at a time to non-payer members in ascending id order, so the
//!   shares (payer's implicit base share included) add up to the amount.
//! - **Percentage**: each listed member owes `amount * pct / 100`, rounded
//!   half-to-even to the cent.
//! - **Dynamic**: each listed member owes an exact amount.
//!
//! Detail entries for unknown members, or for the payer, are skipped.
//! Totals are not required to reach 100% / the amount unless
//! [`SplitOptions::strict_totals`] is set.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use core_kernel::{MemberId, Money, Rate};
use crate::error::LedgerError;
use crate::member::{find_member, Member};
use crate::transaction::{Share, SplitType};

/// Per-member split details keyed by member id
pub type SplitDetails = BTreeMap<MemberId, Decimal>;

/// A split policy together with the details it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPolicy {
    Equal,
    /// Percentages in `0..=100`
    Percentage(SplitDetails),
    /// Exact currency amounts
    Dynamic(SplitDetails),
}

impl SplitPolicy {
    /// Builds a policy from a split tag and optional details
    ///
    /// Details are ignored for `equal` and required otherwise.
    pub fn from_parts(split_type: SplitType, details: Option<SplitDetails>) -> Result<Self, LedgerError> {
        match split_type {
            SplitType::Equal => Ok(SplitPolicy::Equal),
            SplitType::Percentage => details
                .map(SplitPolicy::Percentage)
                .ok_or_else(|| LedgerError::MissingSplitDetails(split_type.to_string())),
            SplitType::Dynamic => details
                .map(SplitPolicy::Dynamic)
                .ok_or_else(|| LedgerError::MissingSplitDetails(split_type.to_string())),
        }
    }

    pub fn split_type(&self) -> SplitType {
        match self {
            SplitPolicy::Equal => SplitType::Equal,
            SplitPolicy::Percentage(_) => SplitType::Percentage,
            SplitPolicy::Dynamic(_) => SplitType::Dynamic,
        }
    }
}

/// Knobs for the split engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Reject percentage splits not totalling 100 and dynamic splits not totalling the amount
    pub strict_totals: bool,
}

/// Result of splitting one expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwedDeltas {
    /// Member who paid
    pub payer: MemberId,
    /// Amount credited to the payer; always the sum of `debits`
    pub credit: Money,
    /// Amount owed by each non-payer member, in ascending id order
    pub debits: Vec<Share>,
}

impl OwedDeltas {
    /// Returns the debit for `member_id`, if that member owes anything
    pub fn debit_of(&self, member_id: MemberId) -> Option<Money> {
        self.debits
            .iter()
            .find(|s| s.member_id == member_id)
            .map(|s| s.amount)
    }
}

/// Computes what each member owes the payer for one expense
///
/// # Arguments
///
/// * `members` - The group's members (must not be empty)
/// * `payer` - The paying member's id
/// * `amount` - Positive expense total
/// * `policy` - How to divide the amount
/// * `options` - Strictness knobs
///
/// # Errors
///
/// - `PayerNotFound` if the payer is not in `members`
/// - `InvalidAmount` if the amount is not positive
/// - `InvalidSplit` for out-of-range detail values or an empty member list
/// - `SplitTotalMismatch` in strict mode when details do not add up
pub fn compute_owed_deltas(
    members: &[Member],
    payer: MemberId,
    amount: Money,
    policy: &SplitPolicy,
    options: SplitOptions,
) -> Result<OwedDeltas, LedgerError> {
    if members.is_empty() {
        return Err(LedgerError::InvalidSplit("group has no members".to_string()));
    }
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!("expense amount must be positive, got {}", amount)));
    }
    if find_member(members, payer).is_none() {
        return Err(LedgerError::PayerNotFound(payer.to_string()));
    }

    let debits = match policy {
        SplitPolicy::Equal => equal_shares(members, payer, amount)?,
        SplitPolicy::Percentage(details) => percentage_shares(members, payer, amount, details, options)?,
        SplitPolicy::Dynamic(details) => dynamic_shares(members, payer, amount, details, options)?,
    };

    let credit = Money::try_sum(amount.currency(), debits.iter().map(|s| &s.amount))?;

    Ok(OwedDeltas { payer, credit, debits })
}

fn equal_shares(members: &[Member], payer: MemberId, amount: Money) -> Result<Vec<Share>, LedgerError> {
    let (base, leftover) = amount.split_evenly(members.len() as u32)?;
    let cent = amount.minor_unit();

    let mut recipients: Vec<MemberId> = members
        .iter()
        .map(|m| m.id)
        .filter(|id| *id != payer)
        .collect();
    recipients.sort();

    let mut shares = Vec::with_capacity(recipients.len());
    for (index, member_id) in recipients.into_iter().enumerate() {
        let share = if (index as u32) < leftover {
            base.checked_add(&cent)?
        } else {
            base
        };
        if !share.is_zero() {
            shares.push(Share { member_id, amount: share });
        }
    }

    Ok(shares)
}

fn percentage_shares(
    members: &[Member],
    payer: MemberId,
    amount: Money,
    details: &SplitDetails,
    options: SplitOptions,
) -> Result<Vec<Share>, LedgerError> {
    for (member_id, pct) in details {
        if *pct < Decimal::ZERO || *pct > dec!(100) {
            return Err(LedgerError::InvalidSplit(format!(
                "percentage for {} must be between 0 and 100, got {}",
                member_id, pct
            )));
        }
    }

    let total_pct: Decimal = details.values().sum();
    if total_pct != dec!(100) {
        if options.strict_totals {
            return Err(LedgerError::SplitTotalMismatch {
                expected: "100%".to_string(),
                actual: format!("{}%", total_pct),
            });
        }
        warn!(total_percentage = %total_pct, "percentage split does not total 100%");
    }

    let mut shares = Vec::with_capacity(details.len());
    for (member_id, pct) in details {
        if !is_debtor_entry(members, payer, *member_id) {
            continue;
        }
        let share = Rate::from_percentage(*pct).apply(&amount)?;
        if !share.is_zero() {
            shares.push(Share { member_id: *member_id, amount: share });
        }
    }

    Ok(shares)
}

fn dynamic_shares(
    members: &[Member],
    payer: MemberId,
    amount: Money,
    details: &SplitDetails,
    options: SplitOptions,
) -> Result<Vec<Share>, LedgerError> {
    let mut exact = Vec::with_capacity(details.len());
    for (member_id, value) in details {
        if *value < Decimal::ZERO {
            return Err(LedgerError::InvalidSplit(format!(
                "amount for {} must not be negative, got {}",
                member_id, value
            )));
        }
        let share = Money::exact(*value, amount.currency())
            .map_err(|e| LedgerError::InvalidSplit(format!("amount for {}: {}", member_id, e)))?;
        exact.push((*member_id, share));
    }

    let total = Money::try_sum(amount.currency(), exact.iter().map(|(_, m)| m))?;
    if total != amount {
        if options.strict_totals {
            return Err(LedgerError::SplitTotalMismatch {
                expected: amount.to_string(),
                actual: total.to_string(),
            });
        }
        warn!(expected = %amount, actual = %total, "dynamic split does not total the expense amount");
    }

    Ok(exact
        .into_iter()
        .filter(|(member_id, share)| !share.is_zero() && is_debtor_entry(members, payer, *member_id))
        .map(|(member_id, amount)| Share { member_id, amount })
        .collect())
}

/// Permissive lookup for detail entries: unknown members and the payer are skipped
fn is_debtor_entry(members: &[Member], payer: MemberId, member_id: MemberId) -> bool {
    if member_id == payer {
        debug!(%member_id, "ignoring payer's own split entry");
        return false;
    }
    if find_member(members, member_id).is_none() {
        debug!(%member_id, "skipping split entry for unknown member");
        return false;
    }
    true
}
