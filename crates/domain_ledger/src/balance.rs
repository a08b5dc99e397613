//! Balance Accumulator
//!
//! Applies a split's deltas to live member balances. New balances are
//! staged first and only written back once every step has succeeded, so a
//! failure leaves the member set untouched.

use tracing::{debug, error};

use core_kernel::{Currency, MemberId, Money};
use crate::error::LedgerError;
use crate::member::Member;
use crate::split::OwedDeltas;

/// Applies `deltas` to `members`
///
/// Debits are applied first and the payer's credit last. References to
/// members not present in the set are ignored.
///
/// # Errors
///
/// - `Money` on currency mismatch or overflow
/// - `InvariantViolation` if the applied changes do not net to zero
pub fn apply(members: &mut [Member], deltas: &OwedDeltas) -> Result<(), LedgerError> {
    let mut staged: Vec<Money> = members.iter().map(|m| m.balance).collect();
    let currency = deltas.credit.currency();
    let mut applied_debits = Money::zero(currency);
    let mut credited = Money::zero(currency);

    for share in &deltas.debits {
        match position(members, share.member_id) {
            Some(index) => {
                staged[index] = staged[index].checked_sub(&share.amount)?;
                applied_debits = applied_debits.checked_add(&share.amount)?;
            }
            None => debug!(member_id = %share.member_id, "debit for unknown member ignored"),
        }
    }

    match position(members, deltas.payer) {
        Some(index) => {
            staged[index] = staged[index].checked_add(&deltas.credit)?;
            credited = deltas.credit;
        }
        None => debug!(member_id = %deltas.payer, "credit for unknown payer ignored"),
    }

    if applied_debits != credited {
        error!(
            debits = %applied_debits,
            credit = %credited,
            "split deltas do not net to zero; nothing applied"
        );
        return Err(LedgerError::invariant(format!(
            "applied debits {} do not match payer credit {}",
            applied_debits, credited
        )));
    }

    for (member, balance) in members.iter_mut().zip(staged) {
        member.balance = balance;
    }

    Ok(())
}

/// Sum of all balances in `members`
pub fn total(members: &[Member], currency: Currency) -> Result<Money, LedgerError> {
    Ok(Money::try_sum(currency, members.iter().map(|m| &m.balance))?)
}

/// Checks that balances sum to exactly zero
pub fn verify_zero_sum(members: &[Member], currency: Currency) -> Result<(), LedgerError> {
    let sum = total(members, currency)?;
    if !sum.is_zero() {
        error!(total = %sum, members = members.len(), "zero-sum invariant violated");
        return Err(LedgerError::invariant(format!("member balances sum to {}", sum)));
    }
    Ok(())
}

fn position(members: &[Member], id: MemberId) -> Option<usize> {
    members.iter().position(|m| m.id == id)
}
