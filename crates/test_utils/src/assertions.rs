//! Custom Test Assertions
//!
//! Assertion helpers for ledger types that give more meaningful failure
//! messages than a bare `assert_eq!` on a `Money`.

use core_kernel::{MemberId, Money};
use domain_ledger::{Group, LedgerError, Member};
use rust_decimal::Decimal;

/// Asserts that a group's member balances sum to exactly zero
///
/// # Panics
///
/// Panics with every member's balance listed if the sum is not zero
pub fn assert_zero_sum(group: &Group) {
    assert_members_zero_sum(&group.members);
}

/// Asserts that a member set's balances sum to exactly zero
pub fn assert_members_zero_sum(members: &[Member]) {
    let total: Decimal = members.iter().map(|m| m.balance.amount()).sum();
    assert!(
        total.is_zero(),
        "Balances sum to {} instead of zero: {}",
        total,
        describe(members)
    );
}

/// Asserts a member's balance by id
pub fn assert_balance(group: &Group, member_id: MemberId, expected: Decimal) {
    let member = group
        .member(member_id)
        .unwrap_or_else(|| panic!("Member {} not in group {}", member_id, group.id));
    assert_eq!(
        member.balance.amount(),
        expected,
        "Balance of {} ({}) is {}, expected {}",
        member.name,
        member_id,
        member.balance,
        expected
    );
}

/// Asserts every member's balance by name, in insertion order
pub fn assert_balances(group: &Group, expected: &[(&str, Decimal)]) {
    for (name, amount) in expected {
        let member = group
            .member_by_name(name)
            .unwrap_or_else(|| panic!("No member named {} in {}", name, describe(&group.members)));
        assert_eq!(
            member.balance.amount(),
            *amount,
            "Balance of {} is {}, expected {}",
            name,
            member.balance,
            amount
        );
    }
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {}",
        money
    );
}

/// Asserts that an operation failed without touching the stored group
pub fn assert_unchanged<T: std::fmt::Debug>(before: &Group, after: &Group, result: &Result<T, LedgerError>) {
    assert!(result.is_err(), "Expected failure, got {:?}", result);
    assert_eq!(before, after, "Failed operation modified the group");
}

fn describe(members: &[Member]) -> String {
    members
        .iter()
        .map(|m| format!("{}={}", m.name, m.balance))
        .collect::<Vec<_>>()
        .join(", ")
}
