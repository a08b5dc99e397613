//! Settlement engine tests

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_ledger::settlement::{creditor_order, settle};
use domain_ledger::{LedgerError, Member, SettlementOptions, Transfer};
use test_utils::{member_id, usd};

fn member(n: u128, balance: Decimal) -> Member {
    Member::new(member_id(n), format!("Member {}", n), Currency::USD).with_balance(usd(balance))
}

#[test]
fn test_single_creditor() {
    let mut members = vec![member(1, dec!(-20)), member(2, dec!(20))];
    settle(&mut members, member_id(1), usd(dec!(10)), SettlementOptions::default()).unwrap();

    assert_eq!(members[0].balance, usd(dec!(-10)));
    assert_eq!(members[1].balance, usd(dec!(10)));
}

#[test]
fn test_multiple_creditors_greedy_order() {
    let mut members = vec![member(1, dec!(-30)), member(2, dec!(15)), member(3, dec!(20))];
    let outcome = settle(&mut members, member_id(1), usd(dec!(30)), SettlementOptions::default()).unwrap();

    assert_eq!(
        outcome.transfers,
        vec![
            Transfer { creditor_id: member_id(3), amount: usd(dec!(20)) },
            Transfer { creditor_id: member_id(2), amount: usd(dec!(10)) },
        ]
    );
    assert_eq!(members[0].balance, usd(dec!(0)));
    assert_eq!(members[1].balance, usd(dec!(5)));
    assert_eq!(members[2].balance, usd(dec!(0)));
}

#[test]
fn test_settlement_preserves_total() {
    let mut members = vec![
        member(1, dec!(-12.34)),
        member(2, dec!(-7.66)),
        member(3, dec!(11.00)),
        member(4, dec!(9.00)),
    ];
    let before: Decimal = members.iter().map(|m| m.balance.amount()).sum();

    settle(&mut members, member_id(1), usd(dec!(12.34)), SettlementOptions::default()).unwrap();

    let after: Decimal = members.iter().map(|m| m.balance.amount()).sum();
    assert_eq!(before, after);
    assert!(members[0].is_settled());
}

#[test]
fn test_equal_creditors_paid_in_id_order() {
    let members = vec![
        member(9, dec!(-30)),
        member(7, dec!(10)),
        member(2, dec!(10)),
        member(4, dec!(10)),
    ];
    let order: Vec<_> = creditor_order(&members)
        .into_iter()
        .map(|i| members[i].id)
        .collect();

    assert_eq!(order, vec![member_id(2), member_id(4), member_id(7)]);
}

#[test]
fn test_settled_member_has_nothing_to_settle() {
    let mut members = vec![member(1, dec!(0)), member(2, dec!(0))];
    let result = settle(&mut members, member_id(1), usd(dec!(5)), SettlementOptions::default());
    assert!(matches!(result, Err(LedgerError::NothingToSettle { .. })));
}

#[test]
fn test_unknown_debtor() {
    let mut members = vec![member(1, dec!(-5)), member(2, dec!(5))];
    let result = settle(&mut members, member_id(3), usd(dec!(5)), SettlementOptions::default());
    assert!(matches!(result, Err(LedgerError::MemberNotFound(_))));
}

#[test]
fn test_non_positive_amount_rejected() {
    let mut members = vec![member(1, dec!(-5)), member(2, dec!(5))];
    let result = settle(&mut members, member_id(1), usd(dec!(0)), SettlementOptions::default());
    assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    assert_eq!(members[0].balance, usd(dec!(-5)));
}

#[test]
fn test_capped_payment_reports_requested_and_settled() {
    let mut members = vec![member(1, dec!(-5)), member(2, dec!(5))];
    let outcome = settle(&mut members, member_id(1), usd(dec!(8)), SettlementOptions::default()).unwrap();

    assert!(outcome.was_capped());
    assert_eq!(outcome.requested, usd(dec!(8)));
    assert_eq!(outcome.settled, usd(dec!(5)));
    assert!(members.iter().all(|m| m.is_settled()));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_never_moves_more_than_owed(
            debt in 1i64..100_000,
            split in 0i64..=100,
            payment in 1i64..200_000,
        ) {
            let first = debt * split / 100;
            let mut members = vec![
                member(1, -Decimal::new(debt, 2)),
                member(2, Decimal::new(first, 2)),
                member(3, Decimal::new(debt - first, 2)),
            ];

            let outcome = settle(&mut members, member_id(1), usd(Decimal::new(payment, 2)), SettlementOptions::default())
                .unwrap();

            prop_assert!(outcome.settled.amount() <= Decimal::new(debt, 2));
            prop_assert!(outcome.settled.amount() <= Decimal::new(payment, 2));
            prop_assert!(!members[0].is_creditor());
            prop_assert!(members.iter().all(|m| !m.balance.is_negative() || m.id == member_id(1)));
            let total: Decimal = members.iter().map(|m| m.balance.amount()).sum();
            prop_assert_eq!(total, Decimal::ZERO);
        }
    }
}
