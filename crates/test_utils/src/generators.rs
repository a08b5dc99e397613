//! Property-Based Test Generators
//!
//! Proptest strategies for amounts, split details, and sequences of ledger
//! operations. Operations refer to members by position so a strategy does
//! not need to know the ids a group will hand out.

use core_kernel::{Currency, Money};
use proptest::collection::vec;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for currencies with a minor unit
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::INR),
        Just(Currency::AUD),
        Just(Currency::CAD),
    ]
}

/// Strategy for positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for positive USD expense amounts
pub fn expense_amount_strategy() -> impl Strategy<Value = Decimal> {
    positive_amount_minor_strategy().prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for positive USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for percentages in `0..=100` with up to two decimal places
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Which split an operation uses, with per-position details
#[derive(Debug, Clone)]
pub enum SplitChoice {
    Equal,
    /// Percentage for the member at each position
    Percentage(Vec<(usize, Decimal)>),
    /// Exact amount (two decimal places) for the member at each position
    Dynamic(Vec<(usize, Decimal)>),
}

/// One step of a generated ledger history
#[derive(Debug, Clone)]
pub enum LedgerOp {
    Record {
        payer: usize,
        amount: Decimal,
        split: SplitChoice,
    },
    Settle {
        member: usize,
        amount: Decimal,
    },
    Remove {
        member: usize,
    },
}

/// Strategy for split choices over a group of up to `max_members`
pub fn split_choice_strategy(max_members: usize) -> impl Strategy<Value = SplitChoice> {
    prop_oneof![
        2 => Just(SplitChoice::Equal),
        1 => vec((0..max_members, percentage_strategy()), 1..=max_members)
            .prop_map(SplitChoice::Percentage),
        1 => vec((0..max_members, (0i64..50_000i64).prop_map(|n| Decimal::new(n, 2))), 1..=max_members)
            .prop_map(SplitChoice::Dynamic),
    ]
}

/// Strategy for a single ledger operation
pub fn ledger_op_strategy(max_members: usize) -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        4 => (0..max_members, expense_amount_strategy(), split_choice_strategy(max_members))
            .prop_map(|(payer, amount, split)| LedgerOp::Record { payer, amount, split }),
        2 => (0..max_members, expense_amount_strategy())
            .prop_map(|(member, amount)| LedgerOp::Settle { member, amount }),
        1 => (0..max_members).prop_map(|member| LedgerOp::Remove { member }),
    ]
}

/// Strategy for a history of `1..=max_ops` operations
pub fn ledger_ops_strategy(max_members: usize, max_ops: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
    vec(ledger_op_strategy(max_members), 1..=max_ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_expense_amounts_are_positive_cents(amount in expense_amount_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
            prop_assert!(amount.scale() <= 2);
        }

        #[test]
        fn test_percentages_in_range(pct in percentage_strategy()) {
            prop_assert!(pct >= Decimal::ZERO);
            prop_assert!(pct <= Decimal::ONE_HUNDRED);
        }

        #[test]
        fn test_ops_reference_valid_positions(ops in ledger_ops_strategy(4, 10)) {
            for op in ops {
                let position = match op {
                    LedgerOp::Record { payer, .. } => payer,
                    LedgerOp::Settle { member, .. } => member,
                    LedgerOp::Remove { member } => member,
                };
                prop_assert!(position < 4);
            }
        }
    }
}
