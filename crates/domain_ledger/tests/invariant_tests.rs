//! Property tests for the zero-sum invariant over random operation histories

use proptest::prelude::*;

use domain_ledger::{LedgerConfig, LedgerService, RecordTransactionRequest, SplitDetails};
use core_kernel::GroupId;
use test_utils::{assert_zero_sum, ledger_ops_strategy, member_id, LedgerOp, SplitChoice, TestGroupBuilder};

const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

fn four_member_service(config: LedgerConfig) -> (LedgerService, GroupId) {
    NAMES
        .iter()
        .enumerate()
        .fold(TestGroupBuilder::new(), |builder, (i, name)| builder.with_member(i as u128 + 1, *name))
        .build_service(config)
}

fn details(entries: &[(usize, rust_decimal::Decimal)]) -> SplitDetails {
    entries
        .iter()
        .map(|(position, value)| (member_id(*position as u128 + 1), *value))
        .collect()
}

fn run(service: &LedgerService, id: GroupId, op: &LedgerOp) -> bool {
    match op {
        LedgerOp::Record { payer, amount, split } => {
            let payer = NAMES[*payer];
            let request = match split {
                SplitChoice::Equal => RecordTransactionRequest::equal("Expense", *amount, payer),
                SplitChoice::Percentage(entries) => {
                    RecordTransactionRequest::percentage("Expense", *amount, payer, details(entries))
                }
                SplitChoice::Dynamic(entries) => {
                    RecordTransactionRequest::dynamic("Expense", *amount, payer, details(entries))
                }
            };
            service.record_transaction(id, request).is_ok()
        }
        LedgerOp::Settle { member, amount } => service
            .settle_member(id, member_id(*member as u128 + 1), *amount)
            .is_ok(),
        LedgerOp::Remove { member } => service
            .remove_member(id, member_id(*member as u128 + 1))
            .is_ok(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_balances_always_sum_to_zero(ops in ledger_ops_strategy(NAMES.len(), 25)) {
        let (service, id) = four_member_service(LedgerConfig::default());

        for op in &ops {
            let before = service.get_group(id).unwrap();
            let succeeded = run(&service, id, op);
            let after = service.get_group(id).unwrap();

            assert_zero_sum(&after);
            if !succeeded {
                prop_assert_eq!(&before, &after, "failed op {:?} changed the group", op);
            }
        }
    }

    #[test]
    fn test_full_settlement_clears_debtor(ops in ledger_ops_strategy(NAMES.len(), 10)) {
        let (service, id) = four_member_service(LedgerConfig::default());
        for op in &ops {
            run(&service, id, op);
        }

        let group = service.get_group(id).unwrap();
        for member in group.members.iter().filter(|m| m.is_debtor()) {
            let receipt = service.settle_member(id, member.id, member.balance.abs().amount()).unwrap();
            prop_assert!(!receipt.outcome.was_capped());
            prop_assert!(receipt.members.iter().any(|m| m.id == member.id && m.is_settled()));
        }

        let settled = service.get_group(id).unwrap();
        prop_assert!(settled.members.iter().all(|m| m.is_settled()));
    }

    #[test]
    fn test_strict_mode_preserves_invariant(ops in ledger_ops_strategy(NAMES.len(), 15)) {
        let config = LedgerConfig {
            strict_split_totals: true,
            reject_overpayment: true,
            ..LedgerConfig::default()
        };
        let (service, id) = four_member_service(config);

        for op in &ops {
            run(&service, id, op);
            assert_zero_sum(&service.get_group(id).unwrap());
        }
    }
}
