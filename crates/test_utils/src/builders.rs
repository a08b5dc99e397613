//! Test Data Builders
//!
//! Builders for groups and ledger services. Tests name only the members and
//! balances they care about; everything else gets a sensible default.

use std::sync::Arc;

use core_kernel::{Currency, GroupId, Money};
use domain_ledger::{Group, InMemoryGroupStore, LedgerConfig, LedgerService, Member};
use rust_decimal::Decimal;

use crate::fixtures::{IdFixtures, NameFixtures};

/// Builder for constructing test groups
///
/// Members are added with ids from [`IdFixtures::member`], so the `n`
/// passed in decides their id order.
pub struct TestGroupBuilder {
    id: GroupId,
    title: String,
    currency: Currency,
    members: Vec<Member>,
}

impl Default for TestGroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGroupBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: IdFixtures::group(1),
            title: "Test group".to_string(),
            currency: Currency::USD,
            members: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: GroupId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Adds a member with a zero balance
    pub fn with_member(self, n: u128, name: impl Into<String>) -> Self {
        self.with_member_balance(n, name, Decimal::ZERO)
    }

    /// Adds a member with a starting balance
    ///
    /// The caller is responsible for keeping the balances zero-sum.
    pub fn with_member_balance(mut self, n: u128, name: impl Into<String>, balance: Decimal) -> Self {
        let member = Member::new(IdFixtures::member(n), name, self.currency)
            .with_balance(Money::new(balance, self.currency));
        self.members.push(member);
        self
    }

    /// Adds Alice, Bob and Carol as members 1, 2 and 3
    pub fn with_trio(self) -> Self {
        let [a, b, c] = NameFixtures::trio();
        self.with_member(1, a).with_member(2, b).with_member(3, c)
    }

    /// Builds the group
    ///
    /// # Panics
    ///
    /// Panics on duplicate member names or ids
    pub fn build(self) -> Group {
        let mut group = Group::new(self.id, self.title, self.currency);
        for member in self.members {
            group
                .insert_member(member)
                .expect("test group members must be unique");
        }
        group
    }

    /// Builds the group and a service whose store already holds it
    pub fn build_service(self, config: LedgerConfig) -> (LedgerService, GroupId) {
        let group = self.build();
        let id = group.id;
        let store = Arc::new(InMemoryGroupStore::with_groups([group]));
        (LedgerService::new(store, config), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_defaults() {
        let group = TestGroupBuilder::new().build();
        assert_eq!(group.currency, Currency::USD);
        assert!(group.members.is_empty());
    }

    #[test]
    fn test_builder_with_balances() {
        let group = TestGroupBuilder::new()
            .with_member_balance(1, "Alice", dec!(15))
            .with_member_balance(2, "Bob", dec!(-15))
            .build();

        assert_eq!(group.members.len(), 2);
        assert!(group.verify_zero_sum().is_ok());
    }

    #[test]
    fn test_build_service_seeds_store() {
        let (service, id) = TestGroupBuilder::new().with_trio().build_service(LedgerConfig::default());
        assert_eq!(service.get_group(id).unwrap().members.len(), 3);
    }
}
