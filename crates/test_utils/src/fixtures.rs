//! Pre-built Test Fixtures
//!
//! Ready-to-use ids, amounts, and names. Ids built from small integers sort
//! in numeric order, which keeps the engines' id tie-breaks predictable.

use core_kernel::{Currency, GroupId, MemberId, Money};
use fake::faker::name::en::FirstName;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a USD amount
    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Ten dollars, the canonical uneven three-way split
    pub fn usd_10() -> Money {
        Money::new(dec!(10.00), Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// Member id that sorts by `n`
    pub fn member(n: u128) -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(n))
    }

    /// Group id that sorts by `n`
    pub fn group(n: u128) -> GroupId {
        GroupId::from_uuid(Uuid::from_u128(n))
    }
}

/// Shorthand for [`IdFixtures::member`]
pub fn member_id(n: u128) -> MemberId {
    IdFixtures::member(n)
}

/// Shorthand for [`MoneyFixtures::usd`]
pub fn usd(amount: Decimal) -> Money {
    MoneyFixtures::usd(amount)
}

/// Fixture for display names
pub struct NameFixtures;

impl NameFixtures {
    /// The usual cast
    pub fn trio() -> [&'static str; 3] {
        ["Alice", "Bob", "Carol"]
    }

    /// A random first name
    pub fn random() -> String {
        FirstName().fake()
    }

    /// `count` random names, unique ignoring case
    pub fn random_unique(count: usize) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(count);
        while names.len() < count {
            let candidate = format!("{} {}", Self::random(), names.len() + 1);
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&candidate)) {
                names.push(candidate);
            }
        }
        names
    }
}
