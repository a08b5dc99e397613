//! Money types with precise decimal arithmetic
//!
//! Ledger balances must net to exactly zero, so every `Money` value is held
//! at its currency's minor-unit precision (cents for USD). Arithmetic never
//! goes through floating point.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    INR,
    AUD,
    CAD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::INR => "₹",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::INR => "INR",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
        }
    }

    fn minor_factor(&self) -> Decimal {
        Decimal::new(10_i64.pow(self.decimal_places()), 0)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// The amount is always stored at the currency's minor-unit precision.
/// Use [`Money::exact`] for caller-supplied amounts that must not be rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, rounding half-to-even to the minor unit
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(currency.decimal_places()),
            currency,
        }
    }

    /// Creates a Money value only if `amount` is representable in minor units
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAmount` if the amount carries more decimal
    /// places than the currency allows (e.g. `10.005` USD).
    pub fn exact(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let dp = currency.decimal_places();
        if amount.round_dp(dp) != amount {
            return Err(MoneyError::InvalidAmount(format!(
                "{} has more than {} decimal places for {}",
                amount, dp, currency
            )));
        }
        Ok(Self::new(amount, currency))
    }

    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor_units, 0) / currency.minor_factor(), currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount expressed in whole minor units
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the scaled amount does not fit a `Decimal`
    pub fn to_minor(&self) -> Result<i128, MoneyError> {
        let scaled = self
            .amount
            .checked_mul(self.currency.minor_factor())
            .ok_or(MoneyError::Overflow)?;
        Ok(scaled.round().mantissa())
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// Returns the smaller of two amounts in the same currency
    pub fn min(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(if self.amount <= other.amount { *self } else { *other })
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency))
    }

    /// Splits the amount into `n` floor-rounded parts
    ///
    /// Returns the per-part base amount and the number of minor units left
    /// over (`amount - base * n`). The leftover is always less than `n`.
    pub fn split_evenly(&self, n: u32) -> Result<(Money, u32), MoneyError> {
        if n == 0 {
            return Err(MoneyError::InvalidAmount("Cannot split into zero parts".to_string()));
        }
        if self.is_negative() {
            return Err(MoneyError::InvalidAmount(format!("Cannot split negative amount {}", self)));
        }

        let total_minor = self.to_minor()?;
        let base_minor = total_minor / n as i128;
        let leftover = (total_minor - base_minor * n as i128) as u32;
        let base_minor = i64::try_from(base_minor).map_err(|_| MoneyError::Overflow)?;

        Ok((Money::from_minor(base_minor, self.currency), leftover))
    }

    /// Returns one minor unit of this money's currency (e.g. one cent)
    pub fn minor_unit(&self) -> Money {
        Money::from_minor(1, self.currency)
    }

    /// Sums an iterator of amounts, failing on the first currency mismatch
    pub fn try_sum<'a, I>(currency: Currency, amounts: I) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl PartialOrd for Money {
    /// Amounts in different currencies are not comparable
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        self.amount.partial_cmp(&other.amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

/// A percentage share (e.g. a member's portion of an expense)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.30 for 30%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a percentage (e.g., 30 for 30%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Applies this rate to a money amount, rounding half-to-even to the minor unit
    pub fn apply(&self, money: &Money) -> Result<Money, MoneyError> {
        let product = money
            .amount()
            .checked_mul(self.value)
            .ok_or(MoneyError::Overflow)?;
        Ok(Money::new(
            product.round_dp_with_strategy(
                money.currency().decimal_places(),
                RoundingStrategy::MidpointNearestEven,
            ),
            money.currency(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_rounds_to_minor_unit() {
        let m = Money::new(dec!(100.505), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_exact_rejects_sub_cent_amounts() {
        let result = Money::exact(dec!(10.005), Currency::USD);
        assert!(matches!(result, Err(MoneyError::InvalidAmount(_))));
        assert!(Money::exact(dec!(10.05), Currency::USD).is_ok());
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050, Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.to_minor().unwrap(), 10050);
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(dec!(100.00), Currency::USD);
        let eur = Money::new(dec!(100.00), Currency::EUR);

        let result = usd.checked_add(&eur);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
        assert_eq!(usd.partial_cmp(&eur), None);
    }

    #[test]
    fn test_split_evenly_reports_leftover_cents() {
        let m = Money::new(dec!(10.00), Currency::USD);
        let (base, leftover) = m.split_evenly(3).unwrap();

        assert_eq!(base.amount(), dec!(3.33));
        assert_eq!(leftover, 1);
    }

    #[test]
    fn test_to_minor_overflow_is_an_error() {
        let m = Money::new(Decimal::MAX, Currency::USD);
        assert_eq!(m.to_minor(), Err(MoneyError::Overflow));
        assert_eq!(m.split_evenly(3), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_negative_zero_is_neither_sign() {
        let m = -Money::zero(Currency::USD);
        assert!(!m.is_negative());
        assert!(!m.is_positive());
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(30));
        let amount = Money::new(dec!(100.00), Currency::USD);

        assert_eq!(rate.apply(&amount).unwrap().amount(), dec!(30.00));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn split_evenly_reassembles_original(
            amount in 1i64..1_000_000_000i64,
            parts in 1u32..100u32
        ) {
            let money = Money::from_minor(amount, Currency::USD);
            let (base, leftover) = money.split_evenly(parts).unwrap();

            prop_assert!(leftover < parts);
            prop_assert_eq!(base.to_minor().unwrap() * parts as i128 + leftover as i128, amount as i128);
        }

        #[test]
        fn checked_add_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::USD);
            let mb = Money::from_minor(b, Currency::USD);
            let mc = Money::from_minor(c, Currency::USD);

            let left = ma.checked_add(&mb).unwrap().checked_add(&mc).unwrap();
            let right = ma.checked_add(&mb.checked_add(&mc).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }
    }
}
