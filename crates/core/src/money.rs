use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A currency amount at the precision it was read with.
///
/// Three-decimal prices are kept as printed; only [`Display`](fmt::Display)
/// rounds to cents. Receipts carry no currency code we can trust, so the value
/// is unit-less.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal)
    }

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Whole currency units, usable in constants.
    pub const fn from_units(units: u32) -> Self {
        Money(Decimal::from_parts(units, 0, 0, false, 0))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs_diff(self, other: Money) -> Money {
        Money((self.0 - other.0).abs())
    }
}

impl From<Decimal> for Money {
    fn from(decimal: Decimal) -> Self {
        Money::from_decimal(decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn from_decimal_keeps_sub_cent_digits() {
        assert_eq!(Money::from_decimal(dec("1.250")), Money::from_cents(125));
        assert_ne!(Money::from_decimal(dec("1.234")), Money::from_cents(123));
        assert!(Money::from_decimal(dec("0.004")) > Money::zero());
        assert!(Money::from_decimal(dec("999.999")).as_decimal() < dec("1000"));
    }

    #[test]
    fn display_rounds_to_cents() {
        assert_eq!(Money::from_decimal(dec("1.234")).to_string(), "1.23");
        assert_eq!(Money::from_decimal(dec("0.999")).to_string(), "1.00");
    }

    #[test]
    fn display_always_has_two_places() {
        assert_eq!(Money::from_cents(50).to_string(), "0.50");
        assert_eq!(Money::from_decimal(dec("12")).to_string(), "12.00");
    }

    #[test]
    fn from_units_matches_cents() {
        assert_eq!(Money::from_units(30), Money::from_cents(3000));
    }

    #[test]
    fn abs_diff_is_symmetric() {
        let a = Money::from_cents(1200);
        let b = Money::from_cents(4500);
        assert_eq!(a.abs_diff(b), Money::from_cents(3300));
        assert_eq!(b.abs_diff(a), Money::from_cents(3300));
    }

    #[test]
    fn sum_of_empty_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn serializes_as_plain_decimal() {
        let json = serde_json::to_string(&Money::from_cents(150)).unwrap();
        assert_eq!(json, "\"1.50\"");
        let json = serde_json::to_string(&Money::from_decimal(dec("1.234"))).unwrap();
        assert_eq!(json, "\"1.234\"");
    }
}
