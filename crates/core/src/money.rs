use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An exact monetary amount with two-digit fractional precision.
/// Backed by a decimal, never a float, so amounts compare without
/// rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).to_i64().unwrap_or(0)
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Parse an amount string as it appears on receipts, tolerating
    /// comma thousands separators ("1,234.56").
    pub fn parse_str(s: &str) -> Option<Self> {
        let clean = s.replace(',', "");
        Decimal::from_str(&clean).ok().map(Money::from_decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_two_fractional_digits() {
        assert_eq!(Money::from_cents(2350).to_string(), "$23.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    }

    #[test]
    fn parse_str_plain_and_with_commas() {
        assert_eq!(Money::parse_str("45.67"), Some(Money::from_cents(4567)));
        assert_eq!(Money::parse_str("1,234.56"), Some(Money::from_cents(123456)));
        assert_eq!(Money::parse_str("0.01"), Some(Money::from_cents(1)));
        assert_eq!(Money::parse_str("not money"), None);
    }

    #[test]
    fn ordering_is_exact() {
        assert!(Money::from_cents(4567) > Money::from_cents(4000));
        // 0.10 vs 0.1 would diverge under f64 arithmetic chains; decimals don't.
        assert_eq!(Money::parse_str("0.10"), Some(Money::from_cents(10)));
    }

    #[test]
    fn cents_roundtrip() {
        assert_eq!(Money::from_cents(123456).to_cents(), 123456);
    }
}
