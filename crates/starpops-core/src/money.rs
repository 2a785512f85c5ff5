//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A sale split three ways at the pesewa level must re-aggregate to       │
//! │  byte-identical summaries no matter how often we recompute them.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pesewas (cents)                                  │
//! │    GHS 50.00 = 5000 cents; every bucket amount is an exact integer.     │
//! │    "round2" from the books is absorbed by the representation itself.    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Parts-Per-Million Rates?
//! The business has used allocation percentages like 6.944% and 5.556%.
//! Basis points (1/100 of a percent) cannot represent those exactly, so
//! rates are stored in parts-per-million: 6.944% = 69,440 ppm.
//!
//! ## Usage
//! ```rust
//! use starpops_core::money::{Money, Rate};
//!
//! let total = Money::from_cents(5000);          // GHS 50.00
//! let payroll = total.allocate(Rate::from_percent(6.944));
//! assert_eq!(payroll.cents(), 347);             // GHS 3.47
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// One whole percent, in parts-per-million.
const PPM_PER_PERCENT: u32 = 10_000;

/// 100%, in parts-per-million.
pub const PPM_FULL: u32 = 1_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (pesewas/cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates (e.g. raw cash position)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support (serialized as integer cents)
///
/// ## Where Money Flows
/// ```text
/// quantity × unit price ──► Sale.total ──► scheme buckets ──► summaries
/// ```
/// Every monetary value in the system flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use starpops_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // GHS 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding at the cent.
    ///
    /// Rounding is half-away-from-zero ("round2" in the books):
    /// `10.995 → 11.00`, `-10.995 → -11.00`.
    ///
    /// ## Example
    /// ```rust
    /// use starpops_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(3.47).cents(), 347);
    /// assert_eq!(Money::from_f64(2.775).cents(), 278);
    /// ```
    #[inline]
    pub fn from_f64(amount: f64) -> Self {
        // f64::round is round-half-away-from-zero, matching round2 semantics
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (cedis) portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the larger of `self` and `other`.
    #[inline]
    pub const fn max(self, other: Money) -> Money {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// Allocates a percentage slice of this amount, rounding at the cent.
    ///
    /// This is the single point where a split bucket amount is computed:
    /// `round2(total * percent / 100)` done entirely in integer math.
    ///
    /// ## Implementation
    /// `(cents * ppm ± 500_000) / 1_000_000` in i128 to prevent overflow,
    /// with the half-cent bias applied away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use starpops_core::money::{Money, Rate};
    ///
    /// let total = Money::from_cents(5000);            // GHS 50.00
    /// let savings = total.allocate(Rate::from_percent(5.556));
    /// assert_eq!(savings.cents(), 278);               // GHS 2.78
    /// ```
    pub fn allocate(&self, rate: Rate) -> Money {
        let product = self.0 as i128 * rate.ppm() as i128;
        let half = (PPM_FULL / 2) as i128;
        let cents = if product >= 0 {
            (product + half) / PPM_FULL as i128
        } else {
            (product - half) / PPM_FULL as i128
        };
        Money(cents as i64)
    }

    /// Scales this amount by a (possibly fractional) quantity, rounding at
    /// the cent. Used for `total = round2(quantity * price)` where sales
    /// quantities may be fractional (e.g. 2.5 kg of kernels).
    ///
    /// ## Example
    /// ```rust
    /// use starpops_core::money::Money;
    ///
    /// let price = Money::from_cents(500);        // GHS 5.00
    /// assert_eq!(price.scale(10.0).cents(), 5000);
    /// assert_eq!(price.scale(2.5).cents(), 1250);
    /// ```
    pub fn scale(&self, quantity: f64) -> Money {
        Money((self.0 as f64 * quantity).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the plain decimal form used in rows and CSV: `"3.47"`.
///
/// ## Note
/// No currency symbol here. "GHS" is a display concern; the canonical
/// row encoding stores bare decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Error parsing a decimal monetary string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid monetary value: '{0}'")]
pub struct ParseMoneyError(pub String);

/// Parses the plain decimal form (`"3.47"`, `"12"`, `"-0.5"`).
///
/// Values with more than two decimal places are rounded at the cent, since
/// historical spreadsheet rows occasionally carry float noise.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ParseMoneyError(s.to_string()))?;
        if !value.is_finite() {
            return Err(ParseMoneyError(s.to_string()));
        }
        Ok(Money::from_f64(value))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer quantity (e.g. loss units).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// An allocation percentage stored in parts-per-million.
///
/// ## Why Parts-Per-Million?
/// 1 ppm = 0.0001%; 69,440 ppm = 6.944%.
/// The observed split tables use three-decimal percentages, which basis
/// points cannot represent exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from parts-per-million.
    #[inline]
    pub const fn from_ppm(ppm: u32) -> Self {
        Rate(ppm)
    }

    /// Creates a rate from a percentage (for convenience).
    ///
    /// Negative or non-finite inputs saturate to zero; configuration
    /// deserialization rejects them earlier with a proper error.
    pub fn from_percent(pct: f64) -> Self {
        Rate((pct * PPM_PER_PERCENT as f64).round() as u32)
    }

    /// Returns the rate in parts-per-million.
    #[inline]
    pub const fn ppm(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / PPM_PER_PERCENT as f64
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Rates serialize as percentages, the unit scheme configuration files use.
impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percent())
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        if !pct.is_finite() || pct < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "rate percentage must be a non-negative number, got {pct}"
            )));
        }
        Ok(Rate::from_percent(pct))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_f64_rounds_half_away_from_zero() {
        assert_eq!(Money::from_f64(10.995).cents(), 1100);
        assert_eq!(Money::from_f64(-10.995).cents(), -1100);
        assert_eq!(Money::from_f64(3.474).cents(), 347);
        assert_eq!(Money::from_f64(0.0).cents(), 0);
    }

    #[test]
    fn test_display_plain_decimal() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_parse_round_trips_display() {
        for cents in [0, 1, 99, 100, 1099, -550, 123456789] {
            let money = Money::from_cents(cents);
            let parsed: Money = money.to_string().parse().unwrap();
            assert_eq!(parsed, money);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("NaN".parse::<Money>().is_err());
        assert!("inf".parse::<Money>().is_err());
    }

    #[test]
    fn test_parse_accepts_float_noise() {
        // Historical sheet rows sometimes carry float artifacts
        let money: Money = "3.4700000000000002".parse().unwrap();
        assert_eq!(money.cents(), 347);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_allocate_exact_percentages() {
        let total = Money::from_cents(5000); // GHS 50.00
        assert_eq!(total.allocate(Rate::from_percent(63.0)).cents(), 3150);
        assert_eq!(total.allocate(Rate::from_percent(12.0)).cents(), 600);
        assert_eq!(total.allocate(Rate::from_percent(6.944)).cents(), 347);
        assert_eq!(total.allocate(Rate::from_percent(5.556)).cents(), 278);
    }

    #[test]
    fn test_allocate_zero_cases() {
        assert_eq!(Money::zero().allocate(Rate::from_percent(63.0)), Money::zero());
        assert_eq!(Money::from_cents(5000).allocate(Rate::zero()), Money::zero());
    }

    #[test]
    fn test_allocate_large_amount_no_overflow() {
        let total = Money::from_cents(i64::MAX / 2);
        // Must not panic; i128 intermediate absorbs the product
        let _ = total.allocate(Rate::from_ppm(PPM_FULL));
    }

    #[test]
    fn test_scale_fractional_quantity() {
        let price = Money::from_cents(250); // GHS 2.50
        assert_eq!(price.scale(5.0).cents(), 1250);
        assert_eq!(price.scale(2.5).cents(), 625);
        assert_eq!(price.scale(0.0).cents(), 0);
    }

    #[test]
    fn test_rate_ppm_and_percent() {
        let rate = Rate::from_percent(6.944);
        assert_eq!(rate.ppm(), 69_440);
        assert!((rate.percent() - 6.944).abs() < 1e-9);
    }

    #[test]
    fn test_rate_serde_uses_percent() {
        let rate = Rate::from_percent(6.944);
        let json = serde_json::to_string(&rate).unwrap();
        let back: Rate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);

        assert!(serde_json::from_str::<Rate>("-1.0").is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
