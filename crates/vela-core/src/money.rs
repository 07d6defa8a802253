//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Minor Units                                  │
//! │    Every amount is an i64 count of the smallest currency unit.      │
//! │    Subtotals, discounts, tax, shipping, balances - all exact.       │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Currency amounts have two-decimal granularity, which maps exactly
//! onto minor units: `10.99` is stored as `1099`.
//!
//! ## Usage
//! ```rust
//! use vela_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative on overpayment (change due),
///   and a discount larger than the rest of the order makes the final
///   amount negative - both must be representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// unit_price ──► line_total ──► subtotal ──► final_amount ──► balance_due
///                                  ▲
///                   discount / tax / shipping adjustments
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (cents).
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
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
    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(500);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 1500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns a percentage of this amount, rounded half-up.
    ///
    /// Used by the quick-amount payment helper:
    /// `amount_paid = round(final_amount * percent / 100)`.
    ///
    /// ## Implementation
    /// Integer math: `(amount * percent + 50) / 100`. The +50 provides
    /// half-up rounding (50/100 = 0.5). i128 intermediate prevents
    /// overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let total = Money::from_cents(3160);
    /// assert_eq!(total.percent_of(50).cents(), 1580);
    /// assert_eq!(total.percent_of(100), total);
    ///
    /// // 333 * 50% = 166.5 → rounds to 167
    /// assert_eq!(Money::from_cents(333).percent_of(50).cents(), 167);
    /// ```
    pub fn percent_of(&self, percent: u32) -> Money {
        let cents = (self.0 as i128 * percent as i128 + 50) / 100;
        Money::from_cents(cents as i64)
    }

    /// Parses a user-entered decimal string, coercing malformed input to zero.
    ///
    /// This is the one defensive rule at the input boundary: a number that
    /// fails to parse must become `0`, never NaN-style garbage reaching the
    /// total computation. The subsequent validation (e.g., "quantity must
    /// be positive") then rejects the action.
    ///
    /// Accepts an optional leading minus, up to two decimal places. Extra
    /// decimal places, empty strings, and non-numeric text all coerce to
    /// zero.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// assert_eq!(Money::parse_input("10.99").cents(), 1099);
    /// assert_eq!(Money::parse_input("10.5").cents(), 1050);
    /// assert_eq!(Money::parse_input("10").cents(), 1000);
    /// assert_eq!(Money::parse_input("abc").cents(), 0);
    /// assert_eq!(Money::parse_input("").cents(), 0);
    /// ```
    pub fn parse_input(input: &str) -> Money {
        let input = input.trim();

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((m, f)) => (m, f),
            None => (digits, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Money::zero();
        }
        if minor_str.len() > 2 {
            return Money::zero();
        }
        // Sign was already stripped; only bare digits may remain
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major_str) || !all_digits(minor_str) {
            return Money::zero();
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            match major_str.parse() {
                Ok(v) => v,
                Err(_) => return Money::zero(),
            }
        };

        let minor: i64 = if minor_str.is_empty() {
            0
        } else {
            match minor_str.parse::<i64>() {
                // "5" after the dot means 50 cents, "05" means 5
                Ok(v) if minor_str.len() == 1 => v * 10,
                Ok(v) => v,
                Err(_) => return Money::zero(),
            }
        };

        // Digits-only input can still exceed i64 once scaled to cents;
        // oversized amounts coerce to zero like any other malformed input
        let cents = match major.checked_mul(100).and_then(|c| c.checked_add(minor)) {
            Some(c) => c,
            None => return Money::zero(),
        };
        Money(if negative { -cents } else { cents })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display is for debugging and receipts. Locale-aware formatting is the
/// front end's job, not part of the correctness contract.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_subtraction_goes_negative() {
        // Overpayment: balance due = final - paid can be negative
        let final_amount = Money::from_cents(3160);
        let paid = Money::from_cents(4000);
        assert_eq!((final_amount - paid).cents(), -840);
        assert!((final_amount - paid).is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    #[test]
    fn test_percent_of() {
        let total = Money::from_cents(3160);
        assert_eq!(total.percent_of(100).cents(), 3160);
        assert_eq!(total.percent_of(50).cents(), 1580);
        assert_eq!(total.percent_of(25).cents(), 790);
        assert_eq!(total.percent_of(0).cents(), 0);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 333 * 50 / 100 = 166.5 → 167
        assert_eq!(Money::from_cents(333).percent_of(50).cents(), 167);
        // 125 * 10 / 100 = 12.5 → 13
        assert_eq!(Money::from_cents(125).percent_of(10).cents(), 13);
    }

    #[test]
    fn test_parse_input_valid() {
        assert_eq!(Money::parse_input("10.99").cents(), 1099);
        assert_eq!(Money::parse_input("10.5").cents(), 1050);
        assert_eq!(Money::parse_input("10.05").cents(), 1005);
        assert_eq!(Money::parse_input("10").cents(), 1000);
        assert_eq!(Money::parse_input("0").cents(), 0);
        assert_eq!(Money::parse_input(".99").cents(), 99);
        assert_eq!(Money::parse_input(" 7.25 ").cents(), 725);
        assert_eq!(Money::parse_input("-3.50").cents(), -350);
    }

    #[test]
    fn test_parse_input_coerces_garbage_to_zero() {
        assert_eq!(Money::parse_input("").cents(), 0);
        assert_eq!(Money::parse_input("abc").cents(), 0);
        assert_eq!(Money::parse_input("10.999").cents(), 0);
        assert_eq!(Money::parse_input("1,000").cents(), 0);
        assert_eq!(Money::parse_input("12.x").cents(), 0);
        assert_eq!(Money::parse_input("--5").cents(), 0);
    }

    #[test]
    fn test_parse_input_oversized_amount_coerces_to_zero() {
        // Fits i64 as-is but overflows once scaled to cents
        assert_eq!(Money::parse_input("922337203685477590").cents(), 0);
        assert_eq!(Money::parse_input("-922337203685477590").cents(), 0);
        assert_eq!(Money::parse_input("92233720368547758.99").cents(), 0);
        // Doesn't even fit i64: parse fails, same coercion
        assert_eq!(Money::parse_input("99999999999999999999").cents(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_max() {
        let a = Money::from_cents(-50);
        assert_eq!(a.max(Money::zero()), Money::zero());
        let b = Money::from_cents(50);
        assert_eq!(b.max(Money::zero()), b);
    }
}
