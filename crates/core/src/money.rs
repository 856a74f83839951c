//! Money value object (non-negative amount in the smallest currency unit).

use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A non-negative amount of money, stored as integer cents.
///
/// Storing cents keeps subtotals and tax exact; `Display` renders dollars with a
/// thousands separator (`$1,234.56`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    /// Convert a decimal dollar amount (e.g. a JSON number) to cents, rounding to
    /// the nearest cent.
    pub fn from_decimal(dollars: f64) -> Result<Self, DomainError> {
        if !dollars.is_finite() || dollars < 0.0 {
            return Err(DomainError::validation(format!(
                "amount must be a non-negative number, got {dollars}"
            )));
        }
        let cents = (dollars * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation("amount out of range"));
        }
        Ok(Self(cents as u64))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Plain decimal rendering without currency symbol or grouping (`1234.56`).
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }

    /// Extended price for `quantity` units.
    ///
    /// Overflow panics in debug builds like integer arithmetic does; use
    /// [`Money::checked_times`] when the amounts are not already bounded.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * u64::from(quantity))
    }

    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(u64::from(quantity)).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by `numerator / denominator` (a fraction of at most one), rounding
    /// half up to the cent.
    pub fn scale(self, numerator: u64, denominator: u64) -> Self {
        debug_assert!(denominator > 0 && numerator <= denominator);
        let scaled = (u128::from(self.0) * u128::from(numerator) + u128::from(denominator) / 2)
            / u128::from(denominator);
        // A fraction of at most one never exceeds the original amount.
        Self(scaled as u64)
    }
}

/// Overflow panics in debug builds; callers that sum unbounded amounts use
/// [`Money::checked_add`].
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (idx, ch) in dollars.chars().enumerate() {
            if idx > 0 && (dollars.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "${}.{:02}", grouped, self.0 % 100)
    }
}

/// Parses plain decimal strings: `"120"`, `"49.9"`, `"49.99"`.
impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("invalid amount: {s:?}"));
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Money)
            .ok_or_else(invalid)
    }
}
