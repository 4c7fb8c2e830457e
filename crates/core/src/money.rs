//! Fixed-point money amounts.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A non-negative money amount in integer cents.
///
/// Display precision is exactly two decimals. Arithmetic stays in cents so
/// repeated totalling never drifts.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Sum of `self` and `rhs`, saturating at the numeric bound.
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// `self` minus `rhs`, clamped at zero.
    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    /// `self` scaled by an integer quantity, saturating at the numeric bound.
    pub fn saturating_mul(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }

    /// `percent`% of `self`, rounded half-up to the cent.
    pub fn percent(self, percent: u64) -> Money {
        Money(self.0.saturating_mul(percent).saturating_add(50) / 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses a decimal amount such as `2.5` or `2.50`, rounding to the cent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| DomainError::validation(format!("invalid amount: '{trimmed}'")))?;
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::validation(format!(
                "amount must be non-negative: '{trimmed}'"
            )));
        }
        let cents = (value * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation(format!(
                "amount out of range: '{trimmed}'"
            )));
        }
        Ok(Money(cents as u64))
    }
}
