//! Monetary amounts in minor currency units.

use serde::{Deserialize, Serialize};

/// Amount in the smallest currency unit (e.g., cents).
///
/// Signed so that malformed store records (negative prices) are representable
/// and can be rejected by validation instead of panicking at the boundary.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor_units(amount: i64) -> Self {
        Self(amount)
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Reduce by a whole percentage, truncating toward zero.
    ///
    /// `Money(6000).reduce_percent(10) == Money(5400)`.
    pub fn reduce_percent(&self, percent: u8) -> Money {
        let keep = 100 - i64::from(percent.min(100));
        Money(self.0 * keep / 100)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
