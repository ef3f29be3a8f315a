//! Named policy constants for the rules engine.

use serde::{Deserialize, Serialize};

/// Tunable thresholds and quantities driving recommendation generation.
///
/// Defaults reproduce the shipped behavior (reorder 50 + 20 surplus, 10%
/// markdown inside a 3-day expiry window); callers that want different
/// merchandising policy override via the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryPolicy {
    /// Base replenishment quantity for any reorder.
    pub base_replenishment_qty: i64,
    /// Extra units ordered for high-velocity products.
    pub high_velocity_surplus: i64,
    /// Price reduction applied on markdown, in whole percent.
    pub markdown_percent: u8,
    /// Products expiring within this many days (exclusive of already
    /// expired) are marked down.
    pub markdown_window_days: i64,
}

impl Default for AdvisoryPolicy {
    fn default() -> Self {
        Self {
            base_replenishment_qty: 50,
            high_velocity_surplus: 20,
            markdown_percent: 10,
            markdown_window_days: 3,
        }
    }
}

impl AdvisoryPolicy {
    pub fn with_base_replenishment_qty(mut self, qty: i64) -> Self {
        self.base_replenishment_qty = qty;
        self
    }

    pub fn with_high_velocity_surplus(mut self, surplus: i64) -> Self {
        self.high_velocity_surplus = surplus;
        self
    }

    pub fn with_markdown_percent(mut self, percent: u8) -> Self {
        self.markdown_percent = percent;
        self
    }

    pub fn with_markdown_window_days(mut self, days: i64) -> Self {
        self.markdown_window_days = days;
        self
    }

    /// Quantity ordered for a high-velocity reorder.
    pub fn reorder_quantity(&self) -> i64 {
        self.base_replenishment_qty + self.high_velocity_surplus
    }
}
