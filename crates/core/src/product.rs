use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::ProductId;
use crate::money::Money;

/// Sales-velocity classification maintained by external sales processes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesVelocity {
    Low,
    Normal,
    High,
}

/// Product record as read from the inventory store.
///
/// Advisory runs treat this as read-only input; the only fields the engine
/// ever writes back (through the store boundary) are `unit_price` on an
/// approved markdown and `removed_from_sale` on an approved write-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Stock on hand. Signed so malformed store rows are representable;
    /// validation rejects negatives.
    pub stock_count: i64,
    pub sales_velocity: SalesVelocity,
    /// `None` for non-perishables (exempt from the expiry rule).
    pub expiry_date: Option<NaiveDate>,
    pub unit_price: Money,
    /// Per-product reorder trigger level.
    pub critical_stock_threshold: i64,
    /// Write-off flag. Removed products stay in the store for auditability.
    #[serde(default)]
    pub removed_from_sale: bool,
}

impl Product {
    /// Check that the record is well-formed enough to evaluate.
    ///
    /// A failing record is skipped by the rules engine; it never aborts the
    /// evaluation of the rest of the snapshot.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.stock_count < 0 {
            return Err(DomainError::validation(format!(
                "stock_count cannot be negative (got {})",
                self.stock_count
            )));
        }
        if self.unit_price.is_negative() {
            return Err(DomainError::validation(format!(
                "unit_price cannot be negative (got {})",
                self.unit_price
            )));
        }
        if self.critical_stock_threshold < 0 {
            return Err(DomainError::validation(format!(
                "critical_stock_threshold cannot be negative (got {})",
                self.critical_stock_threshold
            )));
        }
        Ok(())
    }
}
