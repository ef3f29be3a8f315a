use serde::{Deserialize, Serialize};

use shelfwise_core::{Money, ProductId};

/// Kind of advisory recommendation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Reorder,
    Markdown,
    WriteOff,
}

/// Presentation priority.
///
/// Derived `Ord` follows declaration order, so `Critical > Urgent > High`;
/// sorting descending puts write-offs in front of markdowns in front of
/// reorders.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Urgent,
    Critical,
}

/// The single mutation or notification an approved recommendation triggers.
///
/// Each variant touches exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionPayload {
    /// Notify the supplier; no inventory mutation.
    Reorder { product_id: ProductId, quantity: i64 },
    /// Atomic update of the product's unit price.
    Markdown {
        product_id: ProductId,
        new_price: Money,
    },
    /// Flag the product as removed from sale (kept for auditability).
    WriteOff { product_id: ProductId },
}

impl ActionPayload {
    pub fn product_id(&self) -> ProductId {
        match self {
            ActionPayload::Reorder { product_id, .. }
            | ActionPayload::Markdown { product_id, .. }
            | ActionPayload::WriteOff { product_id } => *product_id,
        }
    }
}

/// A derived suggestion awaiting operator approval.
///
/// Ephemeral: created by `evaluate`, consumed within the same run, never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: ProductId,
    pub kind: RecommendationType,
    pub priority: Priority,
    /// Human-readable, product-specific rationale shown to the operator.
    pub message: String,
    pub action: ActionPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_critical_above_urgent_above_high() {
        assert!(Priority::Critical > Priority::Urgent);
        assert!(Priority::Urgent > Priority::High);
    }

    #[test]
    fn action_payload_exposes_its_product_id() {
        let id = ProductId::new();
        let action = ActionPayload::Markdown {
            product_id: id,
            new_price: Money(5400),
        };
        assert_eq!(action.product_id(), id);
    }
}
