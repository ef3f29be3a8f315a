//! Per-run result reporting.

use serde::Serialize;

use shelfwise_advisory::{Priority, RecommendationType, SkippedProduct};
use shelfwise_core::{ProductId, RunId};

use crate::executor::ExecutionError;

/// How one recommendation ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Approved and applied; carries the executor's outcome message.
    Executed { detail: String },
    /// Rejected by the operator; no mutation happened.
    Skipped,
    /// No decision arrived in time; treated as a rejection, no mutation.
    TimedOut,
    /// Approved but execution failed; nothing was committed.
    Failed { error: ExecutionError },
}

/// Result of processing one recommendation.
///
/// Every recommendation yields exactly one of these, approved or not and
/// successful or not; nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub product_id: ProductId,
    pub kind: RecommendationType,
    pub priority: Priority,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl ActionOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Executed { .. })
    }
}

/// Aggregate result of one advisory run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    /// One outcome per recommendation, in presentation order.
    pub outcomes: Vec<ActionOutcome>,
    /// Malformed records the rules engine excluded from evaluation.
    pub skipped_products: Vec<SkippedProduct>,
}

impl RunReport {
    pub fn executed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_executed()).count()
    }
}
