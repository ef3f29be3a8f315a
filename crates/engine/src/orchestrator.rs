//! Sequencing of one advisory run.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use shelfwise_advisory::{AdvisoryPolicy, evaluate};
use shelfwise_core::RunId;
use shelfwise_store::{InventoryStore, SnapshotReader, SupplierNotifier};

use crate::executor::ActionExecutor;
use crate::gateway::{ApprovalGateway, Decision};
use crate::report::{ActionOutcome, OutcomeStatus, RunReport};

/// Fatal run error.
///
/// Per-recommendation failures land in that recommendation's outcome; the
/// only thing that aborts a whole run is failing to load the snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("snapshot read failed: {0}")]
    ReadFailure(String),
}

/// One advisory run: snapshot → rules → approvals → executed actions.
///
/// Strictly sequential by design: evaluation completes before the first
/// approval request, and each approval/execution pair finishes before the
/// next decision is requested, so the operator is never asked about a
/// recommendation derived from a partially applied sibling.
#[derive(Debug)]
pub struct AdvisoryRun<R, G, S, N> {
    reader: R,
    gateway: G,
    executor: ActionExecutor<S, N>,
    policy: AdvisoryPolicy,
}

impl<R, G, S, N> AdvisoryRun<R, G, S, N>
where
    R: SnapshotReader,
    G: ApprovalGateway,
    S: InventoryStore,
    N: SupplierNotifier,
{
    pub fn new(reader: R, gateway: G, store: S, notifier: N) -> Self {
        Self {
            reader,
            gateway,
            executor: ActionExecutor::new(store, notifier),
            policy: AdvisoryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AdvisoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Execute one full advisory pass.
    ///
    /// `reference_date` is the date expiry windows are measured against;
    /// callers pass "today" in production and fixed dates in tests.
    pub fn run(&self, reference_date: NaiveDate) -> Result<RunReport, RunError> {
        let run_id = RunId::new();

        let snapshot = self
            .reader
            .load_snapshot()
            .map_err(|e| RunError::ReadFailure(e.to_string()))?;

        let evaluation = evaluate(&snapshot, reference_date, &self.policy);
        info!(
            %run_id,
            products = snapshot.len(),
            recommendations = evaluation.recommendations.len(),
            skipped = evaluation.skipped.len(),
            "advisory run evaluated"
        );

        // No recommendations: return without ever contacting the operator.
        if evaluation.recommendations.is_empty() {
            return Ok(RunReport {
                run_id,
                outcomes: Vec::new(),
                skipped_products: evaluation.skipped,
            });
        }

        let mut outcomes = Vec::with_capacity(evaluation.recommendations.len());
        for recommendation in &evaluation.recommendations {
            let decision = self.gateway.request_decision(recommendation);
            debug!(
                %run_id,
                product_id = %recommendation.product_id,
                kind = ?recommendation.kind,
                ?decision,
                "decision received"
            );

            let status = match decision {
                Decision::Approved => match self.executor.apply(&recommendation.action) {
                    Ok(detail) => OutcomeStatus::Executed { detail },
                    Err(error) => {
                        warn!(
                            %run_id,
                            product_id = %recommendation.product_id,
                            %error,
                            "approved action failed"
                        );
                        OutcomeStatus::Failed { error }
                    }
                },
                Decision::Rejected => OutcomeStatus::Skipped,
                Decision::TimedOut => OutcomeStatus::TimedOut,
            };

            outcomes.push(ActionOutcome {
                product_id: recommendation.product_id,
                kind: recommendation.kind,
                priority: recommendation.priority,
                status,
            });
        }

        info!(
            %run_id,
            executed = outcomes.iter().filter(|o| o.is_executed()).count(),
            total = outcomes.len(),
            "advisory run finished"
        );

        Ok(RunReport {
            run_id,
            outcomes,
            skipped_products: evaluation.skipped,
        })
    }
}
