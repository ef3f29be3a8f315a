//! Execution of approved actions against the store boundary.

use serde::Serialize;
use thiserror::Error;

use shelfwise_advisory::ActionPayload;
use shelfwise_store::{InventoryStore, StoreError, SupplierNotifier};

/// Per-action execution failure.
///
/// Captured into the action's outcome; never fatal to the run and never
/// propagated to sibling recommendations.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum ExecutionError {
    /// The product vanished between snapshot and execution (stale snapshot).
    #[error("product no longer exists")]
    NotFound,

    /// Store write failed; nothing was committed.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Supplier notification channel unavailable. Not retried here; retry
    /// policy belongs to the channel.
    #[error("delivery failure: {0}")]
    Delivery(String),
}

impl From<StoreError> for ExecutionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ExecutionError::NotFound,
            StoreError::Persistence(msg) => ExecutionError::Persistence(msg),
            StoreError::Delivery(msg) => ExecutionError::Delivery(msg),
            // Reads don't happen during execution; a backend surfacing this
            // here is misbehaving, treat it as a store failure.
            StoreError::ReadFailure(msg) => ExecutionError::Persistence(msg),
        }
    }
}

/// Applies exactly one persistent mutation or external notification per
/// approved action.
#[derive(Debug)]
pub struct ActionExecutor<S, N> {
    store: S,
    notifier: N,
}

impl<S: InventoryStore, N: SupplierNotifier> ActionExecutor<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Execute one approved action, returning a human-readable outcome.
    ///
    /// Each arm touches exactly one product and performs exactly one store
    /// call; atomicity per product is the store's contract.
    pub fn apply(&self, action: &ActionPayload) -> Result<String, ExecutionError> {
        match action {
            ActionPayload::Reorder {
                product_id,
                quantity,
            } => {
                self.notifier.notify_supplier(*product_id, *quantity)?;
                Ok(format!(
                    "supplier order placed: {quantity} units of product {product_id}"
                ))
            }
            ActionPayload::Markdown {
                product_id,
                new_price,
            } => {
                self.store.update_price(*product_id, *new_price)?;
                Ok(format!(
                    "unit price of product {product_id} updated to {new_price}"
                ))
            }
            ActionPayload::WriteOff { product_id } => {
                self.store.flag_removed(*product_id)?;
                Ok(format!("product {product_id} removed from sale"))
            }
        }
    }
}
