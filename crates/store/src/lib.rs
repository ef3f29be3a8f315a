//! `shelfwise-store` — the storage boundary.
//!
//! Traits for reading product snapshots and applying the three mutations the
//! advisory engine is allowed to make, plus an in-memory backend used by
//! tests and the demo binary. A SQL-backed implementation would live behind
//! the same traits.

pub mod in_memory;

use thiserror::Error;

use shelfwise_core::{Money, Product, ProductId};

/// Storage boundary error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The product vanished between snapshot and execution.
    #[error("product not found")]
    NotFound,

    /// A store-level write failure. The mutation was not applied.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// The supplier notification channel is unavailable.
    #[error("delivery failure: {0}")]
    Delivery(String),

    /// Snapshot load failed. Fatal to the advisory run.
    #[error("snapshot read failed: {0}")]
    ReadFailure(String),
}

/// Read-only, point-in-time view of the product records.
pub trait SnapshotReader {
    /// Load all product records needed for one advisory run.
    ///
    /// Errors surface as `StoreError::ReadFailure` and abort the run before
    /// any operator interaction.
    fn load_snapshot(&self) -> Result<Vec<Product>, StoreError>;
}

/// The two persistent mutations the advisory engine may apply.
///
/// Each call is atomic per product: either the full field update commits or
/// nothing does. Implementations serving concurrent runs must serialize
/// mutations per product identity.
pub trait InventoryStore {
    /// Atomically overwrite the product's unit price.
    fn update_price(&self, product_id: ProductId, new_price: Money) -> Result<(), StoreError>;

    /// Flag the product as removed from sale. Not a delete; the record stays
    /// for auditability.
    fn flag_removed(&self, product_id: ProductId) -> Result<(), StoreError>;
}

/// Side-effecting supplier order channel.
///
/// Retry policy belongs to the channel, not to the advisory engine; a
/// `Delivery` failure is reported, never retried here.
pub trait SupplierNotifier {
    fn notify_supplier(&self, product_id: ProductId, quantity: i64) -> Result<(), StoreError>;
}

// Shared backends are commonly handed around as `Arc<Store>`; let the
// wrappers satisfy the traits directly.
impl<T: SnapshotReader + ?Sized> SnapshotReader for std::sync::Arc<T> {
    fn load_snapshot(&self) -> Result<Vec<Product>, StoreError> {
        (**self).load_snapshot()
    }
}

impl<T: InventoryStore + ?Sized> InventoryStore for std::sync::Arc<T> {
    fn update_price(&self, product_id: ProductId, new_price: Money) -> Result<(), StoreError> {
        (**self).update_price(product_id, new_price)
    }

    fn flag_removed(&self, product_id: ProductId) -> Result<(), StoreError> {
        (**self).flag_removed(product_id)
    }
}

impl<T: SupplierNotifier + ?Sized> SupplierNotifier for std::sync::Arc<T> {
    fn notify_supplier(&self, product_id: ProductId, quantity: i64) -> Result<(), StoreError> {
        (**self).notify_supplier(product_id, quantity)
    }
}

pub use in_memory::{InMemoryInventoryStore, RecordingNotifier};
