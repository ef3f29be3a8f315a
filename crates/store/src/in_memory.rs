use std::collections::HashMap;
use std::sync::{
    Mutex, RwLock,
    atomic::{AtomicBool, Ordering},
};

use shelfwise_core::{Money, Product, ProductId};

use crate::{InventoryStore, SnapshotReader, StoreError, SupplierNotifier};

/// In-memory product store.
///
/// Intended for tests/dev. Mutations take the whole-map write lock, which
/// serializes concurrent updates to the same product.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    products: RwLock<HashMap<ProductId, Product>>,
    /// When set, reads fail with `ReadFailure` (to exercise the fatal path).
    fail_reads: AtomicBool,
    /// When set, writes fail with `Persistence` without mutating anything.
    fail_writes: AtomicBool,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with the given products, replacing any existing rows.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        store.insert_all(products);
        store
    }

    pub fn insert_all(&self, products: impl IntoIterator<Item = Product>) {
        let mut map = self.products.write().expect("product map lock poisoned");
        for p in products {
            map.insert(p.id, p);
        }
    }

    pub fn remove(&self, product_id: ProductId) -> Option<Product> {
        self.products
            .write()
            .expect("product map lock poisoned")
            .remove(&product_id)
    }

    pub fn get(&self, product_id: ProductId) -> Option<Product> {
        self.products
            .read()
            .expect("product map lock poisoned")
            .get(&product_id)
            .cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn mutate(
        &self,
        product_id: ProductId,
        f: impl FnOnce(&mut Product),
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence(
                "simulated write failure".to_string(),
            ));
        }

        let mut map = self
            .products
            .write()
            .map_err(|_| StoreError::Persistence("lock poisoned".to_string()))?;
        let product = map.get_mut(&product_id).ok_or(StoreError::NotFound)?;
        f(product);
        Ok(())
    }
}

impl SnapshotReader for InMemoryInventoryStore {
    fn load_snapshot(&self) -> Result<Vec<Product>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ReadFailure(
                "simulated read failure".to_string(),
            ));
        }

        let map = self
            .products
            .read()
            .map_err(|_| StoreError::ReadFailure("lock poisoned".to_string()))?;
        let mut snapshot: Vec<Product> = map.values().cloned().collect();
        // HashMap iteration order is arbitrary; sort for reproducible runs.
        snapshot.sort_by_key(|p| *p.id.as_uuid());
        Ok(snapshot)
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn update_price(&self, product_id: ProductId, new_price: Money) -> Result<(), StoreError> {
        self.mutate(product_id, |p| p.unit_price = new_price)
    }

    fn flag_removed(&self, product_id: ProductId) -> Result<(), StoreError> {
        self.mutate(product_id, |p| p.removed_from_sale = true)
    }
}

/// Supplier notifier that records every order it is asked to place.
///
/// A failure toggle simulates an unavailable channel for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    orders: Mutex<Vec<(ProductId, i64)>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn orders(&self) -> Vec<(ProductId, i64)> {
        self.orders.lock().expect("orders lock poisoned").clone()
    }
}

impl SupplierNotifier for RecordingNotifier {
    fn notify_supplier(&self, product_id: ProductId, quantity: i64) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Delivery(
                "supplier channel unavailable".to_string(),
            ));
        }
        self.orders
            .lock()
            .map_err(|_| StoreError::Delivery("orders lock poisoned".to_string()))?
            .push((product_id, quantity));
        Ok(())
    }
}
