//! Product repository contract and in-memory store implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical product collection.
//! - Own the identity sequence and all timestamp stamping.
//!
//! # Invariants
//! - Write paths must call `Product::validate()` before committing.
//! - Assigned ids are strictly increasing, starting at 1, never reused.
//! - Records are kept in creation order and never physically removed.
//! - A failed operation leaves the collection and the sequence untouched.

use crate::model::product::{Product, ProductId, ProductValidationError};
use chrono::Utc;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First id handed out by a fresh store.
const INITIAL_PRODUCT_ID: ProductId = 1;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for product store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input fields violate model constraints.
    InvalidArgument(ProductValidationError),
    /// No active record exists under the given id.
    NotFound(ProductId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ProductValidationError> for RepoError {
    fn from(value: ProductValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

/// Partial update for the mutable product fields.
///
/// `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// Repository interface for product store operations.
///
/// The memory implementation below is the canonical store; the trait keeps
/// service and host layers storage-agnostic.
pub trait ProductRepository {
    /// Creates a record from `name`/`price`, assigning the next id.
    fn create_product(&mut self, name: &str, price: Decimal) -> RepoResult<Product>;
    /// Applies a partial update to an active record.
    fn update_product(&mut self, id: ProductId, patch: &ProductPatch) -> RepoResult<Product>;
    /// Gets one record by id with optional tombstone visibility.
    fn get_product(&self, id: ProductId, include_deleted: bool) -> RepoResult<Option<Product>>;
    /// Lists records in creation order with optional tombstone visibility.
    fn list_products(&self, include_deleted: bool) -> RepoResult<Vec<Product>>;
    /// Soft-deletes an active record by id.
    fn soft_delete_product(&mut self, id: ProductId) -> RepoResult<()>;
}

/// Growable in-memory product store.
///
/// Owns the backing collection and the identity sequence exclusively.
/// State is single-threaded by design: mutators take `&mut self`, and
/// callers sharing a store across threads must guard the whole store with
/// one mutual-exclusion primitive (see `harvestlink_ffi` for the host-side
/// wrapping).
#[derive(Debug)]
pub struct MemoryProductRepository {
    products: Vec<Product>,
    next_id: ProductId,
}

impl MemoryProductRepository {
    /// Creates an empty store with the identity sequence at its start.
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            next_id: INITIAL_PRODUCT_ID,
        }
    }

    /// Lazily iterates records in creation order.
    ///
    /// The iterator borrows the store and restarts from the first record
    /// each time it is requested. With `include_deleted = false`,
    /// tombstoned records are skipped during iteration.
    pub fn iter_products(&self, include_deleted: bool) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| include_deleted || product.is_active())
    }

    /// Returns how many records the store physically holds, tombstones
    /// included.
    pub fn record_count(&self) -> usize {
        self.products.len()
    }

    fn find_active_index(&self, id: ProductId) -> Option<usize> {
        self.products
            .iter()
            .position(|product| product.id == id && product.is_active())
    }
}

impl Default for MemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductRepository for MemoryProductRepository {
    fn create_product(&mut self, name: &str, price: Decimal) -> RepoResult<Product> {
        let candidate = Product::new(self.next_id, name, price, now_epoch_ms());
        candidate.validate()?;

        // The sequence advances only once the record is committed, so a
        // rejected create leaves no id gap.
        self.next_id += 1;
        self.products.push(candidate.clone());
        Ok(candidate)
    }

    fn update_product(&mut self, id: ProductId, patch: &ProductPatch) -> RepoResult<Product> {
        let index = self.find_active_index(id).ok_or(RepoError::NotFound(id))?;

        let mut updated = self.products[index].clone();
        if let Some(name) = patch.name.as_deref() {
            updated.name = name.to_string();
        }
        if let Some(price) = patch.price {
            updated.price = price;
        }
        updated.validate()?;
        updated.touch(now_epoch_ms());

        self.products[index] = updated.clone();
        Ok(updated)
    }

    fn get_product(&self, id: ProductId, include_deleted: bool) -> RepoResult<Option<Product>> {
        let found = self
            .products
            .iter()
            .find(|product| product.id == id && (include_deleted || product.is_active()))
            .cloned();
        Ok(found)
    }

    fn list_products(&self, include_deleted: bool) -> RepoResult<Vec<Product>> {
        Ok(self.iter_products(include_deleted).cloned().collect())
    }

    fn soft_delete_product(&mut self, id: ProductId) -> RepoResult<()> {
        let index = self.find_active_index(id).ok_or(RepoError::NotFound(id))?;
        self.products[index].mark_deleted(now_epoch_ms());
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::now_epoch_ms;

    #[test]
    fn now_epoch_ms_is_past_2020() {
        // 2020-01-01T00:00:00Z in epoch milliseconds.
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }
}
