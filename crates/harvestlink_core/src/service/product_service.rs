//! Product catalog use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for host-facing callers.
//! - Normalize raw text input once so every caller gets identical
//!   semantics.
//! - Delegate storage to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Service layer remains storage-agnostic.

use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{ProductPatch, ProductRepository, RepoResult};
use rust_decimal::Decimal;

/// Use-case service wrapper for product store operations.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a product from raw host input.
    ///
    /// # Contract
    /// - `name` is trimmed before validation and storage.
    /// - Returns the stored record with its assigned id and timestamps.
    ///
    /// # Errors
    /// - `InvalidArgument` when `name` trims to nothing or `price` is
    ///   negative.
    pub fn create_product(&mut self, name: &str, price: Decimal) -> RepoResult<Product> {
        self.repo.create_product(name.trim(), price)
    }

    /// Applies a partial update to an active product.
    ///
    /// Patch names are trimmed like create-time names. Returns
    /// repository-level not-found or validation errors unchanged.
    ///
    /// # Side effects
    /// - Refreshes `updated_at` on success.
    pub fn update_product(&mut self, id: ProductId, patch: &ProductPatch) -> RepoResult<Product> {
        let normalized = ProductPatch {
            name: patch.name.as_deref().map(|name| name.trim().to_string()),
            price: patch.price,
        };
        self.repo.update_product(id, &normalized)
    }

    /// Gets one product by id with optional tombstone visibility.
    pub fn get_product(&self, id: ProductId, include_deleted: bool) -> RepoResult<Option<Product>> {
        self.repo.get_product(id, include_deleted)
    }

    /// Lists products in creation order.
    ///
    /// Soft-deleted records are excluded unless `include_deleted` is set.
    pub fn list_products(&self, include_deleted: bool) -> RepoResult<Vec<Product>> {
        self.repo.list_products(include_deleted)
    }

    /// Soft-deletes a product by id.
    ///
    /// # Side effects
    /// - Sets `deleted_at` and refreshes `updated_at` from the same
    ///   instant.
    /// - The record disappears from default listings from this point on.
    ///
    /// # Errors
    /// - `NotFound` when no record has this id or it is already deleted.
    pub fn soft_delete_product(&mut self, id: ProductId) -> RepoResult<()> {
        self.repo.soft_delete_product(id)
    }
}
