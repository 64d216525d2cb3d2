//! Product domain model.
//!
//! # Responsibility
//! - Define the canonical record produced by the catalog store.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` is store-assigned, positive, and never reused for another record.
//! - `deleted_at` is the source of truth for tombstone state and is never
//!   cleared once set.
//! - `updated_at >= created_at` at all times.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned to every product by the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProductId = u64;

/// Field-level validation errors for product records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `price` is below zero.
    NegativePrice,
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be blank"),
            Self::NegativePrice => write!(f, "product price must not be negative"),
        }
    }
}

impl Error for ProductValidationError {}

/// Canonical record for one product-like entity.
///
/// Records are created and mutated by the store, which owns the identity
/// sequence; `id` and `created_at` are write-once, and `deleted_at` moves
/// from `None` to `Some` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned sequential id. Positive, unique, never reused.
    pub id: ProductId,
    /// Display name. Mutable after creation.
    pub name: String,
    /// Unit price. Mutable after creation, never negative.
    pub price: Decimal,
    /// Creation instant in Unix epoch milliseconds. Write-once.
    pub created_at: i64,
    /// Last mutation instant in Unix epoch milliseconds.
    pub updated_at: i64,
    /// Soft delete tombstone instant. `None` while the record is active.
    pub deleted_at: Option<i64>,
}

impl Product {
    /// Builds a record with both timestamps stamped from `now`.
    ///
    /// The store is the normal author of records: it assigns `id` from its
    /// identity sequence and validates before committing. Constructing one
    /// directly is intended for tests and read-model fixtures.
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, now: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Validates field constraints prior to store mutations.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to nothing.
    /// - `NegativePrice` when `price` is below zero. Zero is allowed.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.price < Decimal::ZERO {
            return Err(ProductValidationError::NegativePrice);
        }
        Ok(())
    }

    /// Refreshes `updated_at` after a field mutation.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now;
    }

    /// Marks this record as softly deleted (tombstoned) at `now`.
    ///
    /// Refreshes `updated_at` from the same instant, so a freshly deleted
    /// record satisfies `updated_at == deleted_at`.
    pub fn mark_deleted(&mut self, now: i64) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Returns whether this record is visible to default listings.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Returns whether this record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
