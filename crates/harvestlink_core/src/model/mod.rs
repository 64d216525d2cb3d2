//! Domain model for the product catalog core.
//!
//! # Responsibility
//! - Hold the canonical record shape the rest of the workspace consumes.
//!
//! # Invariants
//! - Records carry a store-assigned `ProductId` for their whole life.
//! - Removal is a soft-delete tombstone; nothing is physically erased.

pub mod product;
