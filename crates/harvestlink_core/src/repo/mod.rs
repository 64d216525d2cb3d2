//! Repository contracts and the in-memory store implementation.
//!
//! # Responsibility
//! - Fix the data-access seam between services and storage.
//! - Keep collection layout and the identity sequence inside the store
//!   boundary.
//!
//! # Invariants
//! - Write paths validate records before committing them.
//! - Failures surface as semantic errors (`NotFound`, `InvalidArgument`),
//!   never as panics.

pub mod product_repo;
