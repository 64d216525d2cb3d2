//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Shape repository operations into host-facing use cases.
//! - Shield FFI/CLI layers from storage details.

pub mod product_service;
