//! Core domain logic for HarvestLink.
//! Everything that guards catalog invariants lives in this crate.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::product::{Product, ProductId, ProductValidationError};
pub use repo::product_repo::{
    MemoryProductRepository, ProductPatch, ProductRepository, RepoError, RepoResult,
};
pub use service::product_service::ProductService;

/// Health-check probe for early host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Reports the crate version baked in at compile time.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
