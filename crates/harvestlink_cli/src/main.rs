//! CLI smoke entry point.
//!
//! # Responsibility
//! - Link `harvestlink_core` into a standalone binary as a wiring check.
//! - Print deterministic output for quick local sanity runs.

use harvestlink_core::{MemoryProductRepository, ProductRepository, RepoResult};
use rust_decimal::Decimal;

fn main() {
    // Why: a tiny probe binary proves core wiring without dragging in the
    // Flutter/FFI toolchain.
    println!("harvestlink_core ping={}", harvestlink_core::ping());
    println!(
        "harvestlink_core version={}",
        harvestlink_core::core_version()
    );

    if let Err(err) = run() {
        eprintln!("catalog walkthrough failed: {err}");
        std::process::exit(1);
    }
}

/// Seeds a throwaway catalog and prints both listing views.
///
/// Timestamps are clock-dependent, so output sticks to ids, names, prices
/// and tombstone flags.
fn run() -> RepoResult<()> {
    let mut repo = MemoryProductRepository::new();
    let laptop = repo.create_product("Laptop", Decimal::from(1200))?;
    repo.create_product("Mouse", Decimal::from(25))?;
    repo.soft_delete_product(laptop.id)?;

    println!("visible products:");
    for product in repo.iter_products(false) {
        println!(
            "  id={} name={} price={}",
            product.id, product.name, product.price
        );
    }

    println!("all products:");
    for product in repo.iter_products(true) {
        println!(
            "  id={} name={} price={} deleted={}",
            product.id,
            product.name,
            product.price,
            product.is_deleted()
        );
    }
    Ok(())
}
