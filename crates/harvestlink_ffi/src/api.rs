//! FFI entry points for the Flutter shell.
//!
//! # Responsibility
//! - Give Dart a stable, use-case-level catalog API via FRB.
//! - Flatten core errors into envelope messages the UI can show as-is.
//!
//! # Invariants
//! - Nothing exported here may panic across the FFI boundary.
//! - The process-wide catalog is guarded by a single mutex; every call
//!   locks it for its full duration.

use harvestlink_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    MemoryProductRepository, Product, ProductPatch, ProductService, RepoResult,
};
use log::info;
use rust_decimal::Decimal;
use std::sync::{Mutex, OnceLock};

static CATALOG: OnceLock<Mutex<ProductService<MemoryProductRepository>>> = OnceLock::new();

/// Health-check probe for FRB smoke integration.
///
/// # FFI contract
/// - Sync, non-blocking, UI-thread safe.
/// - Never throws; the reply is always a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Reports the linked core crate version.
///
/// # FFI contract
/// - Sync, non-blocking, UI-thread safe.
/// - Never throws; the reply is always a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Brings up Rust-side file logging once per process.
///
/// Input semantics:
/// - `level`: `trace|debug|info|warn|error` (case-insensitive); blank
///   selects the build-profile default.
/// - `log_dir`: absolute directory that will hold the rolling log files.
///
/// # FFI contract
/// - Sync call; touches the file system during first-time setup.
/// - Calling again with the active configuration is a no-op.
/// - Calling again with a different configuration reports an error.
/// - Never panics; an empty return string means success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let effective_level = if level.trim().is_empty() {
        harvestlink_core::default_log_level()
    } else {
        level.as_str()
    };
    match init_logging_inner(effective_level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Read-model projection of one catalog product for Dart consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    /// Store-assigned sequential id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Unit price rendered as decimal text (e.g. `1200` or `19.99`).
    pub price: String,
    /// Creation instant in Unix epoch milliseconds.
    pub created_at: i64,
    /// Last mutation instant in Unix epoch milliseconds.
    pub updated_at: i64,
    /// Tombstone instant in Unix epoch milliseconds; `None` while active.
    pub deleted_at: Option<i64>,
}

/// Generic action response envelope for catalog command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected product projection, when the operation yields one.
    pub product: Option<ProductView>,
    /// Operator-facing text describing the outcome.
    pub message: String,
}

impl ProductActionResponse {
    fn success(message: impl Into<String>, product: Option<ProductView>) -> Self {
        Self {
            ok: true,
            product,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            product: None,
            message: message.into(),
        }
    }
}

/// Listing response envelope for catalog query flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListResponse {
    /// Products in creation order (empty when the catalog has none).
    pub items: Vec<ProductView>,
    /// Operator-facing text describing the outcome.
    pub message: String,
    /// Effective applied tombstone visibility.
    pub include_deleted: bool,
}

/// Creates a product in the process-wide catalog.
///
/// Input semantics:
/// - `name`: display name; trimmed before validation.
/// - `price`: decimal text (e.g. `1200` or `19.99`).
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Returns operation result and the stored product on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_create_product(name: String, price: String) -> ProductActionResponse {
    let price = match parse_price(&price) {
        Ok(value) => value,
        Err(err) => {
            return ProductActionResponse::failure(format!("entry_create_product failed: {err}"))
        }
    };
    match with_catalog(|service| service.create_product(name.trim(), price)) {
        Ok(product) => {
            ProductActionResponse::success("Product created.", Some(to_product_view(&product)))
        }
        Err(err) => ProductActionResponse::failure(format!("entry_create_product failed: {err}")),
    }
}

/// Fetches one product by id.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - `ok` is true exactly when a product was found under `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_get_product(id: u64, include_deleted: Option<bool>) -> ProductActionResponse {
    let visibility = normalize_include_deleted(include_deleted);
    match with_catalog(|service| service.get_product(id, visibility)) {
        Ok(Some(product)) => {
            ProductActionResponse::success("Product found.", Some(to_product_view(&product)))
        }
        Ok(None) => ProductActionResponse::failure(format!(
            "entry_get_product failed: product not found: {id}"
        )),
        Err(err) => ProductActionResponse::failure(format!("entry_get_product failed: {err}")),
    }
}

/// Lists catalog products in creation order.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Soft-deleted products are excluded unless `include_deleted` is true.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list_products(include_deleted: Option<bool>) -> ProductListResponse {
    let visibility = normalize_include_deleted(include_deleted);
    match with_catalog(|service| service.list_products(visibility)) {
        Ok(products) => {
            let items = products.iter().map(to_product_view).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No products.".to_string()
            } else {
                format!("Found {} product(s).", items.len())
            };
            ProductListResponse {
                items,
                message,
                include_deleted: visibility,
            }
        }
        Err(err) => ProductListResponse {
            items: Vec::new(),
            message: format!("entry_list_products failed: {err}"),
            include_deleted: visibility,
        },
    }
}

/// Applies a partial update to an active product.
///
/// Input semantics:
/// - `name`: replacement display name when present; trimmed.
/// - `price`: replacement price as decimal text when present.
/// - Absent fields keep their stored values.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Returns operation result and the updated product on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_update_product(
    id: u64,
    name: Option<String>,
    price: Option<String>,
) -> ProductActionResponse {
    let price = match price.as_deref().map(parse_price).transpose() {
        Ok(value) => value,
        Err(err) => {
            return ProductActionResponse::failure(format!("entry_update_product failed: {err}"))
        }
    };
    let patch = ProductPatch { name, price };
    match with_catalog(|service| service.update_product(id, &patch)) {
        Ok(product) => {
            ProductActionResponse::success("Product updated.", Some(to_product_view(&product)))
        }
        Err(err) => ProductActionResponse::failure(format!("entry_update_product failed: {err}")),
    }
}

/// Soft-deletes an active product by id.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Deleting a missing or already-deleted product reports failure.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_product(id: u64) -> ProductActionResponse {
    match with_catalog(|service| service.soft_delete_product(id)) {
        Ok(()) => ProductActionResponse::success("Product deleted.", None),
        Err(err) => ProductActionResponse::failure(format!("entry_delete_product failed: {err}")),
    }
}

fn normalize_include_deleted(include_deleted: Option<bool>) -> bool {
    include_deleted.unwrap_or(false)
}

fn parse_price(raw: &str) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    trimmed
        .parse::<Decimal>()
        .map_err(|_| format!("price '{trimmed}' is not decimal text"))
}

fn with_catalog<T>(
    f: impl FnOnce(&mut ProductService<MemoryProductRepository>) -> RepoResult<T>,
) -> Result<T, String> {
    let catalog = CATALOG.get_or_init(|| {
        info!("event=catalog_init module=ffi status=ok");
        Mutex::new(ProductService::new(MemoryProductRepository::new()))
    });
    let mut service = catalog
        .lock()
        .map_err(|_| "catalog lock poisoned".to_string())?;
    f(&mut service).map_err(|err| err.to_string())
}

fn to_product_view(product: &Product) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name.clone(),
        price: product.price.to_string(),
        created_at: product.created_at,
        updated_at: product.updated_at,
        deleted_at: product.deleted_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, entry_create_product, entry_delete_product, entry_get_product,
        entry_list_products, entry_update_product, init_logging, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_answers_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn core_version_is_nonempty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_requires_a_log_dir() {
        let error = init_logging("info".to_string(), "  ".to_string());
        assert!(error.contains("blank"));
    }

    #[test]
    fn init_logging_rejects_unknown_level() {
        // The relative dir keeps this failing fast even for valid levels.
        let error = init_logging("verbose".to_string(), "relative/logs".to_string());
        assert!(error.contains("unknown log level"));
    }

    #[test]
    fn init_logging_defaults_the_level_when_blank() {
        let error = init_logging(String::new(), "relative/logs".to_string());
        assert!(error.contains("absolute"));
    }

    #[test]
    fn entry_create_product_roundtrips_through_the_catalog() {
        let name = unique_name("entry-create");
        let created = entry_create_product(name.clone(), "19.99".to_string());
        assert!(created.ok, "{}", created.message);
        let view = created.product.expect("create should return the product");
        assert_eq!(view.name, name);
        assert_eq!(view.price, "19.99");
        assert!(view.deleted_at.is_none());

        let fetched = entry_get_product(view.id, None);
        assert!(fetched.ok, "{}", fetched.message);
        assert_eq!(fetched.product, Some(view));
    }

    #[test]
    fn entry_create_product_rejects_undecodable_price() {
        let response = entry_create_product("Cable".to_string(), "free".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("is not decimal text"));
    }

    #[test]
    fn entry_create_product_rejects_blank_name() {
        let response = entry_create_product("   ".to_string(), "5".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("blank"));
    }

    #[test]
    fn entry_update_product_applies_trimmed_patch() {
        let created = entry_create_product(unique_name("entry-update"), "25".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.product.expect("create should return the product").id;

        let renamed = unique_name("entry-update-renamed");
        let updated =
            entry_update_product(id, Some(format!("  {renamed}  ")), Some("30".to_string()));
        assert!(updated.ok, "{}", updated.message);
        let view = updated.product.expect("update should return the product");
        assert_eq!(view.name, renamed);
        assert_eq!(view.price, "30");
    }

    #[test]
    fn entry_delete_product_hides_the_product_from_default_listing() {
        let name = unique_name("entry-delete");
        let created = entry_create_product(name.clone(), "45".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.product.expect("create should return the product").id;

        let deleted = entry_delete_product(id);
        assert!(deleted.ok, "{}", deleted.message);

        let visible = entry_list_products(None);
        assert!(!visible.include_deleted);
        assert!(visible.items.iter().all(|item| item.id != id));

        let everything = entry_list_products(Some(true));
        assert!(everything.include_deleted);
        let tombstone = everything
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("deleted product should stay listable with include_deleted");
        assert!(tombstone.deleted_at.is_some());
        assert_eq!(tombstone.name, name);
    }

    #[test]
    fn entry_delete_product_twice_reports_not_found() {
        let created = entry_create_product(unique_name("entry-redelete"), "10".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.product.expect("create should return the product").id;

        assert!(entry_delete_product(id).ok);
        let again = entry_delete_product(id);
        assert!(!again.ok);
        assert!(again.message.contains("not found"));
    }

    #[test]
    fn entry_get_product_misses_cleanly() {
        let response = entry_get_product(u64::MAX, None);
        assert!(!response.ok);
        assert!(response.message.contains("not found"));
    }

    // The catalog is process-wide state shared across test threads, so
    // fixtures carry unique names instead of asserting on global counts.
    fn unique_name(prefix: &str) -> String {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        format!("{prefix}-{stamp}")
    }
}
