use harvestlink_core::{Product, ProductValidationError};
use rust_decimal::Decimal;

const NOW_MS: i64 = 1_700_000_000_000;

#[test]
fn product_new_sets_defaults() {
    let product = Product::new(1, "Laptop", Decimal::from(1200), NOW_MS);

    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Laptop");
    assert_eq!(product.price, Decimal::from(1200));
    assert_eq!(product.created_at, NOW_MS);
    assert_eq!(product.updated_at, NOW_MS);
    assert_eq!(product.deleted_at, None);
    assert!(product.is_active());
    assert!(!product.is_deleted());
}

#[test]
fn mark_deleted_sets_tombstone_and_touches() {
    let mut product = Product::new(1, "Laptop", Decimal::from(1200), NOW_MS);

    product.mark_deleted(NOW_MS + 5_000);

    assert!(product.is_deleted());
    assert!(!product.is_active());
    assert_eq!(product.deleted_at, Some(NOW_MS + 5_000));
    assert_eq!(product.updated_at, NOW_MS + 5_000);
    assert_eq!(product.created_at, NOW_MS);
}

#[test]
fn touch_refreshes_only_updated_at() {
    let mut product = Product::new(2, "Mouse", Decimal::from(25), NOW_MS);

    product.touch(NOW_MS + 1_000);

    assert_eq!(product.updated_at, NOW_MS + 1_000);
    assert_eq!(product.created_at, NOW_MS);
    assert_eq!(product.deleted_at, None);
}

#[test]
fn validate_rejects_blank_name() {
    let product = Product::new(1, "   ", Decimal::from(10), NOW_MS);

    let err = product.validate().unwrap_err();
    assert_eq!(err, ProductValidationError::EmptyName);
}

#[test]
fn validate_rejects_negative_price_but_allows_zero() {
    let negative = Product::new(1, "Sample", Decimal::from(-1), NOW_MS);
    let err = negative.validate().unwrap_err();
    assert_eq!(err, ProductValidationError::NegativePrice);

    let free = Product::new(2, "Sample", Decimal::ZERO, NOW_MS);
    assert!(free.validate().is_ok());
}

#[test]
fn validate_accepts_fractional_prices() {
    let product = Product::new(1, "Cable", "19.99".parse::<Decimal>().unwrap(), NOW_MS);
    assert!(product.validate().is_ok());
}

#[test]
fn product_serialization_uses_expected_wire_fields() {
    let mut product = Product::new(1, "Laptop", Decimal::from(1200), NOW_MS);
    product.mark_deleted(NOW_MS + 5_000);

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Laptop");
    assert_eq!(json["price"], "1200");
    assert_eq!(json["created_at"], NOW_MS);
    assert_eq!(json["updated_at"], NOW_MS + 5_000);
    assert_eq!(json["deleted_at"], NOW_MS + 5_000);

    let decoded: Product = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, product);
}

#[test]
fn active_product_serializes_null_deleted_at() {
    let product = Product::new(2, "Mouse", Decimal::from(25), NOW_MS);

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["deleted_at"], serde_json::Value::Null);
}
