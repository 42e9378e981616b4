//! End-to-end behavior of the validation pipeline.

use serde_json::json;

use mocknet_types::{
    validate_and_build_order, validate_and_build_product, validate_and_build_user,
};

#[test]
fn a_full_document_validates_entity_by_entity() {
    let document = json!({
        "user": { "name": "Alice", "email": "alice@example.com", "age": 30 },
        "product": { "name": "Laptop", "price": 999.99, "quantity": 10 },
        "order": {
            "order_id": 1,
            "user_id": 1,
            "product_ids": [1, 2],
            "total_amount": 1199.98,
        },
    });

    let user = validate_and_build_user(&document["user"]).unwrap();
    let product = validate_and_build_product(&document["product"]).unwrap();
    let order = validate_and_build_order(&document["order"]).unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(product.quantity, 10);
    assert_eq!(order.product_ids, vec![1, 2]);
}

#[test]
fn one_bad_entity_does_not_taint_the_others() {
    let good = json!({ "name": "Alice", "email": "alice@example.com", "age": 30 });
    let bad = json!({ "name": "Bob", "email": "invalid-email", "age": -5 });

    let err = validate_and_build_user(&bad).unwrap_err();
    assert_eq!(err.errors().len(), 2);

    // The earlier failure leaves no state behind; validation is pure.
    assert!(validate_and_build_user(&good).is_ok());
}

#[test]
fn records_serialize_with_their_validated_fields() {
    let raw = json!({ "name": "Laptop", "price": 999.99, "quantity": 10 });
    let product = validate_and_build_product(&raw).unwrap();
    let serialized = serde_json::to_value(&product).unwrap();
    assert_eq!(serialized, raw);
}

#[test]
fn error_display_names_every_field_for_the_caller() {
    let raw = json!({
        "order_id": 2,
        "user_id": 1,
        "product_ids": [],
        "total_amount": -50.0,
    });
    let err = validate_and_build_order(&raw).unwrap_err();
    let rendered = err.to_string();

    assert!(rendered.contains("product_ids:"), "{rendered}");
    assert!(rendered.contains("total_amount:"), "{rendered}");
    assert!(rendered.starts_with("validation failed (2)"), "{rendered}");
}

#[test]
fn non_object_input_reports_every_missing_field() {
    let raw = json!("not an object");
    let err = validate_and_build_user(&raw).unwrap_err();
    assert!(err.mentions("name"));
    assert!(err.mentions("email"));
    assert!(err.mentions("age"));
}
