//! Validated domain records for mocknet.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Raw input arrives as already-deserialized JSON
//! ([`serde_json::Value`]); each entity family has a draft form whose
//! construction runs every field check and collects every violation, and a
//! plain record form that can only be built from a validated draft.

mod validate;

pub use validate::{FieldError, ValidationError};

use serde::Serialize;
use serde_json::Value;

use validate::{
    Violations, is_valid_email, require_f64, require_i64, require_i64_array, require_str,
};

// ============================================================================
// Drafts (validated input forms)
// ============================================================================

/// A validated user input.
///
/// Construction runs structural checks (field present, correct JSON type)
/// before semantic ones, and reports all violations at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
    age: i64,
}

impl UserDraft {
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        let mut v = Violations::default();

        let name = require_str(raw, "name", &mut v);
        let email = require_str(raw, "email", &mut v);
        let age = require_i64(raw, "age", &mut v);

        if let Some(email) = email.as_deref()
            && !is_valid_email(email)
        {
            v.push("email", format!("{email:?} is not a valid email address"));
        }
        if let Some(age) = age
            && age <= 0
        {
            v.push("age", format!("age must be a positive integer, got {age}"));
        }

        v.finish()?;
        let (Some(name), Some(email), Some(age)) = (name, email, age) else {
            unreachable!("absent or mistyped fields are recorded as violations")
        };
        Ok(Self { name, email, age })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn age(&self) -> i64 {
        self.age
    }
}

/// A validated product input.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: f64,
    quantity: i64,
}

impl ProductDraft {
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        let mut v = Violations::default();

        let name = require_str(raw, "name", &mut v);
        let price = require_f64(raw, "price", &mut v);
        let quantity = require_i64(raw, "quantity", &mut v);

        if let Some(price) = price
            && price <= 0.0
        {
            v.push("price", format!("price must be greater than zero, got {price}"));
        }
        if let Some(quantity) = quantity
            && quantity < 0
        {
            v.push("quantity", format!("quantity cannot be negative, got {quantity}"));
        }

        v.finish()?;
        let (Some(name), Some(price), Some(quantity)) = (name, price, quantity) else {
            unreachable!("absent or mistyped fields are recorded as violations")
        };
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// A validated order input.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    order_id: i64,
    user_id: i64,
    product_ids: Vec<i64>,
    total_amount: f64,
}

impl OrderDraft {
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        let mut v = Violations::default();

        let order_id = require_i64(raw, "order_id", &mut v);
        let user_id = require_i64(raw, "user_id", &mut v);
        let product_ids = require_i64_array(raw, "product_ids", &mut v);
        let total_amount = require_f64(raw, "total_amount", &mut v);

        if let Some(ids) = product_ids.as_deref()
            && ids.is_empty()
        {
            v.push("product_ids", "order must contain at least one product");
        }
        if let Some(total) = total_amount
            && total <= 0.0
        {
            v.push(
                "total_amount",
                format!("total amount must be greater than zero, got {total}"),
            );
        }

        v.finish()?;
        let (Some(order_id), Some(user_id), Some(product_ids), Some(total_amount)) =
            (order_id, user_id, product_ids, total_amount)
        else {
            unreachable!("absent or mistyped fields are recorded as violations")
        };
        Ok(Self {
            order_id,
            user_id,
            product_ids,
            total_amount,
        })
    }

    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    #[must_use]
    pub fn product_ids(&self) -> &[i64] {
        &self.product_ids
    }

    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }
}

// ============================================================================
// Records (plain output forms)
// ============================================================================

/// A user record. Only constructible from a validated [`UserDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl From<UserDraft> for User {
    fn from(draft: UserDraft) -> Self {
        Self {
            name: draft.name,
            email: draft.email,
            age: draft.age,
        }
    }
}

/// A product record. Only constructible from a validated [`ProductDraft`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl From<ProductDraft> for Product {
    fn from(draft: ProductDraft) -> Self {
        Self {
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
        }
    }
}

/// An order record. Only constructible from a validated [`OrderDraft`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: i64,
    pub user_id: i64,
    pub product_ids: Vec<i64>,
    pub total_amount: f64,
}

impl From<OrderDraft> for Order {
    fn from(draft: OrderDraft) -> Self {
        Self {
            order_id: draft.order_id,
            user_id: draft.user_id,
            product_ids: draft.product_ids,
            total_amount: draft.total_amount,
        }
    }
}

// ============================================================================
// Validate-and-build entry points
// ============================================================================

/// Validate raw user input and build the record in one step.
pub fn validate_and_build_user(raw: &Value) -> Result<User, ValidationError> {
    UserDraft::from_value(raw).map(User::from)
}

/// Validate raw product input and build the record in one step.
pub fn validate_and_build_product(raw: &Value) -> Result<Product, ValidationError> {
    ProductDraft::from_value(raw).map(Product::from)
}

/// Validate raw order input and build the record in one step.
pub fn validate_and_build_order(raw: &Value) -> Result<Order, ValidationError> {
    OrderDraft::from_value(raw).map(Order::from)
}

// ============================================================================
// Tests
// ============================================================================
