//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Order      │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  customer_id    │   │  id             │       │
//! │  │  name           │   │  total_cents    │   │  price_cents    │       │
//! │  │  email          │   │  lines ─────┐   │   │  stock          │       │
//! │  └─────────────────┘   └─────────────┼───┘   └────────▲────────┘       │
//! │                                      │                │                 │
//! │                        ┌─────────────▼───┐            │                 │
//! │                        │   OrderLine     │  product_id│                 │
//! │                        │  quantity       │────────────┘                 │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! An `Order` owns its `OrderLine`s. Lines point at products and orders at
//! customers by id only; the `product` carried on a line is a read-time copy
//! resolved by the repository, not an owning link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

/// Data needed to register a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Units currently available. Never negative.
    pub stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Data needed to add a product to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Fields a product update may overwrite. Name and creation time are
/// never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price_cents: i64,
    pub stock: i64,
}

/// Catalog query filters.
///
/// Filters are conjunctive; a `None` filter imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub min_stock: Option<i64>,
}

impl ProductFilter {
    /// A filter that matches every product.
    pub fn any() -> Self {
        ProductFilter::default()
    }

    /// Pure version of the catalog predicate, mirrored by the SQL query.
    pub fn matches(&self, product: &Product) -> bool {
        self.min_price_cents.map_or(true, |min| product.price_cents >= min)
            && self.max_price_cents.map_or(true, |max| product.price_cents <= max)
            && self.min_stock.map_or(true, |min| product.stock >= min)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// One requested line of a "place order" call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: i64,
    pub quantity: i64,
}

impl OrderLineRequest {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        OrderLineRequest {
            product_id,
            quantity,
        }
    }
}

/// A committed order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub placed_at: DateTime<Utc>,
    /// Sum of price × quantity at placement time. Frozen once committed.
    pub total_cents: i64,
    /// Lines in the order they were requested.
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Returns the total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total units ordered of `product_id` across all lines.
    pub fn quantity_of(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .sum()
    }
}

/// A line item in a committed order.
///
/// No price is stored on the line: `product` reflects the catalog when the
/// order was read, so a later price change shows up here while
/// `Order::total_cents` keeps the amount charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: i64,
    /// Zero-based position in the original request.
    pub line_no: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub product: Product,
}

impl OrderLine {
    /// Line amount at the product's current price, `None` on overflow.
    #[inline]
    pub fn current_amount(&self) -> Option<Money> {
        self.product.price().checked_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, stock: i64) -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            price_cents,
            stock,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let p = product(1500, 4);

        assert!(ProductFilter::any().matches(&p));

        let filter = ProductFilter {
            min_price_cents: Some(1000),
            max_price_cents: Some(2000),
            min_stock: Some(4),
        };
        assert!(filter.matches(&p));

        let filter = ProductFilter {
            min_stock: Some(5),
            ..filter
        };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let p = product(1000, 0);
        let filter = ProductFilter {
            min_price_cents: Some(1000),
            max_price_cents: Some(1000),
            min_stock: Some(0),
        };
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_order_quantity_of_sums_repeated_product() {
        let line = |line_no, product_id, quantity| OrderLine {
            order_id: 9,
            line_no,
            product_id,
            quantity,
            product: Product {
                id: product_id,
                ..product(100, 10)
            },
        };
        let order = Order {
            id: 9,
            customer_id: 1,
            placed_at: Utc::now(),
            total_cents: 600,
            lines: vec![line(0, 1, 2), line(1, 2, 1), line(2, 1, 3)],
        };

        assert_eq!(order.quantity_of(1), 5);
        assert_eq!(order.quantity_of(2), 1);
        assert_eq!(order.quantity_of(3), 0);
        assert_eq!(order.lines[0].current_amount(), Some(Money::from_cents(200)));
    }

    #[test]
    fn test_current_amount_overflow_is_none() {
        let line = OrderLine {
            order_id: 1,
            line_no: 0,
            product_id: 1,
            quantity: 2,
            product: product(i64::MAX, 10),
        };
        assert_eq!(line.current_amount(), None);
    }
}
