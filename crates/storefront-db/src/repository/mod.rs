//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                                                                │
//! │       │  db.orders().place_order(customer_id, &lines)                  │
//! │       ▼                                                                 │
//! │  OrderRepository ─────────► inventory (on the placement transaction)  │
//! │  ProductRepository                                                     │
//! │  CustomerRepository                                                    │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer registration and lookup
//! - [`ProductRepository`](product::ProductRepository) - Catalog lookup, listing, updates
//! - [`OrderRepository`](order::OrderRepository) - Order placement and retrieval
//! - [`inventory`] - Conditional stock decrement

pub mod customer;
pub mod inventory;
pub mod order;
pub mod product;
