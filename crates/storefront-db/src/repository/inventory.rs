//! # Inventory
//!
//! Stock mutation for order placement. These functions take a connection
//! rather than the pool: they are meant to run on the placement transaction,
//! so their writes commit or roll back with the order.
//!
//! ## Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE products SET stock = stock - :qty                              │
//! │  WHERE id = :id AND stock >= :qty                                      │
//! │  RETURNING price_cents                                                 │
//! │                                                                         │
//! │  row returned  → Applied { unit_price }      (stock taken)            │
//! │  no row        → SELECT stock WHERE id = :id                          │
//! │                     found   → Insufficient { available }              │
//! │                     missing → UnknownProduct                          │
//! │                                                                         │
//! │  Check and decrement are one statement, so two placements can never   │
//! │  both take the last unit. The statement also takes the write lock,    │
//! │  which the follow-up read then holds: `available` is exact.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use storefront_core::Money;

/// Outcome of [`try_decrement_stock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock was taken; `unit_price` is the product's price at that moment.
    Applied { unit_price: Money },

    /// The product exists but has fewer than the requested units.
    Insufficient { available: i64 },

    /// No product with that id.
    UnknownProduct,
}

/// Takes `quantity` units of `product_id` if at least that many are in
/// stock. Nothing is written unless the result is `Applied`.
pub async fn try_decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> DbResult<StockDecrement> {
    let price_cents: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE products
        SET stock = stock - ?2
        WHERE id = ?1 AND stock >= ?2
        RETURNING price_cents
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(price_cents) = price_cents {
        debug!(product_id, quantity, "Stock decremented");
        return Ok(StockDecrement::Applied {
            unit_price: Money::from_cents(price_cents),
        });
    }

    let outcome = match stock_level(conn, product_id).await? {
        Some(available) => StockDecrement::Insufficient { available },
        None => StockDecrement::UnknownProduct,
    };

    debug!(product_id, quantity, ?outcome, "Stock decrement refused");
    Ok(outcome)
}

/// Current stock of a product, `None` if the product doesn't exist.
pub async fn stock_level(conn: &mut SqliteConnection, product_id: i64) -> DbResult<Option<i64>> {
    let stock = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(conn)
        .await?;

    Ok(stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use storefront_core::NewProduct;

    async fn with_product(stock: i64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Kettle".to_string(),
                price_cents: 2_500,
                stock,
            })
            .await
            .unwrap();
        (db, product.id)
    }

    #[tokio::test]
    async fn test_decrement_applies_when_enough_stock() {
        let (db, id) = with_product(5).await;
        let mut conn = db.pool().acquire().await.unwrap();

        let outcome = try_decrement_stock(&mut conn, id, 5).await.unwrap();
        assert_eq!(
            outcome,
            StockDecrement::Applied {
                unit_price: Money::from_cents(2_500)
            }
        );
        assert_eq!(stock_level(&mut conn, id).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_decrement_refuses_and_leaves_stock() {
        let (db, id) = with_product(2).await;
        let mut conn = db.pool().acquire().await.unwrap();

        let outcome = try_decrement_stock(&mut conn, id, 3).await.unwrap();
        assert_eq!(outcome, StockDecrement::Insufficient { available: 2 });
        assert_eq!(stock_level(&mut conn, id).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_decrement_unknown_product() {
        let (db, id) = with_product(2).await;
        let mut conn = db.pool().acquire().await.unwrap();

        let outcome = try_decrement_stock(&mut conn, id + 100, 1).await.unwrap();
        assert_eq!(outcome, StockDecrement::UnknownProduct);
        assert_eq!(stock_level(&mut conn, id + 100).await.unwrap(), None);
    }
}
