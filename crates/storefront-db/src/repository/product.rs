//! # Product Repository
//!
//! Catalog reads and the administrative product writes.
//!
//! ## Key Operations
//! - Lookup by id (the catalog lookup)
//! - Filtered listing
//! - Insert, and price/stock overwrite
//!
//! Order placement never goes through here: it decrements stock through
//! [`crate::repository::inventory`] inside its own transaction.
//!
//! ## Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductFilter { min_price_cents, max_price_cents, min_stock }         │
//! │                                                                         │
//! │  Each bound becomes `(?n IS NULL OR column <op> ?n)`, so an unset      │
//! │  bound binds NULL and drops out. Bounds are inclusive and ANDed.       │
//! │                                                                         │
//! │  { max_price_cents: 500 }            → every product at or under $5    │
//! │  { min_stock: 1 }                    → everything in stock             │
//! │  {}                                  → whole catalog, ordered by id    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult, ServiceResult};
use storefront_core::validation::{validate_new_product, validate_product_update};
use storefront_core::{NewProduct, Product, ProductFilter, ProductUpdate};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let in_stock = repo.list(&ProductFilter { min_stock: Some(1), ..Default::default() }).await?;
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products matching every set bound of `filter`, ordered by id.
    pub async fn list(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        debug!(?filter, "Listing products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at
            FROM products
            WHERE (?1 IS NULL OR price_cents >= ?1)
              AND (?2 IS NULL OR price_cents <= ?2)
              AND (?3 IS NULL OR stock >= ?3)
            ORDER BY id
            "#,
        )
        .bind(filter.min_price_cents)
        .bind(filter.max_price_cents)
        .bind(filter.min_stock)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listing returned products");
        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with generated id and timestamp
    /// * `Err(ServiceError::Domain(InvalidRequest))` - Blank name, negative price or stock
    pub async fn insert(&self, product: &NewProduct) -> ServiceResult<Product> {
        validate_new_product(product)?;

        debug!(name = %product.name, "Inserting product");

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price_cents, stock, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, price_cents, stock, created_at
            "#,
        )
        .bind(product.name.trim())
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Overwrites a product's price and stock. Name and creation time are
    /// left alone.
    ///
    /// Committed orders keep their total; their lines show the new price on
    /// the next read.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(ServiceError::Domain(InvalidRequest))` - Negative price or stock
    /// * `Err(ServiceError::Persistence(NotFound))` - Product doesn't exist
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> ServiceResult<()> {
        validate_product_update(update)?;

        debug!(
            id,
            price_cents = update.price_cents,
            stock = update.stock,
            "Updating product"
        );

        let result = sqlx::query(
            r#"
            UPDATE products
            SET price_cents = ?2,
                stock = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(update.price_cents)
        .bind(update.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id).into());
        }

        Ok(())
    }

    /// Counts catalog products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::{Database, DbConfig};

    async fn seeded() -> (Database, Vec<Product>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut products = Vec::new();
        for (name, price_cents, stock) in [("Pen", 150, 0), ("Notebook", 450, 12), ("Lamp", 2999, 3)] {
            let product = repo
                .insert(&NewProduct {
                    name: name.to_string(),
                    price_cents,
                    stock,
                })
                .await
                .unwrap();
            products.push(product);
        }

        (db, products)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (db, products) = seeded().await;
        let repo = db.products();

        let lamp = repo.get_by_id(products[2].id).await.unwrap().unwrap();
        assert_eq!(lamp, products[2]);
        assert_eq!(lamp.price().to_string(), "$29.99");

        assert!(repo.get_by_id(9_999).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_applies_filters_conjunctively() {
        let (db, products) = seeded().await;
        let repo = db.products();

        let all = repo.list(&ProductFilter::any()).await.unwrap();
        assert_eq!(all, products);

        let filter = ProductFilter {
            min_price_cents: Some(150),
            max_price_cents: Some(450),
            min_stock: Some(1),
        };
        let listed = repo.list(&filter).await.unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Notebook"]);

        // Same predicate as the in-memory filter
        let expected: Vec<_> = products.iter().filter(|p| filter.matches(p)).cloned().collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_update_overwrites_price_and_stock() {
        let (db, products) = seeded().await;
        let repo = db.products();
        let pen = &products[0];

        repo.update(
            pen.id,
            &ProductUpdate {
                price_cents: 175,
                stock: 40,
            },
        )
        .await
        .unwrap();

        let updated = repo.get_by_id(pen.id).await.unwrap().unwrap();
        assert_eq!(updated.price_cents, 175);
        assert_eq!(updated.stock, 40);
        assert_eq!(updated.name, pen.name);
        assert_eq!(updated.created_at, pen.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let (db, _) = seeded().await;
        let err = db
            .products()
            .update(
                404,
                &ProductUpdate {
                    price_cents: 1,
                    stock: 1,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Persistence(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_stock() {
        let (db, products) = seeded().await;
        let err = db
            .products()
            .update(
                products[1].id,
                &ProductUpdate {
                    price_cents: 450,
                    stock: -1,
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_invalid_request());

        let unchanged = db.products().get_by_id(products[1].id).await.unwrap().unwrap();
        assert_eq!(unchanged.stock, 12);
    }
}
