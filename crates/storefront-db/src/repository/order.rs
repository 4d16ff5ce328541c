//! # Order Repository
//!
//! Order placement and retrieval.
//!
//! ## Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         place_order                                     │
//! │                                                                         │
//! │  OrderDraft::new(customer, lines)  ── invalid? InvalidRequest (no tx)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ─────────────────────────────────────────────────────────────┐  │
//! │  │  for each line, in request order:                               │  │
//! │  │     try_decrement_stock(product, qty)                           │  │
//! │  │        UnknownProduct   → ProductNotFound    ─┐                 │  │
//! │  │        Insufficient     → InsufficientStock  ─┤                 │  │
//! │  │        Applied(price)   → draft.price_line   │                 │  │
//! │  │  customer exists?        no → CustomerNotFound┤                 │  │
//! │  │  INSERT order (total), INSERT lines           │  any error     │  │
//! │  │  read the order back                          ▼                 │  │
//! │  └── COMMIT ─────────────────────────────── ROLLBACK ──────────────┘  │
//! │                                                                         │
//! │  Either every decrement, the order row and every line row commit, or  │
//! │  none of them do.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first decrement takes SQLite's write lock, so concurrent placements
//! run one after another and each sees the stock its predecessors left.
//! Dropping the future mid-placement drops the transaction, which rolls back.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult, ServiceError, ServiceResult};
use crate::repository::inventory::{try_decrement_stock, StockDecrement};
use storefront_core::{CoreError, Order, OrderDraft, OrderLine, OrderLineRequest, Product};

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// let order = repo.place_order(customer.id, &[OrderLineRequest::new(widget.id, 3)]).await?;
/// let again = repo.get_order(order.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order as one atomic unit of work.
    ///
    /// ## Returns
    /// * `Ok(Order)` - Committed order; every line's stock was decremented
    /// * `Err(ServiceError::Domain(_))` - Rejected; nothing was written
    /// * `Err(ServiceError::Persistence(_))` - Storage failed; nothing was written
    pub async fn place_order(
        &self,
        customer_id: i64,
        lines: &[OrderLineRequest],
    ) -> ServiceResult<Order> {
        let mut draft = OrderDraft::new(customer_id, lines)?;

        debug!(customer_id, lines = lines.len(), "Placing order");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        match assemble(&mut tx, &mut draft).await {
            Ok(order) => {
                if let Err(e) = tx.commit().await {
                    warn!(customer_id, error = %e, "Order commit failed, nothing written");
                    return Err(DbError::TransactionFailed(e.to_string()).into());
                }

                info!(
                    order_id = order.id,
                    customer_id,
                    total = %order.total(),
                    lines = order.lines.len(),
                    "Order placed"
                );
                Ok(order)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed; transaction dropped");
                }

                match &err {
                    ServiceError::Domain(CoreError::InsufficientStock {
                        product_id,
                        available,
                        requested,
                    }) => warn!(
                        customer_id,
                        product_id, available, requested, "Order rejected: insufficient stock"
                    ),
                    ServiceError::Domain(reason) => {
                        warn!(customer_id, %reason, "Order rejected")
                    }
                    ServiceError::Persistence(error) => {
                        warn!(customer_id, %error, "Order failed, rolled back")
                    }
                }

                Err(err)
            }
        }
    }

    /// Gets an order with its lines, each line carrying its product as it
    /// is now.
    ///
    /// ## Returns
    /// * `Ok(Some(Order))` - Lines in request order
    /// * `Ok(None)` - Order not found
    pub async fn get_order(&self, id: i64) -> DbResult<Option<Order>> {
        let mut conn = self.pool.acquire().await?;
        fetch_order(&mut conn, id).await
    }

    /// Counts committed orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Runs every step of a placement on the open transaction.
async fn assemble(conn: &mut SqliteConnection, draft: &mut OrderDraft) -> ServiceResult<Order> {
    let requested = draft.lines().to_vec();

    for line in &requested {
        match try_decrement_stock(conn, line.product_id, line.quantity).await? {
            StockDecrement::Applied { unit_price } => draft.price_line(line, unit_price)?,
            StockDecrement::Insufficient { available } => {
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id,
                    available,
                    requested: line.quantity,
                }
                .into());
            }
            StockDecrement::UnknownProduct => {
                return Err(CoreError::ProductNotFound {
                    product_id: line.product_id,
                }
                .into());
            }
        }
    }

    debug_assert!(draft.is_complete());

    let customer_id = draft.customer_id();
    let customer_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM customers WHERE id = ?1")
        .bind(customer_id)
        .fetch_optional(&mut *conn)
        .await?;
    if customer_exists.is_none() {
        return Err(CoreError::CustomerNotFound(customer_id).into());
    }

    let order_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO orders (customer_id, placed_at, total_cents)
        VALUES (?1, ?2, ?3)
        RETURNING id
        "#,
    )
    .bind(customer_id)
    .bind(Utc::now())
    .bind(draft.total().cents())
    .fetch_one(&mut *conn)
    .await?;

    for (line_no, line) in requested.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO order_lines (order_id, line_no, product_id, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order_id)
        .bind(line_no as i64)
        .bind(line.product_id)
        .bind(line.quantity)
        .execute(&mut *conn)
        .await?;
    }

    fetch_order(conn, order_id)
        .await?
        .ok_or_else(|| DbError::not_found("Order", order_id).into())
}

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    placed_at: DateTime<Utc>,
    total_cents: i64,
}

/// One `order_lines` row joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    order_id: i64,
    line_no: i64,
    product_id: i64,
    quantity: i64,
    product_name: String,
    price_cents: i64,
    stock: i64,
    created_at: DateTime<Utc>,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        OrderLine {
            order_id: row.order_id,
            line_no: row.line_no,
            product_id: row.product_id,
            quantity: row.quantity,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                price_cents: row.price_cents,
                stock: row.stock,
                created_at: row.created_at,
            },
        }
    }
}

/// Reads an order and its lines on `conn`.
///
/// Used both inside the placement transaction and for plain reads.
pub(crate) async fn fetch_order(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Order>> {
    let Some(header) = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT id, customer_id, placed_at, total_cents
        FROM orders
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let lines = sqlx::query_as::<_, OrderLineRow>(
        r#"
        SELECT
            l.order_id,
            l.line_no,
            l.product_id,
            l.quantity,
            p.name AS product_name,
            p.price_cents,
            p.stock,
            p.created_at
        FROM order_lines l
        INNER JOIN products p ON p.id = l.product_id
        WHERE l.order_id = ?1
        ORDER BY l.line_no
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(Order {
        id: header.id,
        customer_id: header.customer_id,
        placed_at: header.placed_at,
        total_cents: header.total_cents,
        lines: lines.into_iter().map(OrderLine::from).collect(),
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use storefront_core::{NewCustomer, NewProduct, ValidationError};

    struct Fixture {
        db: Database,
        customer_id: i64,
    }

    impl Fixture {
        async fn new() -> Self {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            let customer = db
                .customers()
                .create(&NewCustomer {
                    name: "Grace Hopper".to_string(),
                    email: "grace@example.com".to_string(),
                })
                .await
                .unwrap();
            Fixture {
                db,
                customer_id: customer.id,
            }
        }

        async fn product(&self, price_cents: i64, stock: i64) -> Product {
            self.db
                .products()
                .insert(&NewProduct {
                    name: format!("Item {price_cents}"),
                    price_cents,
                    stock,
                })
                .await
                .unwrap()
        }

        async fn stock(&self, id: i64) -> i64 {
            self.db.products().get_by_id(id).await.unwrap().unwrap().stock
        }
    }

    #[tokio::test]
    async fn test_place_order_prices_and_decrements() {
        let fx = Fixture::new().await;
        let widget = fx.product(1_000, 5).await;
        let gadget = fx.product(250, 10).await;

        let order = fx
            .db
            .orders()
            .place_order(
                fx.customer_id,
                &[
                    OrderLineRequest::new(widget.id, 3),
                    OrderLineRequest::new(gadget.id, 4),
                ],
            )
            .await
            .unwrap();

        assert_eq!(order.customer_id, fx.customer_id);
        assert_eq!(order.total_cents, 4_000);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].line_no, 0);
        assert_eq!(order.lines[0].product_id, widget.id);
        assert_eq!(order.lines[1].product.name, gadget.name);

        assert_eq!(fx.stock(widget.id).await, 2);
        assert_eq!(fx.stock(gadget.id).await, 6);
        assert_eq!(fx.db.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rejected_order_writes_nothing() {
        let fx = Fixture::new().await;
        let widget = fx.product(1_000, 5).await;
        let scarce = fx.product(500, 1).await;

        let err = fx
            .db
            .orders()
            .place_order(
                fx.customer_id,
                &[
                    OrderLineRequest::new(widget.id, 2),
                    OrderLineRequest::new(scarce.id, 2),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            })
        ));
        assert_eq!(fx.stock(widget.id).await, 5);
        assert_eq!(fx.stock(scarce.id).await, 1);
        assert_eq!(fx.db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_customer_rolls_back_decrements() {
        let fx = Fixture::new().await;
        let widget = fx.product(1_000, 5).await;

        let err = fx
            .db
            .orders()
            .place_order(fx.customer_id + 1, &[OrderLineRequest::new(widget.id, 1)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::CustomerNotFound(_))
        ));
        assert_eq!(fx.stock(widget.id).await, 5);
    }

    #[tokio::test]
    async fn test_invalid_request_never_opens_transaction() {
        let fx = Fixture::new().await;
        let widget = fx.product(1_000, 5).await;

        let err = fx
            .db
            .orders()
            .place_order(fx.customer_id, &[OrderLineRequest::new(widget.id, 0)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(CoreError::InvalidRequest(
                ValidationError::MustBePositive { .. }
            ))
        ));
        assert_eq!(fx.stock(widget.id).await, 5);
    }

    #[tokio::test]
    async fn test_storage_failure_after_decrement_rolls_back() {
        let fx = Fixture::new().await;
        let widget = fx.product(1_000, 5).await;

        // Line rows are written after every decrement has been applied.
        sqlx::query(
            "CREATE TRIGGER reject_order_lines BEFORE INSERT ON order_lines \
             BEGIN SELECT RAISE(ABORT, 'order lines unavailable'); END",
        )
        .execute(fx.db.pool())
        .await
        .unwrap();

        let err = fx
            .db
            .orders()
            .place_order(fx.customer_id, &[OrderLineRequest::new(widget.id, 3)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Persistence(DbError::QueryFailed(ref msg)) if msg.contains("order lines unavailable")
        ));
        assert_eq!(fx.stock(widget.id).await, 5);
        assert_eq!(fx.db.orders().count().await.unwrap(), 0);

        sqlx::query("DROP TRIGGER reject_order_lines")
            .execute(fx.db.pool())
            .await
            .unwrap();
        let order = fx
            .db
            .orders()
            .place_order(fx.customer_id, &[OrderLineRequest::new(widget.id, 3)])
            .await
            .unwrap();
        assert_eq!(order.total_cents, 3_000);
        assert_eq!(fx.stock(widget.id).await, 2);
    }

    #[tokio::test]
    async fn test_get_order_missing() {
        let fx = Fixture::new().await;
        assert!(fx.db.orders().get_order(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_order_matches_placed_order() {
        let fx = Fixture::new().await;
        let widget = fx.product(1_000, 5).await;

        let placed = fx
            .db
            .orders()
            .place_order(fx.customer_id, &[OrderLineRequest::new(widget.id, 1)])
            .await
            .unwrap();
        let fetched = fx.db.orders().get_order(placed.id).await.unwrap().unwrap();

        assert_eq!(fetched, placed);
    }
}
