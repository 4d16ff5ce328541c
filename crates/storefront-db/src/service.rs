//! # Service Interfaces
//!
//! The capabilities a request-handling layer programs against. Each
//! repository implements its trait, so handlers can hold
//! `Arc<dyn OrderService>` and tests can substitute their own.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ CustomerService  │   │  ProductService  │   │   OrderService   │
//! │  create_customer │   │  get_product     │   │  place_order     │
//! │  get_customer    │   │  list_products   │   │  get_order       │
//! │                  │   │  update_product  │   │                  │
//! └────────▲─────────┘   └────────▲─────────┘   └────────▲─────────┘
//!          │                      │                      │
//!  CustomerRepository     ProductRepository      OrderRepository
//! ```

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::repository::customer::CustomerRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use storefront_core::{
    Customer, NewCustomer, Order, OrderLineRequest, Product, ProductFilter, ProductUpdate,
};

#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn create_customer(&self, customer: &NewCustomer) -> ServiceResult<Customer>;

    async fn get_customer(&self, id: i64) -> ServiceResult<Option<Customer>>;
}

#[async_trait]
pub trait ProductService: Send + Sync {
    /// Catalog lookup: price and stock as of now.
    async fn get_product(&self, id: i64) -> ServiceResult<Option<Product>>;

    async fn list_products(&self, filter: &ProductFilter) -> ServiceResult<Vec<Product>>;

    /// Overwrites price and stock; not-found if the product doesn't exist.
    async fn update_product(&self, id: i64, update: &ProductUpdate) -> ServiceResult<()>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Atomically validates, prices and reserves stock for `lines`, then
    /// persists the order. On any error nothing is written.
    async fn place_order(
        &self,
        customer_id: i64,
        lines: &[OrderLineRequest],
    ) -> ServiceResult<Order>;

    async fn get_order(&self, id: i64) -> ServiceResult<Option<Order>>;
}

#[async_trait]
impl CustomerService for CustomerRepository {
    async fn create_customer(&self, customer: &NewCustomer) -> ServiceResult<Customer> {
        self.create(customer).await
    }

    async fn get_customer(&self, id: i64) -> ServiceResult<Option<Customer>> {
        Ok(self.get_by_id(id).await?)
    }
}

#[async_trait]
impl ProductService for ProductRepository {
    async fn get_product(&self, id: i64) -> ServiceResult<Option<Product>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn list_products(&self, filter: &ProductFilter) -> ServiceResult<Vec<Product>> {
        Ok(self.list(filter).await?)
    }

    async fn update_product(&self, id: i64, update: &ProductUpdate) -> ServiceResult<()> {
        self.update(id, update).await
    }
}

#[async_trait]
impl OrderService for OrderRepository {
    async fn place_order(
        &self,
        customer_id: i64,
        lines: &[OrderLineRequest],
    ) -> ServiceResult<Order> {
        OrderRepository::place_order(self, customer_id, lines).await
    }

    async fn get_order(&self, id: i64) -> ServiceResult<Option<Order>> {
        Ok(OrderRepository::get_order(self, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use std::sync::Arc;
    use storefront_core::NewProduct;

    #[tokio::test]
    async fn test_services_behind_trait_objects() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customers: Arc<dyn CustomerService> = Arc::new(db.customers());
        let products: Arc<dyn ProductService> = Arc::new(db.products());
        let orders: Arc<dyn OrderService> = Arc::new(db.orders());

        let customer = customers
            .create_customer(&NewCustomer {
                name: "Alan".to_string(),
                email: "alan@example.com".to_string(),
            })
            .await
            .unwrap();
        let product = db
            .products()
            .insert(&NewProduct {
                name: "Tape".to_string(),
                price_cents: 300,
                stock: 4,
            })
            .await
            .unwrap();

        let order = orders
            .place_order(customer.id, &[OrderLineRequest::new(product.id, 4)])
            .await
            .unwrap();
        assert_eq!(order.total_cents, 1_200);

        let listed = products
            .list_products(&ProductFilter {
                min_stock: Some(1),
                ..ProductFilter::default()
            })
            .await
            .unwrap();
        assert!(listed.is_empty());

        assert_eq!(orders.get_order(order.id).await.unwrap(), Some(order));
        assert_eq!(
            customers.get_customer(customer.id).await.unwrap(),
            Some(customer)
        );
        assert_eq!(
            products.get_product(product.id).await.unwrap().map(|p| p.stock),
            Some(0)
        );
    }
}
