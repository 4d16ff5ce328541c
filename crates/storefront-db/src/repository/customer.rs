//! # Customer Repository
//!
//! Registration and lookup. Orders reference customers by id only.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbResult, ServiceResult};
use storefront_core::validation::validate_new_customer;
use storefront_core::{Customer, NewCustomer};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Registers a customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - With generated id and registration time
    /// * `Err(ServiceError::Domain(InvalidRequest))` - Blank name or bad email
    /// * `Err(ServiceError::Persistence(UniqueViolation))` - Email already registered
    pub async fn create(&self, customer: &NewCustomer) -> ServiceResult<Customer> {
        validate_new_customer(customer)?;

        let name = customer.name.trim();
        let email = customer.email.trim();
        debug!(email = %email, "Registering customer");

        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, registered_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, email, registered_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, registered_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}
