//! Repository trait for customers.

use crate::domain::entities::{Customer, NewCustomer};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing customers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCustomerRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, new_customer: NewCustomer) -> Result<Customer, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    async fn list(&self) -> Result<Vec<Customer>, AppError>;

    /// Replaces a customer's contact details.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    async fn update(&self, id: i64, customer: NewCustomer) -> Result<Customer, AppError>;

    /// Deletes a customer together with their reservations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
