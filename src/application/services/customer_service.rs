//! Customer management service.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::availability_service::invalidate_availability;
use crate::domain::entities::{Customer, NewCustomer};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service for managing customers.
///
/// Deleting a customer deletes their reservations, so it also invalidates the
/// availability cache.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    pub async fn create_customer(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let created = self.repository.create(customer).await?;
        tracing::info!(customer_id = created.id, "Customer created");
        Ok(created)
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    pub async fn get_customer(&self, id: i64) -> Result<Customer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found", json!({ "id": id })))
    }

    pub async fn update_customer(
        &self,
        id: i64,
        customer: NewCustomer,
    ) -> Result<Customer, AppError> {
        self.repository.update(id, customer).await
    }

    /// Deletes a customer and, by cascade, their reservations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    pub async fn delete_customer(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        invalidate_availability(self.cache.as_ref()).await;
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
