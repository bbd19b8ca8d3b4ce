//! Dealer management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Dealer, NewDealer};
use crate::domain::repositories::DealerRepository;
use crate::error::AppError;

/// Service for managing dealers.
///
/// Dealers carry no booking behaviour; deleting one only unlinks its cars.
pub struct DealerService<R: DealerRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: DealerRepository + ?Sized> DealerService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_dealer(&self, dealer: NewDealer) -> Result<Dealer, AppError> {
        self.repository.create(dealer).await
    }

    pub async fn list_dealers(&self) -> Result<Vec<Dealer>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a dealer by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the dealer does not exist.
    pub async fn get_dealer(&self, id: i64) -> Result<Dealer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Dealer not found", json!({ "id": id })))
    }

    pub async fn update_dealer(&self, id: i64, dealer: NewDealer) -> Result<Dealer, AppError> {
        self.repository.update(id, dealer).await
    }

    pub async fn delete_dealer(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
