//! Repository trait for dealers.

use crate::domain::entities::{Dealer, NewDealer};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing dealers.
///
/// Deleting a dealer unlinks its cars instead of deleting them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealerRepository: Send + Sync {
    async fn create(&self, new_dealer: NewDealer) -> Result<Dealer, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Dealer>, AppError>;

    async fn list(&self) -> Result<Vec<Dealer>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the dealer does not exist.
    async fn update(&self, id: i64, dealer: NewDealer) -> Result<Dealer, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the dealer does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
