//! PostgreSQL implementation of the dealer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Dealer, NewDealer};
use crate::domain::repositories::DealerRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct DealerRow {
    id: i64,
    name: String,
    mobile: String,
    area: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<DealerRow> for Dealer {
    fn from(r: DealerRow) -> Self {
        Dealer::new(r.id, r.name, r.mobile, r.area, r.email, r.created_at)
    }
}

/// PostgreSQL repository for dealers.
///
/// `cars.dealer_id` is declared `ON DELETE SET NULL`, so deleting a dealer
/// leaves its cars in place.
pub struct PgDealerRepository {
    pool: Arc<PgPool>,
}

impl PgDealerRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DealerRepository for PgDealerRepository {
    async fn create(&self, new_dealer: NewDealer) -> Result<Dealer, AppError> {
        let row = sqlx::query_as::<_, DealerRow>(
            r#"
            INSERT INTO dealers (name, mobile, area, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, mobile, area, email, created_at
            "#,
        )
        .bind(new_dealer.name)
        .bind(new_dealer.mobile)
        .bind(new_dealer.area)
        .bind(new_dealer.email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Dealer>, AppError> {
        let row = sqlx::query_as::<_, DealerRow>(
            "SELECT id, name, mobile, area, email, created_at FROM dealers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Dealer::from))
    }

    async fn list(&self) -> Result<Vec<Dealer>, AppError> {
        let rows = sqlx::query_as::<_, DealerRow>(
            "SELECT id, name, mobile, area, email, created_at FROM dealers ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Dealer::from).collect())
    }

    async fn update(&self, id: i64, dealer: NewDealer) -> Result<Dealer, AppError> {
        let row = sqlx::query_as::<_, DealerRow>(
            r#"
            UPDATE dealers SET name = $2, mobile = $3, area = $4, email = $5
            WHERE id = $1
            RETURNING id, name, mobile, area, email, created_at
            "#,
        )
        .bind(id)
        .bind(dealer.name)
        .bind(dealer.mobile)
        .bind(dealer.area)
        .bind(dealer.email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Dealer::from)
            .ok_or_else(|| AppError::not_found("Dealer not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM dealers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Dealer not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dealers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
