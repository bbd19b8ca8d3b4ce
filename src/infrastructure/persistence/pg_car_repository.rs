//! PostgreSQL implementation of the car repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Car, NewCar};
use crate::domain::repositories::CarRepository;
use crate::error::AppError;

const CAR_COLUMNS: &str =
    "id, vehicle_number, model, seating_capacity, rent_per_day, availability, dealer_id, created_at";

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    vehicle_number: String,
    model: String,
    seating_capacity: i32,
    rent_per_day: i32,
    availability: Option<bool>,
    dealer_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<CarRow> for Car {
    fn from(r: CarRow) -> Self {
        Car::new(
            r.id,
            r.vehicle_number,
            r.model,
            r.seating_capacity,
            r.rent_per_day,
            r.availability,
            r.dealer_id,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for cars.
///
/// Reservations of a deleted car are removed by `ON DELETE CASCADE`.
pub struct PgCarRepository {
    pool: Arc<PgPool>,
}

impl PgCarRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            r#"
            INSERT INTO cars (vehicle_number, model, seating_capacity, rent_per_day, dealer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(new_car.vehicle_number)
        .bind(new_car.model)
        .bind(new_car.seating_capacity)
        .bind(new_car.rent_per_day)
        .bind(new_car.dealer_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        let row =
            sqlx::query_as::<_, CarRow>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Car::from))
    }

    async fn list(&self) -> Result<Vec<Car>, AppError> {
        let rows =
            sqlx::query_as::<_, CarRow>(&format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY id"))
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn update(&self, id: i64, car: NewCar) -> Result<Car, AppError> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            r#"
            UPDATE cars SET
                vehicle_number   = $2,
                model            = $3,
                seating_capacity = $4,
                rent_per_day     = $5,
                dealer_id        = $6
            WHERE id = $1
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(car.vehicle_number)
        .bind(car.model)
        .bind(car.seating_capacity)
        .bind(car.rent_per_day)
        .bind(car.dealer_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Car::from)
            .ok_or_else(|| AppError::not_found("Car not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Car not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn set_all_availability(&self, available: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE cars SET availability = $1")
            .bind(available)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn update_availability(&self, id: i64, available: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE cars SET availability = $2 WHERE id = $1")
            .bind(id)
            .bind(available)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Car not found", json!({ "id": id })));
        }

        Ok(())
    }
}
