//! PostgreSQL implementation of the reservation repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::availability::OccupancyQuery;
use crate::domain::entities::{NewReservation, Reservation, ReservationDates};
use crate::domain::repositories::ReservationRepository;
use crate::error::AppError;

const RESERVATION_COLUMNS: &str = "id, customer_id, car_id, issue_date, return_date, created_at";

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    customer_id: i64,
    car_id: i64,
    issue_date: NaiveDate,
    return_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(r: ReservationRow) -> Self {
        Reservation::new(
            r.id,
            r.customer_id,
            r.car_id,
            r.issue_date,
            r.return_date,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for reservations.
///
/// Foreign keys reject reservations for unknown cars or customers; the
/// violation surfaces as [`AppError::NotFound`].
pub struct PgReservationRepository {
    pool: Arc<PgPool>,
}

impl PgReservationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        sql: &str,
        car_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>, AppError> {
        let mut query = sqlx::query_as::<_, ReservationRow>(sql);
        if let Some(car_id) = car_id {
            query = query.bind(car_id);
        }
        if let Some(date) = date {
            query = query.bind(date);
        }

        let rows = query.fetch_all(self.pool.as_ref()).await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create(&self, new_reservation: NewReservation) -> Result<Reservation, AppError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            INSERT INTO reservations (customer_id, car_id, issue_date, return_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(new_reservation.customer_id)
        .bind(new_reservation.car_id)
        .bind(new_reservation.issue_date)
        .bind(new_reservation.return_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Reservation::from))
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        self.fetch_many(
            &format!("SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY id"),
            None,
            None,
        )
        .await
    }

    async fn find_by_car(&self, car_id: i64) -> Result<Vec<Reservation>, AppError> {
        self.fetch_many(
            &format!(
                "SELECT {RESERVATION_COLUMNS} FROM reservations \
                 WHERE car_id = $1 ORDER BY issue_date, id"
            ),
            Some(car_id),
            None,
        )
        .await
    }

    async fn find_active_by_car(
        &self,
        car_id: i64,
        from: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        self.fetch_many(
            &format!(
                "SELECT {RESERVATION_COLUMNS} FROM reservations \
                 WHERE car_id = $1 AND return_date >= $2 ORDER BY issue_date, id"
            ),
            Some(car_id),
            Some(from),
        )
        .await
    }

    async fn find_by_occupancy(
        &self,
        query: OccupancyQuery,
    ) -> Result<Vec<Reservation>, AppError> {
        let predicate = match query {
            OccupancyQuery::Legacy { .. } => "issue_date >= $1 OR return_date >= $1",
            OccupancyQuery::Covering { .. } => "issue_date <= $1 AND return_date >= $1",
        };

        self.fetch_many(
            &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE {predicate} ORDER BY id"),
            None,
            Some(query.date()),
        )
        .await
    }

    async fn update_dates(
        &self,
        id: i64,
        dates: ReservationDates,
    ) -> Result<Reservation, AppError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            UPDATE reservations SET issue_date = $2, return_date = $3
            WHERE id = $1
            RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(dates.issue_date)
        .bind(dates.return_date)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Reservation::from)
            .ok_or_else(|| AppError::not_found("Reservation not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Reservation not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
