//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Queries are checked at runtime and decoded through private `FromRow` row
//! structs, so the crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgCustomerRepository`] - Customer storage
//! - [`PgDealerRepository`] - Dealer storage
//! - [`PgCarRepository`] - Car storage and availability flag write-back
//! - [`PgReservationRepository`] - Reservation storage and date-predicate queries

pub mod pg_car_repository;
pub mod pg_customer_repository;
pub mod pg_dealer_repository;
pub mod pg_reservation_repository;

pub use pg_car_repository::PgCarRepository;
pub use pg_customer_repository::PgCustomerRepository;
pub use pg_dealer_repository::PgDealerRepository;
pub use pg_reservation_repository::PgReservationRepository;
