//! Repository trait definitions for the domain layer.
//!
//! These traits are the entity store contract. Two implementations exist:
//! PostgreSQL in `crate::infrastructure::persistence` and an in-memory store in
//! `crate::infrastructure::memory`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CustomerRepository`] - Customer CRUD
//! - [`DealerRepository`] - Dealer CRUD
//! - [`CarRepository`] - Car CRUD and availability flag write-back
//! - [`ReservationRepository`] - Reservation CRUD and date-predicate queries

pub mod car_repository;
pub mod customer_repository;
pub mod dealer_repository;
pub mod reservation_repository;

pub use car_repository::CarRepository;
pub use customer_repository::CustomerRepository;
pub use dealer_repository::DealerRepository;
pub use reservation_repository::ReservationRepository;

#[cfg(test)]
pub use car_repository::MockCarRepository;
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use dealer_repository::MockDealerRepository;
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
