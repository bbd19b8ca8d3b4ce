//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! booking rules and cache invalidation. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::customer_service::CustomerService`] - Customer management
//! - [`services::dealer_service::DealerService`] - Dealer management
//! - [`services::car_service::CarService`] - Car management and active bookings
//! - [`services::reservation_service::ReservationService`] - Booking, extension and cancellation
//! - [`services::availability_service::AvailabilityService`] - Date-based availability

pub mod services;
