//! Core domain entities representing the rental data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs; reservations additionally have [`ReservationDates`] for the
//! extend operation.
//!
//! - [`Customer`] - A person renting cars
//! - [`Dealer`] - A supplier of cars
//! - [`Car`] - A rentable vehicle
//! - [`Reservation`] - A car booked by a customer for an inclusive date range

pub mod car;
pub mod customer;
pub mod dealer;
pub mod reservation;

pub use car::{Car, NewCar};
pub use customer::{Customer, NewCustomer};
pub use dealer::{Dealer, NewDealer};
pub use reservation::{NewReservation, Reservation, ReservationDates};
