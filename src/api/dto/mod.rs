//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field limits mirror the column sizes of the schema.

pub mod availability;
pub mod car;
pub mod customer;
pub mod dealer;
pub mod health;
pub mod list;
pub mod reservation;
