//! Customer entity.

use chrono::{DateTime, Utc};

/// A customer who can hold reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        id: i64,
        name: String,
        email: String,
        phone: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            created_at,
        }
    }
}

/// Input data for creating or replacing a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}
