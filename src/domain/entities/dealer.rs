//! Car dealer entity.

use chrono::{DateTime, Utc};

/// A dealer that supplies cars. Cars point at their dealer through
/// [`crate::domain::entities::Car::dealer_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub area: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Dealer {
    pub fn new(
        id: i64,
        name: String,
        mobile: String,
        area: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            mobile,
            area,
            email,
            created_at,
        }
    }
}

/// Input data for creating or replacing a dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDealer {
    pub name: String,
    pub mobile: String,
    pub area: String,
    pub email: String,
}
