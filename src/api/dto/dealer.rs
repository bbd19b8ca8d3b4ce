//! DTOs for dealer management.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Dealer, NewDealer};

/// Digits with an optional leading `+`.
static MOBILE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]+$").unwrap());

/// Request body for creating or replacing a dealer.
#[derive(Debug, Deserialize, Validate)]
pub struct DealerRequest {
    #[validate(length(min = 1, max = 30))]
    pub name: String,

    #[validate(
        length(min = 10, max = 13, message = "Mobile must be 10 to 13 characters"),
        regex(path = "*MOBILE_REGEX", message = "Mobile may contain only digits and a leading '+'")
    )]
    pub mobile: String,

    #[validate(length(min = 1, max = 30))]
    pub area: String,

    #[validate(email(message = "Invalid email address"), length(max = 30))]
    pub email: String,
}

impl From<DealerRequest> for NewDealer {
    fn from(r: DealerRequest) -> Self {
        NewDealer {
            name: r.name,
            mobile: r.mobile,
            area: r.area,
            email: r.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DealerItem {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub area: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Dealer> for DealerItem {
    fn from(d: Dealer) -> Self {
        DealerItem {
            id: d.id,
            name: d.name,
            mobile: d.mobile,
            area: d.area,
            email: d.email,
            created_at: d.created_at,
        }
    }
}
