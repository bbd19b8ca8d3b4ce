//! DTOs for customer management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Customer, NewCustomer};

/// Request body for creating or replacing a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email(message = "Invalid email address"), length(max = 255))]
    pub email: String,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,
}

impl From<CustomerRequest> for NewCustomer {
    fn from(r: CustomerRequest) -> Self {
        NewCustomer {
            name: r.name,
            email: r.email,
            phone: r.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerItem {
    fn from(c: Customer) -> Self {
        CustomerItem {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            created_at: c.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, phone: &str) -> CustomerRequest {
        CustomerRequest {
            name: "Asha".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn test_valid_customer() {
        assert!(request("asha@example.com", "9876543210").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let errors = request("not-an-email", "9876543210").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_phone_too_long() {
        let errors = request("asha@example.com", "123456789012345678901")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }
}
