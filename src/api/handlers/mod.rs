//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod availability;
pub mod cars;
pub mod customers;
pub mod dealers;
pub mod health;
pub mod home;
pub mod reservations;

pub use availability::cars_status_handler;
pub use cars::{
    car_active_bookings_handler, car_detail_handler, car_list_handler, create_car_handler,
    delete_car_handler, update_car_handler,
};
pub use customers::{
    create_customer_handler, customer_detail_handler, customer_list_handler,
    delete_customer_handler, update_customer_handler,
};
pub use dealers::{
    create_dealer_handler, dealer_detail_handler, dealer_list_handler, delete_dealer_handler,
    update_dealer_handler,
};
pub use health::health_handler;
pub use home::home_handler;
pub use reservations::{
    book_reservation_handler, cancel_reservation_handler, extend_reservation_handler,
    reservation_detail_handler, reservation_list_handler,
};
