//! API route configuration.

use crate::api::handlers::{
    book_reservation_handler, cancel_reservation_handler, car_active_bookings_handler,
    car_detail_handler, car_list_handler, cars_status_handler, create_car_handler,
    create_customer_handler, create_dealer_handler, customer_detail_handler,
    customer_list_handler, dealer_detail_handler, dealer_list_handler, delete_car_handler,
    delete_customer_handler, delete_dealer_handler, extend_reservation_handler,
    reservation_detail_handler, reservation_list_handler, update_car_handler,
    update_customer_handler, update_dealer_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// All REST API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET, POST          /customers`                - List / create customers
/// - `GET, PUT, DELETE   /customers/{id}`           - Get / replace / delete a customer
/// - `GET, POST          /cars`                     - List / register cars
/// - `GET                /cars/status`              - Availability on a date, with filters
/// - `GET, PUT, DELETE   /cars/{id}`                - Get / replace / delete a car
/// - `GET                /cars/{id}/active-bookings` - Car with bookings ending today or later
/// - `GET, POST          /reservations`             - List / book
/// - `GET, DELETE        /reservations/{id}`        - Get / cancel
/// - `PUT                /reservations/{id}/extend` - Move a reservation to new dates
/// - `GET, POST          /dealers`                  - List / create dealers
/// - `GET, PUT, DELETE   /dealers/{id}`             - Get / replace / delete a dealer
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(customer_list_handler).post(create_customer_handler),
        )
        .route(
            "/customers/{id}",
            get(customer_detail_handler)
                .put(update_customer_handler)
                .delete(delete_customer_handler),
        )
        .route("/cars", get(car_list_handler).post(create_car_handler))
        .route("/cars/status", get(cars_status_handler))
        .route(
            "/cars/{id}",
            get(car_detail_handler)
                .put(update_car_handler)
                .delete(delete_car_handler),
        )
        .route("/cars/{id}/active-bookings", get(car_active_bookings_handler))
        .route(
            "/reservations",
            get(reservation_list_handler).post(book_reservation_handler),
        )
        .route(
            "/reservations/{id}",
            get(reservation_detail_handler).delete(cancel_reservation_handler),
        )
        .route("/reservations/{id}/extend", put(extend_reservation_handler))
        .route(
            "/dealers",
            get(dealer_list_handler).post(create_dealer_handler),
        )
        .route(
            "/dealers/{id}",
            get(dealer_detail_handler)
                .put(update_dealer_handler)
                .delete(delete_dealer_handler),
        )
}
