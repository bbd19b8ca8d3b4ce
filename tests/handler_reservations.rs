mod common;

use axum::http::StatusCode;
use car_rental::domain::booking::BookingRules;
use serde_json::{Value, json};

#[tokio::test]
async fn test_book_reservation_success() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let response = common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["customer"], customer);
    assert_eq!(json["car"], car);
    assert_eq!(json["issue_date"], "2023-12-05");
    assert_eq!(json["return_date"], "2023-12-10");

    let id = json["id"].as_i64().unwrap();
    let detail = app.server.get(&format!("/api/reservations/{id}")).await;
    detail.assert_status_ok();
    assert_eq!(detail.json::<Value>()["car"], car);
}

#[tokio::test]
async fn test_book_same_day_as_today() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let response = common::book(&app.server, customer, car, "2023-12-01", "2023-12-01").await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let first = common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;
    let first_id = first.json::<Value>()["id"].as_i64().unwrap();

    let response = common::book(&app.server, customer, car, "2023-12-08", "2023-12-12").await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "booking_conflict");
    assert_eq!(
        json["error"]["message"],
        "The selected car is not available on this date"
    );
    assert_eq!(json["error"]["details"]["conflicting_reservation"], first_id);
}

#[tokio::test]
async fn test_strict_rules_reject_enclosing_booking() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    common::book(&app.server, customer, car, "2023-12-05", "2023-12-10")
        .await
        .assert_status(StatusCode::CREATED);

    common::book(&app.server, customer, car, "2023-12-01", "2023-12-20")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_legacy_rules_only_check_issue_date() {
    let app = common::test_app(BookingRules::Legacy);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    common::book(&app.server, customer, car, "2023-12-05", "2023-12-10")
        .await
        .assert_status(StatusCode::CREATED);

    // Starts before the existing booking and swallows it.
    common::book(&app.server, customer, car, "2023-12-01", "2023-12-20")
        .await
        .assert_status(StatusCode::CREATED);

    // Starts inside it.
    common::book(&app.server, customer, car, "2023-12-07", "2023-12-08")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_inclusive_boundary_conflicts_next_day_allowed() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    common::book(&app.server, customer, car, "2023-12-05", "2023-12-10")
        .await
        .assert_status(StatusCode::CREATED);

    common::book(&app.server, customer, car, "2023-12-10", "2023-12-12")
        .await
        .assert_status(StatusCode::CONFLICT);

    common::book(&app.server, customer, car, "2023-12-11", "2023-12-12")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_other_car_is_unaffected() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let swift = common::create_car(&app.server, "Swift", 5).await;
    let innova = common::create_car(&app.server, "Innova", 7).await;

    common::book(&app.server, customer, swift, "2023-12-05", "2023-12-10")
        .await
        .assert_status(StatusCode::CREATED);

    common::book(&app.server, customer, innova, "2023-12-05", "2023-12-10")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_issue_date_in_past_is_rejected() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let response = common::book(&app.server, customer, car, "2023-11-30", "2023-12-02").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_date_range");
    assert_eq!(json["error"]["details"]["today"], "2023-12-01");
}

#[tokio::test]
async fn test_reversed_range_is_rejected() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let response = common::book(&app.server, customer, car, "2023-12-10", "2023-12-05").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_date_range");
}

#[tokio::test]
async fn test_malformed_date_is_validation_error() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let response = common::book(&app.server, customer, car, "05/12/2023", "2023-12-10").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["field"], "issue_date");
}

#[tokio::test]
async fn test_book_unknown_car_returns_404() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;

    let response = common::book(&app.server, customer, 999, "2023-12-05", "2023-12-10").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_book_unknown_customer_returns_404() {
    let app = common::test_app(BookingRules::Strict);
    let car = common::create_car(&app.server, "Swift", 5).await;

    let response = common::book(&app.server, 999, car, "2023-12-05", "2023-12-10").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_extend_reservation() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let booked = common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;
    let id = booked.json::<Value>()["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/reservations/{id}/extend"))
        .json(&json!({
            "customer": customer,
            "car": car,
            "issue_date": "2023-12-05",
            "return_date": "2023-12-15"
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["return_date"], "2023-12-15");
}

#[tokio::test]
async fn test_extend_into_another_booking_is_rejected() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let first = common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;
    let first_id = first.json::<Value>()["id"].as_i64().unwrap();
    let second = common::book(&app.server, customer, car, "2023-12-15", "2023-12-20").await;
    let second_id = second.json::<Value>()["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/api/reservations/{first_id}/extend"))
        .json(&json!({ "issue_date": "2023-12-05", "return_date": "2023-12-16" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(
        json["error"]["message"],
        "Failed to extend the date. Car is not available."
    );
    assert_eq!(json["error"]["details"]["conflicting_reservation"], second_id);

    let unchanged = app.server.get(&format!("/api/reservations/{first_id}")).await;
    assert_eq!(unchanged.json::<Value>()["return_date"], "2023-12-10");
}

#[tokio::test]
async fn test_legacy_extension_conflicts_with_own_span() {
    let app = common::test_app(BookingRules::Legacy);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let booked = common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;
    let id = booked.json::<Value>()["id"].as_i64().unwrap();

    // New return date falls inside the reservation being changed.
    let shortened = app
        .server
        .put(&format!("/api/reservations/{id}/extend"))
        .json(&json!({ "issue_date": "2023-12-05", "return_date": "2023-12-08" }))
        .await;
    shortened.assert_status(StatusCode::CONFLICT);

    let extended = app
        .server
        .put(&format!("/api/reservations/{id}/extend"))
        .json(&json!({ "issue_date": "2023-12-05", "return_date": "2023-12-12" }))
        .await;
    extended.assert_status_ok();
}

#[tokio::test]
async fn test_extend_unknown_reservation_returns_404() {
    let app = common::test_app(BookingRules::Strict);

    let response = app
        .server
        .put("/api/reservations/42/extend")
        .json(&json!({ "issue_date": "2023-12-05", "return_date": "2023-12-12" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_cancel_reservation() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    let booked = common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;
    let id = booked.json::<Value>()["id"].as_i64().unwrap();

    app.server
        .delete(&format!("/api/reservations/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/reservations/{id}"))
        .await
        .assert_status_not_found();

    app.server
        .delete(&format!("/api/reservations/{id}"))
        .await
        .assert_status_not_found();

    // The dates are free again.
    common::book(&app.server, customer, car, "2023-12-05", "2023-12-10")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_reservations() {
    let app = common::test_app(BookingRules::Strict);
    let customer = common::create_customer(&app.server, "Asha").await;
    let car = common::create_car(&app.server, "Swift", 5).await;

    common::book(&app.server, customer, car, "2023-12-05", "2023-12-10").await;
    common::book(&app.server, customer, car, "2023-12-15", "2023-12-16").await;

    let response = app.server.get("/api/reservations").await;

    response.assert_status_ok();
    let items = response.json::<Value>()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["issue_date"], "2023-12-05");
    assert_eq!(items[1]["issue_date"], "2023-12-15");
}
