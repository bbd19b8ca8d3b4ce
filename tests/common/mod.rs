#![allow(dead_code)]

use axum_test::TestServer;
use car_rental::domain::availability_snapshot::AvailabilitySnapshot;
use car_rental::domain::booking::BookingRules;
use car_rental::domain::clock::FixedClock;
use car_rental::infrastructure::cache::NullCache;
use car_rental::infrastructure::memory::MemoryStore;
use car_rental::routes::unthrottled_router;
use car_rental::state::{AppState, Stores};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The date every test server treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub snapshots: mpsc::Receiver<AvailabilitySnapshot>,
}

pub fn create_test_state(
    rules: BookingRules,
) -> (AppState, Arc<MemoryStore>, mpsc::Receiver<AvailabilitySnapshot>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Stores::memory(store.clone()),
        Arc::new(NullCache),
        tx,
        Arc::new(FixedClock(today())),
        rules,
        None,
    );

    (state, store, rx)
}

pub fn test_app(rules: BookingRules) -> TestApp {
    let (state, store, snapshots) = create_test_state(rules);
    let server = TestServer::new(unthrottled_router(state.clone())).unwrap();

    TestApp {
        server,
        store,
        state,
        snapshots,
    }
}

pub async fn create_customer(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/customers")
        .json(&json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "phone": "9876543210"
        }))
        .await;
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_car(server: &TestServer, model: &str, seats: i32) -> i64 {
    let response = server
        .post("/api/cars")
        .json(&json!({
            "vehicle_number": format!("KA-{model}-{seats}"),
            "model": model,
            "seating_capacity": seats,
            "rent_per_day": 1500
        }))
        .await;
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_dealer(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/dealers")
        .json(&json!({
            "name": name,
            "mobile": "+919876543210",
            "area": "Koramangala",
            "email": "sales@dealer.in"
        }))
        .await;
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Books `car` for `customer` and returns the raw response.
pub async fn book(
    server: &TestServer,
    customer: i64,
    car: i64,
    issue_date: &str,
    return_date: &str,
) -> axum_test::TestResponse {
    server
        .post("/api/reservations")
        .json(&json!({
            "customer": customer,
            "car": car,
            "issue_date": issue_date,
            "return_date": return_date
        }))
        .await
}
