//! In-memory entity store.
//!
//! [`MemoryStore`] implements every repository trait over a single
//! `tokio::sync::RwLock`, so a cascading delete is applied under one write
//! lock. It keeps the relational rules of the PostgreSQL schema:
//!
//! - a reservation must reference an existing car and customer
//! - a car may only reference an existing dealer
//! - deleting a car or a customer deletes its reservations
//! - deleting a dealer unlinks its cars
//!
//! Ids are allocated from per-table sequences and never reused.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::availability::OccupancyQuery;
use crate::domain::entities::{
    Car, Customer, Dealer, NewCar, NewCustomer, NewDealer, NewReservation, Reservation,
    ReservationDates,
};
use crate::domain::repositories::{
    CarRepository, CustomerRepository, DealerRepository, ReservationRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    dealers: BTreeMap<i64, Dealer>,
    cars: BTreeMap<i64, Car>,
    reservations: BTreeMap<i64, Reservation>,
    customer_seq: Sequence,
    dealer_seq: Sequence,
    car_seq: Sequence,
    reservation_seq: Sequence,
}

impl Tables {
    fn check_dealer(&self, dealer_id: Option<i64>) -> Result<(), AppError> {
        match dealer_id {
            Some(id) if !self.dealers.contains_key(&id) => Err(AppError::not_found(
                "Referenced record not found",
                json!({ "dealer": id }),
            )),
            _ => Ok(()),
        }
    }

    fn sorted_by_issue(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
        reservations.sort_by_key(|r| (r.issue_date, r.id));
        reservations
    }
}

/// Entity store kept entirely in process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create(&self, new_customer: NewCustomer) -> Result<Customer, AppError> {
        let mut t = self.tables.write().await;
        let id = t.customer_seq.next();
        let customer = Customer::new(
            id,
            new_customer.name,
            new_customer.email,
            new_customer.phone,
            Utc::now(),
        );
        t.customers.insert(id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.tables.read().await.customers.values().cloned().collect())
    }

    async fn update(&self, id: i64, customer: NewCustomer) -> Result<Customer, AppError> {
        let mut t = self.tables.write().await;
        let existing = t
            .customers
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Customer not found", json!({ "id": id })))?;

        existing.name = customer.name;
        existing.email = customer.email;
        existing.phone = customer.phone;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        if t.customers.remove(&id).is_none() {
            return Err(AppError::not_found("Customer not found", json!({ "id": id })));
        }
        t.reservations.retain(|_, r| r.customer_id != id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.customers.len() as i64)
    }
}

#[async_trait]
impl DealerRepository for MemoryStore {
    async fn create(&self, new_dealer: NewDealer) -> Result<Dealer, AppError> {
        let mut t = self.tables.write().await;
        let id = t.dealer_seq.next();
        let dealer = Dealer::new(
            id,
            new_dealer.name,
            new_dealer.mobile,
            new_dealer.area,
            new_dealer.email,
            Utc::now(),
        );
        t.dealers.insert(id, dealer.clone());
        Ok(dealer)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Dealer>, AppError> {
        Ok(self.tables.read().await.dealers.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Dealer>, AppError> {
        Ok(self.tables.read().await.dealers.values().cloned().collect())
    }

    async fn update(&self, id: i64, dealer: NewDealer) -> Result<Dealer, AppError> {
        let mut t = self.tables.write().await;
        let existing = t
            .dealers
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Dealer not found", json!({ "id": id })))?;

        existing.name = dealer.name;
        existing.mobile = dealer.mobile;
        existing.area = dealer.area;
        existing.email = dealer.email;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        if t.dealers.remove(&id).is_none() {
            return Err(AppError::not_found("Dealer not found", json!({ "id": id })));
        }
        for car in t.cars.values_mut() {
            if car.dealer_id == Some(id) {
                car.dealer_id = None;
            }
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.dealers.len() as i64)
    }
}

#[async_trait]
impl CarRepository for MemoryStore {
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError> {
        let mut t = self.tables.write().await;
        t.check_dealer(new_car.dealer_id)?;

        let id = t.car_seq.next();
        let car = Car::new(
            id,
            new_car.vehicle_number,
            new_car.model,
            new_car.seating_capacity,
            new_car.rent_per_day,
            None,
            new_car.dealer_id,
            Utc::now(),
        );
        t.cars.insert(id, car.clone());
        Ok(car)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError> {
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Car>, AppError> {
        Ok(self.tables.read().await.cars.values().cloned().collect())
    }

    async fn update(&self, id: i64, car: NewCar) -> Result<Car, AppError> {
        let mut t = self.tables.write().await;
        t.check_dealer(car.dealer_id)?;

        let existing = t
            .cars
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Car not found", json!({ "id": id })))?;

        existing.vehicle_number = car.vehicle_number;
        existing.model = car.model;
        existing.seating_capacity = car.seating_capacity;
        existing.rent_per_day = car.rent_per_day;
        existing.dealer_id = car.dealer_id;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        if t.cars.remove(&id).is_none() {
            return Err(AppError::not_found("Car not found", json!({ "id": id })));
        }
        t.reservations.retain(|_, r| r.car_id != id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.cars.len() as i64)
    }

    async fn set_all_availability(&self, available: bool) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        for car in t.cars.values_mut() {
            car.availability = Some(available);
        }
        Ok(())
    }

    async fn update_availability(&self, id: i64, available: bool) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        let car = t
            .cars
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Car not found", json!({ "id": id })))?;
        car.availability = Some(available);
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn create(&self, new_reservation: NewReservation) -> Result<Reservation, AppError> {
        let mut t = self.tables.write().await;
        if !t.cars.contains_key(&new_reservation.car_id) {
            return Err(AppError::not_found(
                "Referenced record not found",
                json!({ "car": new_reservation.car_id }),
            ));
        }
        if !t.customers.contains_key(&new_reservation.customer_id) {
            return Err(AppError::not_found(
                "Referenced record not found",
                json!({ "customer": new_reservation.customer_id }),
            ));
        }

        let id = t.reservation_seq.next();
        let reservation = Reservation::new(
            id,
            new_reservation.customer_id,
            new_reservation.car_id,
            new_reservation.issue_date,
            new_reservation.return_date,
            Utc::now(),
        );
        t.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        Ok(self.tables.read().await.reservations.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .reservations
            .values()
            .cloned()
            .collect())
    }

    async fn find_by_car(&self, car_id: i64) -> Result<Vec<Reservation>, AppError> {
        let t = self.tables.read().await;
        let found = t
            .reservations
            .values()
            .filter(|r| r.car_id == car_id)
            .cloned()
            .collect();
        Ok(Tables::sorted_by_issue(found))
    }

    async fn find_active_by_car(
        &self,
        car_id: i64,
        from: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        let t = self.tables.read().await;
        let found = t
            .reservations
            .values()
            .filter(|r| r.car_id == car_id && r.return_date >= from)
            .cloned()
            .collect();
        Ok(Tables::sorted_by_issue(found))
    }

    async fn find_by_occupancy(
        &self,
        query: OccupancyQuery,
    ) -> Result<Vec<Reservation>, AppError> {
        let t = self.tables.read().await;
        Ok(t.reservations
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn update_dates(
        &self,
        id: i64,
        dates: ReservationDates,
    ) -> Result<Reservation, AppError> {
        let mut t = self.tables.write().await;
        let reservation = t
            .reservations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Reservation not found", json!({ "id": id })))?;

        reservation.issue_date = dates.issue_date;
        reservation.return_date = dates.return_date;
        Ok(reservation.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut t = self.tables.write().await;
        t.reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Reservation not found", json!({ "id": id })))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.reservations.len() as i64)
    }
}
