//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AvailabilityService, CarService, CustomerService, DealerService, ReservationService,
};
use crate::domain::availability_snapshot::AvailabilitySnapshot;
use crate::domain::booking::BookingRules;
use crate::domain::clock::Clock;
use crate::domain::repositories::{
    CarRepository, CustomerRepository, DealerRepository, ReservationRepository,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgCarRepository, PgCustomerRepository, PgDealerRepository, PgReservationRepository,
};

/// The four entity repositories behind one backend.
#[derive(Clone)]
pub struct Stores {
    pub customers: Arc<dyn CustomerRepository>,
    pub dealers: Arc<dyn DealerRepository>,
    pub cars: Arc<dyn CarRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            dealers: Arc::new(PgDealerRepository::new(pool.clone())),
            cars: Arc::new(PgCarRepository::new(pool.clone())),
            reservations: Arc::new(PgReservationRepository::new(pool)),
        }
    }

    /// Every repository served by the same in-memory store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            customers: store.clone(),
            dealers: store.clone(),
            cars: store.clone(),
            reservations: store,
        }
    }
}

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService<dyn CustomerRepository>>,
    pub dealer_service: Arc<DealerService<dyn DealerRepository>>,
    pub car_service: Arc<CarService<dyn CarRepository, dyn ReservationRepository>>,
    pub reservation_service: Arc<
        ReservationService<dyn ReservationRepository, dyn CarRepository, dyn CustomerRepository>,
    >,
    pub availability_service: Arc<AvailabilityService<dyn CarRepository, dyn ReservationRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub snapshot_sender: mpsc::Sender<AvailabilitySnapshot>,
}

impl AppState {
    /// Wires all services over `stores`.
    ///
    /// `cache_ttl` overrides the cache backend's default TTL for availability
    /// entries when set.
    pub fn new(
        stores: Stores,
        cache: Arc<dyn CacheService>,
        snapshot_sender: mpsc::Sender<AvailabilitySnapshot>,
        clock: Arc<dyn Clock>,
        rules: BookingRules,
        cache_ttl: Option<u64>,
    ) -> Self {
        let customer_service = Arc::new(CustomerService::new(
            stores.customers.clone(),
            cache.clone(),
        ));
        let dealer_service = Arc::new(DealerService::new(stores.dealers.clone()));
        let car_service = Arc::new(CarService::new(
            stores.cars.clone(),
            stores.reservations.clone(),
            cache.clone(),
            clock.clone(),
        ));
        let reservation_service = Arc::new(ReservationService::new(
            stores.reservations.clone(),
            stores.cars.clone(),
            stores.customers.clone(),
            cache.clone(),
            clock.clone(),
            rules,
        ));

        let mut availability_service = AvailabilityService::new(
            stores.cars,
            stores.reservations,
            cache.clone(),
            snapshot_sender.clone(),
            clock,
            rules,
        );
        if let Some(ttl) = cache_ttl {
            availability_service = availability_service.with_cache_ttl(ttl);
        }

        Self {
            customer_service,
            dealer_service,
            car_service,
            reservation_service,
            availability_service: Arc::new(availability_service),
            cache,
            snapshot_sender,
        }
    }
}
