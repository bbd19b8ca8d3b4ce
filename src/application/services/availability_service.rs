//! Date-based availability service.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::availability::{
    CarAvailability, CarFilter, OccupancyQuery, availability_map, occupied_car_ids, project,
};
use crate::domain::availability_snapshot::AvailabilitySnapshot;
use crate::domain::booking::BookingRules;
use crate::domain::clock::Clock;
use crate::domain::repositories::{CarRepository, ReservationRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheLookup, CacheService};

/// Drops every cached occupied set.
///
/// Failures are logged and swallowed: the cache is keyed by generation and
/// entries expire on their own.
pub async fn invalidate_availability(cache: &dyn CacheService) {
    if let Err(e) = cache.invalidate_all().await {
        warn!(error = %e, "Failed to invalidate availability cache");
    }
}

/// Computes which cars are free on a date.
///
/// The occupied-car set for `(rules, date)` is read through the cache. Every
/// computation is published to the snapshot worker, which writes the flags
/// back onto the car records off the request path.
pub struct AvailabilityService<C: CarRepository + ?Sized, R: ReservationRepository + ?Sized> {
    cars: Arc<C>,
    reservations: Arc<R>,
    cache: Arc<dyn CacheService>,
    snapshots: mpsc::Sender<AvailabilitySnapshot>,
    clock: Arc<dyn Clock>,
    rules: BookingRules,
    cache_ttl: Option<u64>,
}

impl<C, R> AvailabilityService<C, R>
where
    C: CarRepository + ?Sized,
    R: ReservationRepository + ?Sized,
{
    pub fn new(
        cars: Arc<C>,
        reservations: Arc<R>,
        cache: Arc<dyn CacheService>,
        snapshots: mpsc::Sender<AvailabilitySnapshot>,
        clock: Arc<dyn Clock>,
        rules: BookingRules,
    ) -> Self {
        Self {
            cars,
            reservations,
            cache,
            snapshots,
            clock,
            rules,
            cache_ttl: None,
        }
    }

    /// Overrides the cache backend's default entry TTL.
    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = Some(seconds);
        self
    }

    pub fn rules(&self) -> BookingRules {
        self.rules
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Maps every car id to its availability on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    pub async fn compute_availability(&self, date: NaiveDate) -> Result<BTreeMap<i64, bool>, AppError> {
        let occupied = self.occupied_on(date).await?;
        let cars = self.cars.list().await?;
        let map = availability_map(&cars, &occupied);

        self.publish(date, occupied);
        Ok(map)
    }

    /// Cars with their availability on `date`, narrowed by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    pub async fn cars_on_date(
        &self,
        date: NaiveDate,
        filter: &CarFilter,
    ) -> Result<Vec<CarAvailability>, AppError> {
        let occupied = self.occupied_on(date).await?;
        let cars = self.cars.list().await?;
        let projected = project(cars, &occupied);

        self.publish(date, occupied);
        Ok(filter.apply(projected))
    }

    /// Occupied car ids on `date` under the configured rule set.
    pub async fn occupied_on(&self, date: NaiveDate) -> Result<BTreeSet<i64>, AppError> {
        let key = format!("{}:{}", self.rules, date);

        let generation = match self.cache.get_occupied(&key).await {
            Ok(CacheLookup::Hit(occupied)) => {
                metrics::counter!("availability_queries_total", "cache" => "hit").increment(1);
                debug!(%date, "Availability cache hit");
                return Ok(occupied);
            }
            Ok(CacheLookup::Miss { generation }) => Some(generation),
            Ok(CacheLookup::Unavailable) => None,
            Err(e) => {
                warn!(error = %e, "Availability cache read failed");
                None
            }
        };

        metrics::counter!("availability_queries_total", "cache" => "miss").increment(1);

        let query = OccupancyQuery::for_date(date, self.rules);
        let reservations = self.reservations.find_by_occupancy(query).await?;
        let occupied = occupied_car_ids(&reservations, query);

        // Stored under the generation the lookup saw, never the current one:
        // a booking that invalidated in between must not be masked.
        if let Some(generation) = generation {
            if let Err(e) = self
                .cache
                .set_occupied(generation, &key, &occupied, self.cache_ttl)
                .await
            {
                warn!(error = %e, "Availability cache write failed");
            }
        }

        Ok(occupied)
    }

    fn publish(&self, date: NaiveDate, occupied: BTreeSet<i64>) {
        match self.snapshots.try_send(AvailabilitySnapshot::new(date, occupied)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!(%date, "Snapshot queue full, dropping snapshot"),
            Err(TrySendError::Closed(_)) => warn!(%date, "Snapshot queue closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::entities::{Car, Reservation};
    use crate::domain::repositories::{MockCarRepository, MockReservationRepository};
    use crate::infrastructure::cache::{CacheError, CacheResult, MockCacheService, NullCache};
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn car(id: i64, model: &str) -> Car {
        Car::new(id, format!("KA-{id}"), model.to_string(), 5, 1200, None, None, Utc::now())
    }

    fn reservation(id: i64, car_id: i64, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation::new(id, 1, car_id, start, end, Utc::now())
    }

    fn service(
        cars: MockCarRepository,
        reservations: MockReservationRepository,
        cache: Arc<dyn CacheService>,
        rules: BookingRules,
    ) -> (
        AvailabilityService<MockCarRepository, MockReservationRepository>,
        mpsc::Receiver<AvailabilitySnapshot>,
    ) {
        let (tx, rx) = mpsc::channel(4);
        let svc = AvailabilityService::new(
            Arc::new(cars),
            Arc::new(reservations),
            cache,
            tx,
            Arc::new(FixedClock(d(2024, 3, 1))),
            rules,
        );
        (svc, rx)
    }

    #[tokio::test]
    async fn test_compute_availability_strict_rules() {
        let mut cars = MockCarRepository::new();
        cars.expect_list()
            .returning(|| Ok(vec![car(1, "Swift"), car(2, "Innova")]));

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_occupancy()
            .withf(|q| *q == OccupancyQuery::Covering { date: d(2024, 3, 3) })
            .times(1)
            .returning(|_| Ok(vec![reservation(1, 2, d(2024, 3, 1), d(2024, 3, 5))]));

        let (svc, mut rx) = service(cars, reservations, Arc::new(NullCache), BookingRules::Strict);

        let map = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(map, BTreeMap::from([(1, true), (2, false)]));

        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.date, d(2024, 3, 3));
        assert_eq!(snapshot.occupied, BTreeSet::from([2]));
    }

    #[tokio::test]
    async fn test_legacy_rules_use_legacy_predicate() {
        let mut cars = MockCarRepository::new();
        cars.expect_list().returning(|| Ok(vec![car(1, "Swift")]));

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_occupancy()
            .withf(|q| matches!(q, OccupancyQuery::Legacy { .. }))
            .times(1)
            .returning(|_| Ok(vec![reservation(1, 1, d(2024, 4, 1), d(2024, 4, 2))]));

        let (svc, _rx) = service(cars, reservations, Arc::new(NullCache), BookingRules::Legacy);

        let map = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(map.get(&1), Some(&false));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_reservation_query() {
        let mut cars = MockCarRepository::new();
        cars.expect_list()
            .returning(|| Ok(vec![car(1, "Swift"), car(2, "Innova")]));

        let mut reservations = MockReservationRepository::new();
        reservations.expect_find_by_occupancy().never();

        let mut cache = MockCacheService::new();
        cache
            .expect_get_occupied()
            .withf(|key| key.to_string() == "strict:2024-03-03")
            .returning(|_| Ok(CacheLookup::Hit(BTreeSet::from([1]))));
        cache.expect_set_occupied().never();

        let (svc, _rx) = service(cars, reservations, Arc::new(cache), BookingRules::Strict);

        let result = svc
            .cars_on_date(d(2024, 3, 3), &CarFilter::new().with_availability(Some(true)))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].car.id, 2);
    }

    #[tokio::test]
    async fn test_cache_miss_stores_under_looked_up_generation() {
        let mut cars = MockCarRepository::new();
        cars.expect_list().returning(|| Ok(vec![car(1, "Swift")]));

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_occupancy()
            .times(1)
            .returning(|_| Ok(vec![reservation(1, 1, d(2024, 3, 1), d(2024, 3, 5))]));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_occupied()
            .returning(|_| Ok(CacheLookup::Miss { generation: 7 }));
        cache
            .expect_set_occupied()
            .withf(|generation, key, ids, _| {
                *generation == 7 && key.to_string() == "strict:2024-03-03" && *ids == BTreeSet::from([1])
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let (svc, _rx) = service(cars, reservations, Arc::new(cache), BookingRules::Strict);

        let map = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(map.get(&1), Some(&false));
    }

    /// In-memory generation-keyed cache. With `invalidate_after_lookup` set, the
    /// next miss is followed by an invalidation, as when a booking commits
    /// while the occupied set is being recomputed.
    #[derive(Default)]
    struct GenerationCache {
        generation: AtomicU64,
        entries: Mutex<HashMap<(u64, String), BTreeSet<i64>>>,
        invalidate_after_lookup: AtomicBool,
    }

    #[async_trait::async_trait]
    impl CacheService for GenerationCache {
        async fn get_occupied(&self, key: &str) -> CacheResult<CacheLookup> {
            let generation = self.generation.load(Ordering::SeqCst);
            let cached = self
                .entries
                .lock()
                .unwrap()
                .get(&(generation, key.to_string()))
                .cloned();
            if let Some(ids) = cached {
                return Ok(CacheLookup::Hit(ids));
            }
            if self.invalidate_after_lookup.swap(false, Ordering::SeqCst) {
                self.invalidate_all().await?;
            }
            Ok(CacheLookup::Miss { generation })
        }

        async fn set_occupied(
            &self,
            generation: u64,
            key: &str,
            car_ids: &BTreeSet<i64>,
            _ttl_seconds: Option<u64>,
        ) -> CacheResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert((generation, key.to_string()), car_ids.clone());
            Ok(())
        }

        async fn invalidate_all(&self) -> CacheResult<()> {
            self.generation.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_invalidation_during_recompute_is_not_masked() {
        let mut cars = MockCarRepository::new();
        cars.expect_list().returning(|| Ok(vec![car(1, "Swift")]));

        // First read sees the store before the booking lands, the second after.
        let calls = Arc::new(AtomicUsize::new(0));
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_occupancy()
            .times(2)
            .returning(move |_| {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(vec![])
                } else {
                    Ok(vec![reservation(1, 1, d(2024, 3, 1), d(2024, 3, 5))])
                }
            });

        let cache = Arc::new(GenerationCache::default());
        cache.invalidate_after_lookup.store(true, Ordering::SeqCst);

        let (svc, _rx) = service(cars, reservations, cache.clone(), BookingRules::Strict);

        let before = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(before.get(&1), Some(&true));
        assert_eq!(cache.generation.load(Ordering::SeqCst), 1);

        // The stale set went to the dead generation, so this read misses.
        let after = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(after.get(&1), Some(&false));

        // And the fresh set is now served from cache.
        let cached = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(cached.get(&1), Some(&false));
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_store() {
        let mut cars = MockCarRepository::new();
        cars.expect_list().returning(|| Ok(vec![car(1, "Swift")]));

        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_occupancy()
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_occupied()
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        cache.expect_set_occupied().never();

        let (svc, _rx) = service(cars, reservations, Arc::new(cache), BookingRules::Strict);

        let map = svc.compute_availability(d(2024, 3, 3)).await.unwrap();
        assert_eq!(map.get(&1), Some(&true));
    }

    #[tokio::test]
    async fn test_full_snapshot_queue_does_not_fail_request() {
        let mut cars = MockCarRepository::new();
        cars.expect_list().returning(|| Ok(vec![car(1, "Swift")]));
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_by_occupancy()
            .returning(|_| Ok(vec![]));

        let (tx, _rx) = mpsc::channel(1);
        let svc = AvailabilityService::new(
            Arc::new(cars),
            Arc::new(reservations),
            Arc::new(NullCache) as Arc<dyn CacheService>,
            tx,
            Arc::new(FixedClock(d(2024, 3, 1))),
            BookingRules::Strict,
        );

        for _ in 0..3 {
            assert!(svc.compute_availability(d(2024, 3, 3)).await.is_ok());
        }
    }
}
