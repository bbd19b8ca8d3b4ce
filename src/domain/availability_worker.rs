//! Background write-back of computed availability flags.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::availability_snapshot::AvailabilitySnapshot;
use crate::domain::repositories::CarRepository;
use crate::error::AppError;

const RETRY_BASE_MS: u64 = 10;
const RETRY_ATTEMPTS: usize = 3;

/// Consumes availability snapshots and writes them onto car records.
///
/// Pending snapshots are coalesced: only the newest one in the queue is
/// applied. The write is "all available, then occupied ones unavailable" and
/// is not atomic across cars, so a concurrent snapshot can leave the stored
/// flags briefly inconsistent. Nothing reads those flags to make decisions.
///
/// Runs until every sender is dropped.
pub async fn run_availability_worker<C>(mut rx: mpsc::Receiver<AvailabilitySnapshot>, cars: Arc<C>)
where
    C: CarRepository + ?Sized,
{
    while let Some(mut snapshot) = rx.recv().await {
        let mut skipped = 0usize;
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, "Coalesced availability snapshots");
        }

        match apply_snapshot(cars.as_ref(), &snapshot).await {
            Ok(()) => debug!(
                date = %snapshot.date,
                occupied = snapshot.occupied.len(),
                "Availability flags written"
            ),
            Err(e) => warn!(date = %snapshot.date, error = %e, "Failed to write availability flags"),
        }
    }

    info!("Availability worker stopped");
}

/// Writes one snapshot onto the car records.
///
/// Cars deleted since the snapshot was taken are skipped.
pub async fn apply_snapshot<C>(cars: &C, snapshot: &AvailabilitySnapshot) -> Result<(), AppError>
where
    C: CarRepository + ?Sized,
{
    with_retry(|| cars.set_all_availability(true)).await?;

    for &car_id in &snapshot.occupied {
        match with_retry(|| cars.update_availability(car_id, false)).await {
            Ok(()) => {}
            Err(AppError::NotFound { .. }) => debug!(car_id, "Car vanished before flag write"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Retries store writes that failed for infrastructure reasons.
async fn with_retry<T, F, Fut>(action: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MS)
        .map(jitter)
        .take(RETRY_ATTEMPTS);

    RetryIf::spawn(strategy, action, |e: &AppError| {
        matches!(e, AppError::StoreUnavailable { .. })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCarRepository;
    use chrono::NaiveDate;
    use mockall::Sequence;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn snapshot(occupied: &[i64]) -> AvailabilitySnapshot {
        AvailabilitySnapshot::new(
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            occupied.iter().copied().collect::<BTreeSet<_>>(),
        )
    }

    #[tokio::test]
    async fn test_apply_resets_then_marks_occupied() {
        let mut repo = MockCarRepository::new();
        let mut seq = Sequence::new();

        repo.expect_set_all_availability()
            .withf(|available| *available)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_update_availability()
            .withf(|id, available| *id == 2 && !*available)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        repo.expect_update_availability()
            .withf(|id, available| *id == 5 && !*available)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let result = apply_snapshot(&repo, &snapshot(&[5, 2])).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_apply_skips_deleted_cars() {
        let mut repo = MockCarRepository::new();

        repo.expect_set_all_availability().returning(|_| Ok(()));
        repo.expect_update_availability()
            .times(2)
            .returning(|id, _| {
                if id == 1 {
                    Err(AppError::not_found("Car not found", json!({ "id": id })))
                } else {
                    Ok(())
                }
            });

        let result = apply_snapshot(&repo, &snapshot(&[1, 2])).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_apply_retries_store_unavailable() {
        let mut repo = MockCarRepository::new();
        let mut seq = Sequence::new();

        repo.expect_set_all_availability()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::store_unavailable("down", json!({}))));
        repo.expect_set_all_availability()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let result = apply_snapshot(&repo, &snapshot(&[])).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_apply_does_not_retry_internal_errors() {
        let mut repo = MockCarRepository::new();

        repo.expect_set_all_availability()
            .times(1)
            .returning(|_| Err(AppError::internal("boom", json!({}))));

        let result = apply_snapshot(&repo, &snapshot(&[1])).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_worker_coalesces_pending_snapshots() {
        let mut repo = MockCarRepository::new();

        repo.expect_set_all_availability()
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_update_availability()
            .withf(|id, _| *id == 9)
            .times(1)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(snapshot(&[1])).await.unwrap();
        tx.send(snapshot(&[2])).await.unwrap();
        tx.send(snapshot(&[9])).await.unwrap();
        drop(tx);

        run_availability_worker(rx, Arc::new(repo)).await;
    }
}
