use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::purge::{PurgeReport, PurgeService},
};

/// Starts the scheduler that hard deletes readers past the retention window.
///
/// Ticks that fire while a previous run is still going are skipped.
///
/// # Arguments
/// - `db`: Database connection
/// - `schedule`: Six field cron expression (seconds first)
/// - `retention_days`: Days a soft deleted reader is kept
///
/// # Returns
/// The running scheduler; keep it to shut it down with the server.
pub async fn start_scheduler(
    db: DatabaseConnection,
    schedule: &str,
    retention_days: i64,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let db = db.clone();
        let running = running.clone();

        Box::pin(async move {
            match run_purge(&db, retention_days, &running).await {
                Ok(Some(report)) => tracing::info!(
                    "Purged {} users, {} circles, {} library records, {} borrow requests, {} circle entries, {} circle links",
                    report.users,
                    report.circles,
                    report.library_records,
                    report.borrow_requests,
                    report.circle_entries,
                    report.circle_links
                ),
                Ok(None) => tracing::warn!("User purge still running, skipping this tick"),
                Err(e) => tracing::error!("Error purging deleted users: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "User purge scheduler started ({}, retention {} days)",
        schedule,
        retention_days
    );

    Ok(scheduler)
}

/// Clears the running flag when a purge run ends, including on error.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs one purge unless another run holds the flag.
///
/// # Returns
/// - `Ok(Some(PurgeReport))` - The run finished
/// - `Ok(None)` - Another run was in progress; nothing was done
/// - `Err(AppError)` - The run failed and was rolled back
async fn run_purge(
    db: &DatabaseConnection,
    retention_days: i64,
    running: &AtomicBool,
) -> Result<Option<PurgeReport>, AppError> {
    if running
        .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
        .is_err()
    {
        return Ok(None);
    }
    let _guard = RunningGuard(running);

    let report = PurgeService::new(db)
        .purge_deleted_users(Utc::now(), retention_days)
        .await?;

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    #[tokio::test]
    async fn skips_while_another_run_holds_the_flag() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let running = AtomicBool::new(true);

        let report = run_purge(db, 15, &running).await?;

        assert!(report.is_none());
        assert!(running.load(Ordering::Acquire));

        Ok(())
    }

    #[tokio::test]
    async fn releases_the_flag_after_a_run() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::user::UserFactory::new(db)
            .deleted_at(Utc::now() - Duration::days(20))
            .build()
            .await?;
        let running = AtomicBool::new(false);

        let report = run_purge(db, 15, &running).await?;

        assert_eq!(report.map(|r| r.users), Some(1));
        assert!(!running.load(Ordering::Acquire));

        Ok(())
    }
}
