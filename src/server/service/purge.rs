//! Hard deletion of readers soft deleted longer ago than the retention window.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        borrow_request::BorrowRequestRepository, inner_circle::InnerCircleRepository,
        library::LibraryRepository, user::UserRepository, user_circle::UserCircleRepository,
    },
    error::AppError,
};

/// Rows removed by one purge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub users: u64,
    /// Circles created by purged readers, deleted with all their members and links.
    pub circles: u64,
    pub library_records: u64,
    pub borrow_requests: u64,
    pub circle_entries: u64,
    pub circle_links: u64,
}

pub struct PurgeService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> PurgeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Purges readers deleted more than `retention_days` before `now`.
    ///
    /// Everything owned by a purged reader goes in the same transaction: their library
    /// record, borrow requests on either side, circle member entries and circle links.
    /// Circles they created are deleted outright with every member entry and link.
    ///
    /// # Returns
    /// - `Ok(PurgeReport)` - Counts per table, all zero when nobody was due
    /// - `Err(AppError::DbErr)` - Database error; nothing is deleted
    pub async fn purge_deleted_users(
        &self,
        now: DateTime<Utc>,
        retention_days: i64,
    ) -> Result<PurgeReport, AppError> {
        let cutoff = now - Duration::days(retention_days);

        let txn = self.db.begin().await?;
        let users = UserRepository::new(&txn);

        let ids = users.find_deleted_before(cutoff).await?;
        if ids.is_empty() {
            return Ok(PurgeReport::default());
        }

        let circles = InnerCircleRepository::new(&txn);
        let circle_links = UserCircleRepository::new(&txn);

        let created = circles.find_ids_created_by(&ids).await?;
        for circle_id in &created {
            circle_links.delete_for_circle(*circle_id).await?;
            circles.delete(*circle_id).await?;
        }

        let report = PurgeReport {
            circles: created.len() as u64,
            library_records: LibraryRepository::new(&txn).delete_for_users(&ids).await?,
            borrow_requests: BorrowRequestRepository::new(&txn)
                .delete_for_users(&ids)
                .await?,
            circle_entries: circles.delete_members_for_users(&ids).await?,
            circle_links: circle_links.delete_for_users(&ids).await?,
            users: users.delete_many(&ids).await?,
        };

        txn.commit().await?;

        Ok(report)
    }
}
