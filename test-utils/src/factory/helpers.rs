//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{ConnectionTrait, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique emails, names and ISBNs across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a reader and a circle owned by them.
///
/// The creator is seeded as an accepted ICAdmin member and the circle is linked
/// into their membership list, mirroring what circle creation does in the service.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((creator, circle))` - The created reader and circle
/// - `Err(DbErr)` - Database error during creation
pub async fn create_circle_with_creator<C: ConnectionTrait>(
    db: &C,
) -> Result<(entity::user::Model, entity::inner_circle::Model), DbErr> {
    let creator = crate::factory::user::create_user(db).await?;
    let circle = crate::factory::inner_circle::create_circle(db, creator.id).await?;

    Ok((creator, circle))
}

/// Creates a reader who is an accepted member of the given circle.
///
/// # Arguments
/// - `db` - Database connection
/// - `circle` - Circle the new reader joins
///
/// # Returns
/// - `Ok(entity::user::Model)` - The new member's account
/// - `Err(DbErr)` - Database error during creation
pub async fn create_circle_member<C: ConnectionTrait>(
    db: &C,
    circle: &entity::inner_circle::Model,
) -> Result<entity::user::Model, DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    crate::factory::inner_circle::MemberFactory::new(db, circle.id, user.id)
        .added_by(circle.created_by)
        .build()
        .await?;

    Ok(user)
}
