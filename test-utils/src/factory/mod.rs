//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let reader = factory::create_user(&db).await?;
//!     let book = factory::create_book(&db).await?;
//!
//!     // Circle with its creator seeded as the first ICAdmin
//!     let (creator, circle) = factory::helpers::create_circle_with_creator(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let reader = factory::user::UserFactory::new(&db)
//!     .full_name("Nandini")
//!     .email("nandini@example.com")
//!     .deleted_at(Utc::now() - Duration::days(30))
//!     .build()
//!     .await?;
//!
//! let book = factory::book::BookFactory::new(&db)
//!     .title("Pather Panchali")
//!     .genres(["Fiction"])
//!     .isbn("9780253201935")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Reader accounts
//! - `admin` - Admin accounts
//! - `super_admin` - Super admin accounts
//! - `book` - Catalog books with their ISBNs
//! - `genre` - Genres with a category
//! - `library` - Raw per-user library records
//! - `borrow_request` - Borrow requests between two readers
//! - `inner_circle` - Circles and their member entries
//! - `helpers` - Counters and multi-entity helpers

pub mod admin;
pub mod book;
pub mod borrow_request;
pub mod genre;
pub mod helpers;
pub mod inner_circle;
pub mod library;
pub mod super_admin;
pub mod user;

pub use admin::create_admin;
pub use book::create_book;
pub use borrow_request::create_borrow_request;
pub use genre::create_genre;
pub use inner_circle::{create_circle, create_member};
pub use library::create_library;
pub use super_admin::create_super_admin;
pub use user::create_user;
