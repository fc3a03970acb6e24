use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, UserLibrary};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(UserLibrary)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the account tables: User, Admin and SuperAdmin.
    pub fn with_identity_tables(self) -> Self {
        self.with_table(User)
            .with_table(Admin)
            .with_table(SuperAdmin)
    }

    /// Adds the catalog tables: Genre, Book and BookIsbn.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(Genre).with_table(Book).with_table(BookIsbn)
    }

    /// Adds everything needed to exercise shelves and borrowing.
    ///
    /// Includes the identity and catalog tables followed by UserLibrary and
    /// BorrowRequest.
    pub fn with_library_tables(self) -> Self {
        self.with_identity_tables()
            .with_catalog_tables()
            .with_table(UserLibrary)
            .with_table(BorrowRequest)
    }

    /// Adds User plus the inner circle tables.
    pub fn with_circle_tables(self) -> Self {
        self.with_table(User)
            .with_table(InnerCircle)
            .with_table(InnerCircleMember)
            .with_table(UserCircle)
    }

    /// Adds every table in the schema in dependency order.
    pub fn with_all_tables(self) -> Self {
        self.with_library_tables()
            .with_table(InnerCircle)
            .with_table(InnerCircleMember)
            .with_table(UserCircle)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
