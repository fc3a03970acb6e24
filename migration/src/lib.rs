pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_admin_table;
mod m20250101_000003_create_super_admin_table;
mod m20250102_000004_create_genre_table;
mod m20250102_000005_create_book_table;
mod m20250102_000006_create_book_isbn_table;
mod m20250103_000007_create_user_library_table;
mod m20250103_000008_create_borrow_request_table;
mod m20250104_000009_create_inner_circle_table;
mod m20250104_000010_create_inner_circle_member_table;
mod m20250104_000011_create_user_circle_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_admin_table::Migration),
            Box::new(m20250101_000003_create_super_admin_table::Migration),
            Box::new(m20250102_000004_create_genre_table::Migration),
            Box::new(m20250102_000005_create_book_table::Migration),
            Box::new(m20250102_000006_create_book_isbn_table::Migration),
            Box::new(m20250103_000007_create_user_library_table::Migration),
            Box::new(m20250103_000008_create_borrow_request_table::Migration),
            Box::new(m20250104_000009_create_inner_circle_table::Migration),
            Box::new(m20250104_000010_create_inner_circle_member_table::Migration),
            Box::new(m20250104_000011_create_user_circle_table::Migration),
        ]
    }
}
