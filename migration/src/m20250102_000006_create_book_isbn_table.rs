use sea_orm_migration::{prelude::*, schema::*};

use super::m20250102_000005_create_book_table::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookIsbn::Table)
                    .if_not_exists()
                    .col(pk_auto(BookIsbn::Id))
                    .col(integer(BookIsbn::BookId))
                    .col(string_uniq(BookIsbn::Isbn))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_isbn_book_id")
                            .from(BookIsbn::Table, BookIsbn::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookIsbn::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BookIsbn {
    Table,
    Id,
    BookId,
    Isbn,
}
