use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250101_000001_create_user_table::User, m20250102_000005_create_book_table::Book,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BorrowRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(BorrowRequest::Id))
                    .col(integer(BorrowRequest::BookId))
                    .col(integer(BorrowRequest::OwnerId))
                    .col(integer(BorrowRequest::RequesterId))
                    .col(timestamp_with_time_zone(BorrowRequest::RequestedUntil))
                    .col(string(BorrowRequest::Status).default("pending"))
                    .col(timestamp_with_time_zone(BorrowRequest::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(BorrowRequest::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrow_request_book_id")
                            .from(BorrowRequest::Table, BorrowRequest::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrow_request_owner_id")
                            .from(BorrowRequest::Table, BorrowRequest::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_borrow_request_requester_id")
                            .from(BorrowRequest::Table, BorrowRequest::RequesterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BorrowRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BorrowRequest {
    Table,
    Id,
    BookId,
    OwnerId,
    RequesterId,
    RequestedUntil,
    Status,
    CreatedAt,
    UpdatedAt,
}
