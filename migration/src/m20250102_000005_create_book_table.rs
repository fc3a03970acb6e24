use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(pk_auto(Book::Id))
                    .col(string(Book::Title))
                    .col(json(Book::Authors))
                    .col(string(Book::Publisher))
                    .col(integer_null(Book::PublicationYear))
                    .col(json(Book::Genres))
                    .col(text(Book::Description))
                    .col(string(Book::CoverImage))
                    .col(json(Book::Languages))
                    .col(double(Book::Rating))
                    .col(string(Book::Lifecycle).default("active"))
                    .col(timestamp_with_time_zone_null(Book::LifecycleAt))
                    .col(string_null(Book::LifecycleBy))
                    .col(timestamp_with_time_zone(Book::AddedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Book::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Book::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Book {
    Table,
    Id,
    Title,
    Authors,
    Publisher,
    PublicationYear,
    Genres,
    Description,
    CoverImage,
    Languages,
    Rating,
    Lifecycle,
    LifecycleAt,
    LifecycleBy,
    AddedAt,
    UpdatedAt,
}
