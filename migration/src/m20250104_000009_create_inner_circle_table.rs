use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InnerCircle::Table)
                    .if_not_exists()
                    .col(pk_auto(InnerCircle::Id))
                    .col(string_uniq(InnerCircle::CircleName))
                    .col(text_null(InnerCircle::CircleDescription))
                    .col(integer(InnerCircle::CreatedBy))
                    .col(json(InnerCircle::Genres))
                    .col(json(InnerCircle::Isbns))
                    .col(timestamp_with_time_zone(InnerCircle::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(InnerCircle::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InnerCircle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InnerCircle {
    Table,
    Id,
    CircleName,
    CircleDescription,
    CreatedBy,
    Genres,
    Isbns,
    CreatedAt,
    UpdatedAt,
}
