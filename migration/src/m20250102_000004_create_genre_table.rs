use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string_uniq(Genre::Name))
                    .col(string(Genre::Category))
                    .col(timestamp_with_time_zone(Genre::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Genre::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Genre {
    Table,
    Id,
    Name,
    Category,
    CreatedAt,
}
