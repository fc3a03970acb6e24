use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SuperAdmin::Table)
                    .if_not_exists()
                    .col(pk_auto(SuperAdmin::Id))
                    .col(string(SuperAdmin::FullName))
                    .col(string_uniq(SuperAdmin::Email))
                    .col(string(SuperAdmin::MobileNumber))
                    .col(string(SuperAdmin::PasswordHash))
                    .col(boolean(SuperAdmin::IsActive).default(true))
                    .col(timestamp_with_time_zone(SuperAdmin::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(SuperAdmin::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SuperAdmin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SuperAdmin {
    Table,
    Id,
    FullName,
    Email,
    MobileNumber,
    PasswordHash,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
