use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(pk_auto(Admin::Id))
                    .col(string(Admin::FullName))
                    .col(string_uniq(Admin::Email))
                    .col(string(Admin::MobileNumber))
                    .col(string(Admin::PasswordHash))
                    .col(boolean(Admin::IsVerified).default(false))
                    .col(integer_null(Admin::VerifiedBy))
                    .col(string(Admin::Lifecycle).default("active"))
                    .col(timestamp_with_time_zone_null(Admin::LifecycleAt))
                    .col(string_null(Admin::LifecycleBy))
                    .col(timestamp_with_time_zone(Admin::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Admin::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Admin {
    Table,
    Id,
    FullName,
    Email,
    MobileNumber,
    PasswordHash,
    IsVerified,
    VerifiedBy,
    Lifecycle,
    LifecycleAt,
    LifecycleBy,
    CreatedAt,
    UpdatedAt,
}
