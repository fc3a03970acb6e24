use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::FullName))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::MobileNumber).unique_key())
                    .col(string_null(User::PasswordHash))
                    .col(string(User::UserType))
                    .col(string_null(User::ProfileImage))
                    .col(json(User::SocialProviders))
                    .col(boolean(User::IsVerified).default(false))
                    .col(string(User::Lifecycle).default("active"))
                    .col(timestamp_with_time_zone_null(User::LifecycleAt))
                    .col(string_null(User::LifecycleBy))
                    .col(timestamp_with_time_zone(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(User::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    FullName,
    Email,
    MobileNumber,
    PasswordHash,
    UserType,
    ProfileImage,
    SocialProviders,
    IsVerified,
    Lifecycle,
    LifecycleAt,
    LifecycleBy,
    CreatedAt,
    UpdatedAt,
}
