use sea_orm_migration::{prelude::*, schema::*};

use super::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserLibrary::Table)
                    .if_not_exists()
                    .col(pk_auto(UserLibrary::Id))
                    .col(integer_uniq(UserLibrary::UserId))
                    .col(json(UserLibrary::Libraries))
                    .col(integer(UserLibrary::Version).default(0))
                    .col(timestamp_with_time_zone(UserLibrary::AddedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(UserLibrary::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_library_user_id")
                            .from(UserLibrary::Table, UserLibrary::UserId)
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
            .drop_table(Table::drop().table(UserLibrary::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserLibrary {
    Table,
    Id,
    UserId,
    Libraries,
    Version,
    AddedAt,
    UpdatedAt,
}
