use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250101_000001_create_user_table::User,
    m20250104_000009_create_inner_circle_table::InnerCircle,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCircle::Table)
                    .if_not_exists()
                    .col(pk_auto(UserCircle::Id))
                    .col(integer(UserCircle::UserId))
                    .col(integer(UserCircle::CircleId))
                    .col(string(UserCircle::Kind))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_circle_user_id")
                            .from(UserCircle::Table, UserCircle::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_circle_circle_id")
                            .from(UserCircle::Table, UserCircle::CircleId)
                            .to(InnerCircle::Table, InnerCircle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_user_circle_user_circle_kind")
                            .col(UserCircle::UserId)
                            .col(UserCircle::CircleId)
                            .col(UserCircle::Kind)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCircle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserCircle {
    Table,
    Id,
    UserId,
    CircleId,
    Kind,
}
