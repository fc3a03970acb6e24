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
                    .table(InnerCircleMember::Table)
                    .if_not_exists()
                    .col(pk_auto(InnerCircleMember::Id))
                    .col(integer(InnerCircleMember::CircleId))
                    .col(integer(InnerCircleMember::UserId))
                    .col(string(InnerCircleMember::Role))
                    .col(string(InnerCircleMember::InviteStatus))
                    .col(integer(InnerCircleMember::AddedBy))
                    .col(timestamp_with_time_zone(InnerCircleMember::AddedAt).default(Expr::current_timestamp()))
                    .col(boolean(InnerCircleMember::IsRemoved).default(false))
                    .col(timestamp_with_time_zone_null(InnerCircleMember::RemovedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inner_circle_member_circle_id")
                            .from(InnerCircleMember::Table, InnerCircleMember::CircleId)
                            .to(InnerCircle::Table, InnerCircle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inner_circle_member_user_id")
                            .from(InnerCircleMember::Table, InnerCircleMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_inner_circle_member_circle_user")
                            .col(InnerCircleMember::CircleId)
                            .col(InnerCircleMember::UserId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InnerCircleMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InnerCircleMember {
    Table,
    Id,
    CircleId,
    UserId,
    Role,
    InviteStatus,
    AddedBy,
    AddedAt,
    IsRemoved,
    RemovedAt,
}
