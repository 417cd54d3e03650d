use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;
use super::m20260301_000002_create_role_table::Role;
use super::m20260301_000005_create_channel_table::Channel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChannelAllowedRole::Table)
                    .if_not_exists()
                    .col(integer(ChannelAllowedRole::ChannelId))
                    .col(integer(ChannelAllowedRole::RoleId))
                    .primary_key(
                        Index::create()
                            .col(ChannelAllowedRole::ChannelId)
                            .col(ChannelAllowedRole::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_allowed_role_channel_id")
                            .from(ChannelAllowedRole::Table, ChannelAllowedRole::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_allowed_role_role_id")
                            .from(ChannelAllowedRole::Table, ChannelAllowedRole::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ChannelAllowedUser::Table)
                    .if_not_exists()
                    .col(integer(ChannelAllowedUser::ChannelId))
                    .col(integer(ChannelAllowedUser::UserId))
                    .primary_key(
                        Index::create()
                            .col(ChannelAllowedUser::ChannelId)
                            .col(ChannelAllowedUser::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_allowed_user_channel_id")
                            .from(ChannelAllowedUser::Table, ChannelAllowedUser::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_allowed_user_user_id")
                            .from(ChannelAllowedUser::Table, ChannelAllowedUser::UserId)
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
            .drop_table(Table::drop().table(ChannelAllowedUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChannelAllowedRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChannelAllowedRole {
    Table,
    ChannelId,
    RoleId,
}

#[derive(DeriveIden)]
pub enum ChannelAllowedUser {
    Table,
    ChannelId,
    UserId,
}
