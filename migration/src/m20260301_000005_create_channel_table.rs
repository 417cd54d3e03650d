use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Channel::Table)
                    .if_not_exists()
                    .col(pk_auto(Channel::Id))
                    .col(string_uniq(Channel::DiscordChannelId))
                    .col(string(Channel::Name))
                    .col(string(Channel::Kind))
                    .col(string_null(Channel::Category))
                    .col(text_null(Channel::Topic))
                    .col(boolean(Channel::IsPrivate))
                    .col(integer(Channel::SlowMode))
                    .col(boolean(Channel::Nsfw))
                    .col(integer(Channel::AutoArchiveDuration))
                    .col(integer(Channel::CreatedBy))
                    .col(timestamp_with_time_zone(Channel::CreatedAt))
                    .col(timestamp_with_time_zone(Channel::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_channel_created_by")
                            .from(Channel::Table, Channel::CreatedBy)
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
            .drop_table(Table::drop().table(Channel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Channel {
    Table,
    Id,
    DiscordChannelId,
    Name,
    Kind,
    Category,
    Topic,
    IsPrivate,
    SlowMode,
    Nsfw,
    AutoArchiveDuration,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
