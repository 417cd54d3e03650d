use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;
use super::m20260301_000005_create_channel_table::Channel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(pk_auto(Message::Id))
                    .col(string_uniq(Message::DiscordMessageId))
                    .col(integer(Message::ChannelId))
                    .col(integer(Message::AuthorId))
                    .col(text(Message::Content))
                    .col(string(Message::Kind))
                    .col(boolean(Message::IsEdited))
                    .col(boolean(Message::IsPinned))
                    .col(timestamp_with_time_zone(Message::CreatedAt))
                    .col(timestamp_with_time_zone(Message::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_channel_id")
                            .from(Message::Table, Message::ChannelId)
                            .to(Channel::Table, Channel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_author_id")
                            .from(Message::Table, Message::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_message_channel_created_at")
                    .table(Message::Table)
                    .col(Message::ChannelId)
                    .col(Message::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MessageEdit::Table)
                    .if_not_exists()
                    .col(pk_auto(MessageEdit::Id))
                    .col(integer(MessageEdit::MessageId))
                    .col(text(MessageEdit::Content))
                    .col(timestamp_with_time_zone(MessageEdit::EditedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_edit_message_id")
                            .from(MessageEdit::Table, MessageEdit::MessageId)
                            .to(Message::Table, Message::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MessageReaction::Table)
                    .if_not_exists()
                    .col(integer(MessageReaction::MessageId))
                    .col(string(MessageReaction::Emoji))
                    .col(integer(MessageReaction::UserId))
                    .col(integer(MessageReaction::Position))
                    .primary_key(
                        Index::create()
                            .col(MessageReaction::MessageId)
                            .col(MessageReaction::Emoji)
                            .col(MessageReaction::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_reaction_message_id")
                            .from(MessageReaction::Table, MessageReaction::MessageId)
                            .to(Message::Table, Message::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_reaction_user_id")
                            .from(MessageReaction::Table, MessageReaction::UserId)
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
            .drop_table(Table::drop().table(MessageReaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MessageEdit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Message {
    Table,
    Id,
    DiscordMessageId,
    ChannelId,
    AuthorId,
    Content,
    Kind,
    IsEdited,
    IsPinned,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum MessageEdit {
    Table,
    Id,
    MessageId,
    Content,
    EditedAt,
}

#[derive(DeriveIden)]
pub enum MessageReaction {
    Table,
    MessageId,
    Emoji,
    UserId,
    Position,
}
