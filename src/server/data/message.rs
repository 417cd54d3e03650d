//! Message data repository.
//!
//! A message is stored as a `message` row, its `message_reaction` rows (ordered by
//! `position`) and its append-only `message_edit` rows.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionSession, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::{
    data::Touch,
    model::message::{CreateMessageParams, Message, MessageEdit},
};

pub struct MessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> MessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a message without reactions or edit history.
    ///
    /// # Returns
    /// - `Ok(Message)` - The created message
    /// - `Err(DbErr)` - Database error, including a unique violation on the Discord ID
    pub async fn create(&self, params: CreateMessageParams) -> Result<Message, DbErr> {
        let entity = entity::message::ActiveModel {
            discord_message_id: ActiveValue::Set(params.discord_message_id.to_string()),
            channel_id: ActiveValue::Set(params.channel_id),
            author_id: ActiveValue::Set(params.author_id),
            content: ActiveValue::Set(params.content),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            is_edited: ActiveValue::Set(false),
            is_pinned: ActiveValue::Set(false),
            created_at: ActiveValue::Set(params.created_at),
            updated_at: ActiveValue::Set(params.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Message::from_entity(entity, Vec::new(), Vec::new())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Message>, DbErr> {
        let Some(entity) = entity::prelude::Message::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_children(vec![entity])
            .await
            .map(|mut messages| messages.pop())
    }

    pub async fn find_by_discord_id(
        &self,
        discord_message_id: u64,
    ) -> Result<Option<Message>, DbErr> {
        let Some(entity) = entity::prelude::Message::find()
            .filter(entity::message::Column::DiscordMessageId.eq(discord_message_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.with_children(vec![entity])
            .await
            .map(|mut messages| messages.pop())
    }

    /// Gets a page of a channel's messages, newest first.
    ///
    /// # Arguments
    /// - `channel_id` - Local channel id
    /// - `limit` - Maximum number of messages
    /// - `before` - Only return messages created strictly before this instant
    pub async fn get_by_channel(
        &self,
        channel_id: i32,
        limit: u64,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>, DbErr> {
        let mut query = entity::prelude::Message::find()
            .filter(entity::message::Column::ChannelId.eq(channel_id));

        if let Some(before) = before {
            query = query.filter(entity::message::Column::CreatedAt.lt(before));
        }

        let entities = query
            .order_by_desc(entity::message::Column::CreatedAt)
            .order_by_desc(entity::message::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_children(entities).await
    }

    /// Gets a channel's pinned messages, newest first.
    pub async fn get_pinned(&self, channel_id: i32) -> Result<Vec<Message>, DbErr> {
        let entities = entity::prelude::Message::find()
            .filter(entity::message::Column::ChannelId.eq(channel_id))
            .filter(entity::message::Column::IsPinned.eq(true))
            .order_by_desc(entity::message::Column::CreatedAt)
            .all(self.db)
            .await?;

        self.with_children(entities).await
    }

    /// Substring search over message content, newest first.
    ///
    /// Relies on SQLite `LIKE`, which ignores ASCII case.
    pub async fn search(
        &self,
        query: &str,
        channel_id: Option<i32>,
        limit: u64,
    ) -> Result<Vec<Message>, DbErr> {
        let mut select = entity::prelude::Message::find()
            .filter(entity::message::Column::Content.contains(query));

        if let Some(channel_id) = channel_id {
            select = select.filter(entity::message::Column::ChannelId.eq(channel_id));
        }

        let entities = select
            .order_by_desc(entity::message::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_children(entities).await
    }

    /// Substring search restricted to `channel_ids`, newest first.
    pub async fn search_in_channels(
        &self,
        query: &str,
        channel_ids: &[i32],
        limit: u64,
    ) -> Result<Vec<Message>, DbErr> {
        let entities = entity::prelude::Message::find()
            .filter(entity::message::Column::Content.contains(query))
            .filter(entity::message::Column::ChannelId.is_in(channel_ids.iter().copied()))
            .order_by_desc(entity::message::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_children(entities).await
    }

    /// Writes back a modified message snapshot, replacing its reactions.
    ///
    /// Edit history is not touched; use [`Self::append_edit`].
    pub async fn save(&self, message: &Message) -> Result<Message, DbErr> {
        let txn = self.db.begin().await?;

        let mut active_model = entity::message::ActiveModel {
            id: ActiveValue::Unchanged(message.id),
            discord_message_id: ActiveValue::Unchanged(message.discord_message_id.to_string()),
            channel_id: ActiveValue::Unchanged(message.channel_id),
            author_id: ActiveValue::Unchanged(message.author_id),
            content: ActiveValue::Set(message.content.clone()),
            kind: ActiveValue::Set(message.kind.as_str().to_string()),
            is_edited: ActiveValue::Set(message.is_edited),
            is_pinned: ActiveValue::Set(message.is_pinned),
            created_at: ActiveValue::Unchanged(message.created_at),
            updated_at: ActiveValue::NotSet,
        };
        active_model.touch(message.updated_at.max(Utc::now()));
        active_model.update(&txn).await?;

        entity::prelude::MessageReaction::delete_many()
            .filter(entity::message_reaction::Column::MessageId.eq(message.id))
            .exec(&txn)
            .await?;

        let rows: Vec<entity::message_reaction::ActiveModel> = message
            .reactions
            .iter()
            .flat_map(|reaction| {
                reaction
                    .users
                    .iter()
                    .map(move |user_id| (reaction.emoji.clone(), *user_id))
            })
            .zip(0..)
            .map(|((emoji, user_id), position)| entity::message_reaction::ActiveModel {
                message_id: ActiveValue::Set(message.id),
                emoji: ActiveValue::Set(emoji),
                user_id: ActiveValue::Set(user_id),
                position: ActiveValue::Set(position),
            })
            .collect();

        if !rows.is_empty() {
            entity::prelude::MessageReaction::insert_many(rows)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        self.find_by_id(message.id).await?.ok_or(DbErr::RecordNotFound(format!(
            "Message with id {} not found after update",
            message.id
        )))
    }

    /// Appends a history entry. History rows are never updated or removed individually.
    pub async fn append_edit(&self, message_id: i32, edit: &MessageEdit) -> Result<(), DbErr> {
        entity::message_edit::ActiveModel {
            message_id: ActiveValue::Set(message_id),
            content: ActiveValue::Set(edit.content.clone()),
            edited_at: ActiveValue::Set(edit.edited_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Deletes a message. Reactions and edit history cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Message::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Message::find().count(self.db).await
    }

    /// Loads reactions and edit history for the given messages, preserving their order.
    async fn with_children(
        &self,
        entities: Vec<entity::message::Model>,
    ) -> Result<Vec<Message>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|m| m.id).collect();

        let mut reactions: HashMap<i32, Vec<entity::message_reaction::Model>> = HashMap::new();
        for row in entity::prelude::MessageReaction::find()
            .filter(entity::message_reaction::Column::MessageId.is_in(ids.clone()))
            .all(self.db)
            .await?
        {
            reactions.entry(row.message_id).or_default().push(row);
        }

        let mut edits: HashMap<i32, Vec<entity::message_edit::Model>> = HashMap::new();
        for row in entity::prelude::MessageEdit::find()
            .filter(entity::message_edit::Column::MessageId.is_in(ids))
            .all(self.db)
            .await?
        {
            edits.entry(row.message_id).or_default().push(row);
        }

        entities
            .into_iter()
            .map(|entity| {
                let id = entity.id;
                Message::from_entity(
                    entity,
                    reactions.remove(&id).unwrap_or_default(),
                    edits.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }
}
