//! Channel data repository.
//!
//! A channel is stored as a `channel` row plus its role and user allow-list rows.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionSession, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

use crate::server::{
    data::Touch,
    model::channel::{Channel, CreateChannelParams},
};

pub struct ChannelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ChannelRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a channel with empty allow-lists.
    ///
    /// # Returns
    /// - `Ok(Channel)` - The created channel
    /// - `Err(DbErr)` - Database error, including a unique violation on the Discord ID
    pub async fn create(&self, params: CreateChannelParams) -> Result<Channel, DbErr> {
        let now = Utc::now();
        let entity = entity::channel::ActiveModel {
            discord_channel_id: ActiveValue::Set(params.discord_channel_id.to_string()),
            name: ActiveValue::Set(params.name),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            category: ActiveValue::Set(params.category),
            topic: ActiveValue::Set(params.topic),
            is_private: ActiveValue::Set(params.is_private),
            slow_mode: ActiveValue::Set(params.settings.slow_mode),
            nsfw: ActiveValue::Set(params.settings.nsfw),
            auto_archive_duration: ActiveValue::Set(params.settings.auto_archive_duration),
            created_by: ActiveValue::Set(params.created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Channel::from_entity(entity, Vec::new(), Vec::new())
    }

    /// Finds a channel by id with its allow-lists.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Channel>, DbErr> {
        let Some(entity) = entity::prelude::Channel::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_allow_lists(vec![entity])
            .await
            .map(|mut channels| channels.pop())
    }

    /// Finds the channel tracking a Discord channel.
    pub async fn find_by_discord_id(
        &self,
        discord_channel_id: u64,
    ) -> Result<Option<Channel>, DbErr> {
        let Some(entity) = entity::prelude::Channel::find()
            .filter(entity::channel::Column::DiscordChannelId.eq(discord_channel_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.with_allow_lists(vec![entity])
            .await
            .map(|mut channels| channels.pop())
    }

    /// Gets every channel ordered by category, then name.
    pub async fn get_all(&self) -> Result<Vec<Channel>, DbErr> {
        let entities = entity::prelude::Channel::find()
            .order_by_asc(entity::channel::Column::Category)
            .order_by_asc(entity::channel::Column::Name)
            .all(self.db)
            .await?;

        self.with_allow_lists(entities).await
    }

    /// Gets the channels filed under a category name, ordered by name.
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Channel>, DbErr> {
        let entities = entity::prelude::Channel::find()
            .filter(entity::channel::Column::Category.eq(category))
            .order_by_asc(entity::channel::Column::Name)
            .all(self.db)
            .await?;

        self.with_allow_lists(entities).await
    }

    /// Writes back a modified channel snapshot, replacing both allow-lists.
    ///
    /// # Returns
    /// - `Ok(Channel)` - The channel as stored after the write
    /// - `Err(DbErr)` - Database error, including foreign key violations for allow-list ids
    pub async fn save(&self, channel: &Channel) -> Result<Channel, DbErr> {
        let txn = self.db.begin().await?;

        let mut active_model = entity::channel::ActiveModel {
            id: ActiveValue::Unchanged(channel.id),
            discord_channel_id: ActiveValue::Set(channel.discord_channel_id.to_string()),
            name: ActiveValue::Set(channel.name.clone()),
            kind: ActiveValue::Set(channel.kind.as_str().to_string()),
            category: ActiveValue::Set(channel.category.clone()),
            topic: ActiveValue::Set(channel.topic.clone()),
            is_private: ActiveValue::Set(channel.is_private),
            slow_mode: ActiveValue::Set(channel.settings.slow_mode),
            nsfw: ActiveValue::Set(channel.settings.nsfw),
            auto_archive_duration: ActiveValue::Set(channel.settings.auto_archive_duration),
            created_by: ActiveValue::Unchanged(channel.created_by),
            created_at: ActiveValue::Unchanged(channel.created_at),
            updated_at: ActiveValue::NotSet,
        };
        active_model.touch(Utc::now());
        let entity = active_model.update(&txn).await?;

        entity::prelude::ChannelAllowedRole::delete_many()
            .filter(entity::channel_allowed_role::Column::ChannelId.eq(channel.id))
            .exec(&txn)
            .await?;
        entity::prelude::ChannelAllowedUser::delete_many()
            .filter(entity::channel_allowed_user::Column::ChannelId.eq(channel.id))
            .exec(&txn)
            .await?;

        let allowed_roles = insert_allowed_roles(&txn, channel.id, &channel.allowed_roles).await?;
        let allowed_users = insert_allowed_users(&txn, channel.id, &channel.allowed_users).await?;

        txn.commit().await?;

        Channel::from_entity(entity, allowed_roles, allowed_users)
    }

    /// Deletes a channel. Allow-list rows and tracked messages cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Channel::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Channel::find_by_id(id)
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Channel::find().count(self.db).await
    }

    /// Loads allow-list rows for the given channels, preserving their order.
    async fn with_allow_lists(
        &self,
        entities: Vec<entity::channel::Model>,
    ) -> Result<Vec<Channel>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|c| c.id).collect();

        let mut roles: HashMap<i32, Vec<entity::channel_allowed_role::Model>> = HashMap::new();
        for row in entity::prelude::ChannelAllowedRole::find()
            .filter(entity::channel_allowed_role::Column::ChannelId.is_in(ids.clone()))
            .all(self.db)
            .await?
        {
            roles.entry(row.channel_id).or_default().push(row);
        }

        let mut users: HashMap<i32, Vec<entity::channel_allowed_user::Model>> = HashMap::new();
        for row in entity::prelude::ChannelAllowedUser::find()
            .filter(entity::channel_allowed_user::Column::ChannelId.is_in(ids))
            .all(self.db)
            .await?
        {
            users.entry(row.channel_id).or_default().push(row);
        }

        entities
            .into_iter()
            .map(|entity| {
                let id = entity.id;
                Channel::from_entity(
                    entity,
                    roles.remove(&id).unwrap_or_default(),
                    users.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }
}

async fn insert_allowed_roles<C: ConnectionTrait>(
    db: &C,
    channel_id: i32,
    role_ids: &BTreeSet<i32>,
) -> Result<Vec<entity::channel_allowed_role::Model>, DbErr> {
    if role_ids.is_empty() {
        return Ok(Vec::new());
    }

    entity::prelude::ChannelAllowedRole::insert_many(role_ids.iter().map(|role_id| {
        entity::channel_allowed_role::ActiveModel {
            channel_id: ActiveValue::Set(channel_id),
            role_id: ActiveValue::Set(*role_id),
        }
    }))
    .exec(db)
    .await?;

    Ok(role_ids
        .iter()
        .map(|role_id| entity::channel_allowed_role::Model {
            channel_id,
            role_id: *role_id,
        })
        .collect())
}

async fn insert_allowed_users<C: ConnectionTrait>(
    db: &C,
    channel_id: i32,
    user_ids: &BTreeSet<i32>,
) -> Result<Vec<entity::channel_allowed_user::Model>, DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    entity::prelude::ChannelAllowedUser::insert_many(user_ids.iter().map(|user_id| {
        entity::channel_allowed_user::ActiveModel {
            channel_id: ActiveValue::Set(channel_id),
            user_id: ActiveValue::Set(*user_id),
        }
    }))
    .exec(db)
    .await?;

    Ok(user_ids
        .iter()
        .map(|user_id| entity::channel_allowed_user::Model {
            channel_id,
            user_id: *user_id,
        })
        .collect())
}
