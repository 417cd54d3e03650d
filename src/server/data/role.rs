//! Role data repository for database operations.
//!
//! A role is persisted as a `role` row plus one `role_permission` row per granted
//! permission. The repository always loads and writes both together.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionSession, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

use crate::server::{
    data::Touch,
    model::{
        permission::Permission,
        role::{CreateRoleParams, Role},
    },
};

pub struct RoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> RoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a role and its permission rows.
    ///
    /// # Returns
    /// - `Ok(Role)` - The created role
    /// - `Err(DbErr)` - Database error, including unique violations on name or Discord ID
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(params.name),
            discord_role_id: ActiveValue::Set(params.discord_role_id.to_string()),
            level: ActiveValue::Set(level_to_column(params.level)?),
            color: ActiveValue::Set(params.color),
            is_assignable: ActiveValue::Set(params.is_assignable),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let permissions = insert_permissions(&txn, role.id, &params.permissions).await?;

        txn.commit().await?;

        Role::from_entity(role, permissions)
    }

    /// Finds a role by id.
    ///
    /// # Returns
    /// - `Ok(Some(Role))` - Role found with its permissions
    /// - `Ok(None)` - No role with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_permissions(role).await.map(Some)
    }

    /// Finds a role by its unique name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.with_permissions(role).await.map(Some)
    }

    /// Finds the role mirrored from a Discord guild role.
    pub async fn find_by_discord_id(&self, discord_role_id: u64) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find()
            .filter(entity::role::Column::DiscordRoleId.eq(discord_role_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.with_permissions(role).await.map(Some)
    }

    /// Gets the roles with the given ids, ordered by level then name.
    ///
    /// Ids without a matching role are skipped.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Role>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let roles = entity::prelude::Role::find()
            .filter(entity::role::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::role::Column::Level)
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?;

        self.with_permissions_many(roles).await
    }

    /// Gets the roles mirrored from the given Discord role ids.
    ///
    /// Unknown Discord ids are skipped.
    pub async fn find_by_discord_ids(&self, discord_role_ids: &[u64]) -> Result<Vec<Role>, DbErr> {
        if discord_role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let roles = entity::prelude::Role::find()
            .filter(
                entity::role::Column::DiscordRoleId
                    .is_in(discord_role_ids.iter().map(|id| id.to_string())),
            )
            .order_by_asc(entity::role::Column::Level)
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?;

        self.with_permissions_many(roles).await
    }

    /// Gets every role ordered by level ascending, then name.
    pub async fn get_all(&self) -> Result<Vec<Role>, DbErr> {
        let roles = entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Level)
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?;

        self.with_permissions_many(roles).await
    }

    /// Writes back a modified role snapshot.
    ///
    /// Updates the row, replaces the permission rows and refreshes `updated_at`.
    ///
    /// # Returns
    /// - `Ok(Role)` - The role as stored after the write
    /// - `Err(DbErr::RecordNotFound)` - The role was deleted concurrently
    /// - `Err(DbErr)` - Database error, including unique violations on rename
    pub async fn save(&self, role: &Role) -> Result<Role, DbErr> {
        let txn = self.db.begin().await?;

        let mut active_model = entity::role::ActiveModel {
            id: ActiveValue::Unchanged(role.id),
            name: ActiveValue::Set(role.name.clone()),
            discord_role_id: ActiveValue::Set(role.discord_role_id.to_string()),
            level: ActiveValue::Set(level_to_column(role.level)?),
            color: ActiveValue::Set(role.color.clone()),
            is_assignable: ActiveValue::Set(role.is_assignable),
            description: ActiveValue::Set(role.description.clone()),
            created_at: ActiveValue::Unchanged(role.created_at),
            updated_at: ActiveValue::NotSet,
        };
        active_model.touch(Utc::now());
        let entity = active_model.update(&txn).await?;

        entity::prelude::RolePermission::delete_many()
            .filter(entity::role_permission::Column::RoleId.eq(role.id))
            .exec(&txn)
            .await?;
        let permissions = insert_permissions(&txn, role.id, &role.permissions).await?;

        txn.commit().await?;

        Role::from_entity(entity, permissions)
    }

    /// Deletes a role. Permission rows, user links and allow-list entries cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Role deleted
    /// - `Ok(false)` - No role with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Role::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Role::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Role::find().count(self.db).await
    }

    async fn with_permissions(&self, role: entity::role::Model) -> Result<Role, DbErr> {
        let permissions = entity::prelude::RolePermission::find()
            .filter(entity::role_permission::Column::RoleId.eq(role.id))
            .all(self.db)
            .await?;

        Role::from_entity(role, permissions)
    }

    /// Loads permission rows for many roles in one query, preserving role order.
    async fn with_permissions_many(
        &self,
        roles: Vec<entity::role::Model>,
    ) -> Result<Vec<Role>, DbErr> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_role: HashMap<i32, Vec<entity::role_permission::Model>> = HashMap::new();
        for row in entity::prelude::RolePermission::find()
            .filter(entity::role_permission::Column::RoleId.is_in(roles.iter().map(|r| r.id)))
            .all(self.db)
            .await?
        {
            by_role.entry(row.role_id).or_default().push(row);
        }

        roles
            .into_iter()
            .map(|role| {
                let permissions = by_role.remove(&role.id).unwrap_or_default();
                Role::from_entity(role, permissions)
            })
            .collect()
    }
}

async fn insert_permissions<C: ConnectionTrait>(
    db: &C,
    role_id: i32,
    permissions: &BTreeSet<Permission>,
) -> Result<Vec<entity::role_permission::Model>, DbErr> {
    let rows: Vec<entity::role_permission::Model> = permissions
        .iter()
        .map(|permission| entity::role_permission::Model {
            role_id,
            permission: permission.as_str().to_string(),
        })
        .collect();

    if rows.is_empty() {
        return Ok(rows);
    }

    entity::prelude::RolePermission::insert_many(rows.iter().cloned().map(
        |row| entity::role_permission::ActiveModel {
            role_id: ActiveValue::Set(row.role_id),
            permission: ActiveValue::Set(row.permission),
        },
    ))
    .exec(db)
    .await?;

    Ok(rows)
}

fn level_to_column(level: u32) -> Result<i32, DbErr> {
    i32::try_from(level).map_err(|e| DbErr::Custom(format!("Role level out of range: {}", e)))
}
