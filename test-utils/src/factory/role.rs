//! Role factory for creating test role entities and their permission rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Factory for creating test roles with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let role = RoleFactory::new(&db)
///     .name("mod")
///     .level(5)
///     .permissions(["KICK_MEMBERS"])
///     .build()
///     .await?;
/// ```
pub struct RoleFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    discord_role_id: String,
    level: i32,
    color: String,
    is_assignable: bool,
    description: Option<String>,
    permissions: Vec<String>,
}

impl<'a> RoleFactory<'a> {
    /// Creates a new RoleFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Role {id}"`
    /// - discord_role_id: auto-incremented numeric string
    /// - level: `0`, color: `"#99AAB5"`, assignable, no description, no permissions
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `RoleFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Role {}", id),
            discord_role_id: (900_000_000 + id).to_string(),
            level: 0,
            color: "#99AAB5".to_string(),
            is_assignable: true,
            description: None,
            permissions: Vec::new(),
        }
    }

    /// Sets the role name.
    ///
    /// # Arguments
    /// - `name` - Unique role name
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the Discord role ID.
    ///
    /// # Arguments
    /// - `discord_role_id` - Discord role ID as a numeric string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn discord_role_id(mut self, discord_role_id: impl Into<String>) -> Self {
        self.discord_role_id = discord_role_id.into();
        self
    }

    /// Sets the role level.
    ///
    /// # Arguments
    /// - `level` - Ordering level
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Sets whether the role is assignable.
    ///
    /// # Arguments
    /// - `is_assignable` - Assignable flag
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn is_assignable(mut self, is_assignable: bool) -> Self {
        self.is_assignable = is_assignable;
        self
    }

    /// Sets the role description.
    ///
    /// # Arguments
    /// - `description` - Free-form description
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the permission names granted by the role.
    ///
    /// # Arguments
    /// - `permissions` - Catalog names such as `"KICK_MEMBERS"`
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Builds and inserts the role and its permission rows.
    ///
    /// # Returns
    /// - `Ok(entity::role::Model)` - Created role entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::role::Model, DbErr> {
        let now = Utc::now();
        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(self.name),
            discord_role_id: ActiveValue::Set(self.discord_role_id),
            level: ActiveValue::Set(self.level),
            color: ActiveValue::Set(self.color),
            is_assignable: ActiveValue::Set(self.is_assignable),
            description: ActiveValue::Set(self.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        if !self.permissions.is_empty() {
            let rows = self
                .permissions
                .into_iter()
                .map(|permission| entity::role_permission::ActiveModel {
                    role_id: ActiveValue::Set(role.id),
                    permission: ActiveValue::Set(permission),
                });
            entity::prelude::RolePermission::insert_many(rows)
                .exec(self.db)
                .await?;
        }

        Ok(role)
    }
}

/// Creates a role with default values and no permissions.
pub async fn create_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    RoleFactory::new(db).build().await
}
