//! User domain model.
//!
//! Users are mirrored from Discord guild members. They are consumed by the RBAC core,
//! which links them to roles and references them as owners and allow-list entries.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{model::user::UserDto, server::util::parse::parse_stored_snowflake};

/// Guild member known to the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Discord ID of the user.
    pub discord_id: u64,
    /// Display name of the user.
    pub name: String,
    /// Inactive users keep their data but cannot authenticate.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(DbErr::Custom)` - Stored Discord ID is not a valid u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            discord_id: parse_stored_snowflake(&entity.discord_id, "discord_id")?,
            name: entity.name,
            is_active: entity.is_active,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            discord_id: self.discord_id.to_string(),
            name: self.name,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
