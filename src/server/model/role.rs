//! Role domain models and parameters.
//!
//! A role is a named bundle of catalog permissions bound to a Discord guild role. Roles
//! carry a `level` used only for ordering; permission checks never consult it.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::collections::BTreeSet;

use crate::{
    model::role::{CreateRoleDto, RoleDto, UpdateRoleDto},
    server::{
        error::AppError,
        model::permission::Permission,
        util::parse::{parse_snowflake, parse_stored_snowflake},
    },
};

/// Display color applied when a role is created without one.
pub const DEFAULT_ROLE_COLOR: &str = "#99AAB5";

/// Highest level the `role.level` column can hold.
pub const MAX_ROLE_LEVEL: u32 = i32::MAX as u32;

/// Named bundle of permissions with an ordering level.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    /// Unique display name.
    pub name: String,
    /// Unique Discord role ID this role is bound to.
    pub discord_role_id: u64,
    pub permissions: BTreeSet<Permission>,
    /// Ordering only; lower sorts first.
    pub level: u32,
    pub color: String,
    pub is_assignable: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Converts an entity model and its permission rows to a domain model.
    ///
    /// # Arguments
    /// - `entity` - The role row
    /// - `permissions` - Rows from `role_permission` belonging to this role
    ///
    /// # Returns
    /// - `Ok(Role)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored snowflake, level or permission name is invalid
    pub fn from_entity(
        entity: entity::role::Model,
        permissions: Vec<entity::role_permission::Model>,
    ) -> Result<Self, DbErr> {
        let discord_role_id = parse_stored_snowflake(&entity.discord_role_id, "discord_role_id")?;

        let level = u32::try_from(entity.level)
            .map_err(|e| DbErr::Custom(format!("Failed to parse level: {}", e)))?;

        let permissions = permissions
            .into_iter()
            .map(|row| {
                row.permission
                    .parse::<Permission>()
                    .map_err(|e| DbErr::Custom(format!("Failed to parse permission: {}", e)))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            discord_role_id,
            permissions,
            level,
            color: entity.color,
            is_assignable: entity.is_assignable,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Grants a permission. Returns whether the set changed.
    pub fn add_permission(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Revokes a permission. Returns whether the set changed.
    pub fn remove_permission(&mut self, permission: Permission) -> bool {
        self.permissions.remove(&permission)
    }

    /// Overwrites every field present in `patch`.
    pub fn apply(&mut self, patch: UpdateRoleParams) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(discord_role_id) = patch.discord_role_id {
            self.discord_role_id = discord_role_id;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = permissions;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(is_assignable) = patch.is_assignable {
            self.is_assignable = is_assignable;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            discord_role_id: self.discord_role_id.to_string(),
            permissions: self
                .permissions
                .into_iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            level: self.level,
            color: self.color,
            is_assignable: self.is_assignable,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for creating a new role.
#[derive(Debug, Clone)]
pub struct CreateRoleParams {
    pub name: String,
    pub discord_role_id: u64,
    pub permissions: BTreeSet<Permission>,
    pub level: u32,
    pub color: String,
    pub is_assignable: bool,
    pub description: Option<String>,
}

impl CreateRoleParams {
    /// Builds parameters with defaults for everything but identity and permissions.
    pub fn new(
        name: impl Into<String>,
        discord_role_id: u64,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        Self {
            name: name.into(),
            discord_role_id,
            permissions: permissions.into_iter().collect(),
            level: 0,
            color: DEFAULT_ROLE_COLOR.to_string(),
            is_assignable: true,
            description: None,
        }
    }

    pub fn from_dto(dto: CreateRoleDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Role name must not be empty".to_string()));
        }

        let params = Self {
            name,
            discord_role_id: parse_snowflake(&dto.discord_role_id, "discord role id")?,
            permissions: Permission::parse_all(&dto.permissions)?,
            level: dto.level,
            color: dto.color.unwrap_or_else(|| DEFAULT_ROLE_COLOR.to_string()),
            is_assignable: dto.is_assignable.unwrap_or(true),
            description: dto.description,
        };
        params.validate()?;

        Ok(params)
    }

    /// Checks the values the store cannot represent.
    ///
    /// # Returns
    /// - `Ok(())` - Parameters can be stored
    /// - `Err(AppError::BadRequest)` - `level` exceeds [`MAX_ROLE_LEVEL`]
    pub fn validate(&self) -> Result<(), AppError> {
        validate_level(self.level)
    }
}

/// Shallow patch for an existing role. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleParams {
    pub name: Option<String>,
    pub discord_role_id: Option<u64>,
    pub permissions: Option<BTreeSet<Permission>>,
    pub level: Option<u32>,
    pub color: Option<String>,
    pub is_assignable: Option<bool>,
    pub description: Option<String>,
}

impl UpdateRoleParams {
    pub fn from_dto(dto: UpdateRoleDto) -> Result<Self, AppError> {
        let name = match dto.name.map(|name| name.trim().to_string()) {
            Some(name) if name.is_empty() => {
                return Err(AppError::BadRequest("Role name must not be empty".to_string()))
            }
            name => name,
        };

        let patch = Self {
            name,
            discord_role_id: dto
                .discord_role_id
                .as_deref()
                .map(|id| parse_snowflake(id, "discord role id"))
                .transpose()?,
            permissions: dto
                .permissions
                .as_deref()
                .map(Permission::parse_all)
                .transpose()?,
            level: dto.level,
            color: dto.color,
            is_assignable: dto.is_assignable,
            description: dto.description,
        };
        patch.validate()?;

        Ok(patch)
    }

    /// Checks the patched values the store cannot represent.
    ///
    /// # Returns
    /// - `Ok(())` - Patch can be stored
    /// - `Err(AppError::BadRequest)` - `level` exceeds [`MAX_ROLE_LEVEL`]
    pub fn validate(&self) -> Result<(), AppError> {
        match self.level {
            Some(level) => validate_level(level),
            None => Ok(()),
        }
    }
}

fn validate_level(level: u32) -> Result<(), AppError> {
    if level > MAX_ROLE_LEVEL {
        return Err(AppError::BadRequest(format!(
            "Role level must not exceed {}",
            MAX_ROLE_LEVEL
        )));
    }

    Ok(())
}
