use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
    pub discord_role_id: String,
    pub permissions: Vec<String>,
    pub level: u32,
    pub color: String,
    pub is_assignable: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoleDto {
    pub name: String,
    pub discord_role_id: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub level: u32,
    pub color: Option<String>,
    pub is_assignable: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRoleDto {
    pub name: Option<String>,
    pub discord_role_id: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub level: Option<u32>,
    pub color: Option<String>,
    pub is_assignable: Option<bool>,
    pub description: Option<String>,
}
