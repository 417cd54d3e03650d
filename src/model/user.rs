use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub discord_id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
