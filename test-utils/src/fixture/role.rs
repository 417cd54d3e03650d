//! Fixture for role test data.

use chrono::{DateTime, Utc};
use entity::role;

/// Default test role Discord ID.
pub const DEFAULT_DISCORD_ROLE_ID: &str = "987654321";

/// Creates a role entity model with default values.
///
/// # Example
/// ```rust,ignore
/// let entity = fixture::role::entity();
/// assert_eq!(entity.discord_role_id, "987654321");
/// ```
pub fn entity() -> role::Model {
    entity_builder().build()
}

/// Creates a customizable role entity builder.
pub fn entity_builder() -> RoleEntityBuilder {
    RoleEntityBuilder::default()
}

/// Builder for role entity models.
pub struct RoleEntityBuilder {
    id: i32,
    name: String,
    discord_role_id: String,
    level: i32,
    timestamp: DateTime<Utc>,
}

impl Default for RoleEntityBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Member".to_string(),
            discord_role_id: DEFAULT_DISCORD_ROLE_ID.to_string(),
            level: 0,
            timestamp: Utc::now(),
        }
    }
}

impl RoleEntityBuilder {
    /// Sets the role ID.
    ///
    /// # Arguments
    /// - `id` - Primary key
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Sets the role name.
    ///
    /// # Arguments
    /// - `name` - Role name
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
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
    /// - `Self` - Builder instance for method chaining
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
    /// - `Self` - Builder instance for method chaining
    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Builds the entity model.
    pub fn build(self) -> role::Model {
        role::Model {
            id: self.id,
            name: self.name,
            discord_role_id: self.discord_role_id,
            level: self.level,
            color: "#99AAB5".to_string(),
            is_assignable: true,
            description: None,
            created_at: self.timestamp,
            updated_at: self.timestamp,
        }
    }
}
