use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Role};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Role)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables required for role and permission operations.
    ///
    /// Adds, in dependency order: User, Role, RolePermission, UserRole.
    pub fn with_rbac_tables(self) -> Self {
        self.with_table(User)
            .with_table(Role)
            .with_table(RolePermission)
            .with_table(UserRole)
    }

    /// Adds the tables required for channel operations.
    ///
    /// Includes everything from `with_rbac_tables()` followed by Channel and both
    /// allow-list tables.
    pub fn with_channel_tables(self) -> Self {
        self.with_rbac_tables()
            .with_table(Channel)
            .with_table(ChannelAllowedRole)
            .with_table(ChannelAllowedUser)
    }

    /// Adds the tables required for event operations.
    ///
    /// Includes everything from `with_rbac_tables()` followed by Event and
    /// EventParticipant.
    pub fn with_event_tables(self) -> Self {
        self.with_rbac_tables()
            .with_table(Event)
            .with_table(EventParticipant)
    }

    /// Adds the tables required for message operations.
    ///
    /// Includes everything from `with_channel_tables()` followed by Message,
    /// MessageEdit and MessageReaction.
    pub fn with_message_tables(self) -> Self {
        self.with_channel_tables()
            .with_table(Message)
            .with_table(MessageEdit)
            .with_table(MessageReaction)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_message_tables()
            .with_table(Event)
            .with_table(EventParticipant)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
