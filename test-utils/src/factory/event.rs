//! Event factory for creating test event entities and participant rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test events organized by a given user.
///
/// # Example
///
/// ```rust,ignore
/// let event = EventFactory::new(&db, organizer.id)
///     .max_participants(2)
///     .start_date(Utc::now() + Duration::days(1))
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    organizer_id: i32,
    name: String,
    start_date: DateTime<Utc>,
    max_participants: Option<i32>,
    is_private: bool,
    status: String,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory with default values.
    ///
    /// Defaults: scheduled public event starting one day from now with no capacity limit.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `organizer_id` - Local user id of the organizer
    ///
    /// # Returns
    /// - `EventFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, organizer_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            organizer_id,
            name: format!("Event {}", id),
            start_date: Utc::now() + Duration::days(1),
            max_participants: None,
            is_private: false,
            status: "scheduled".to_string(),
        }
    }

    /// Sets the event name.
    ///
    /// # Arguments
    /// - `name` - Event name
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the start date.
    ///
    /// # Arguments
    /// - `start_date` - Start of the event
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Sets the participant limit.
    ///
    /// # Arguments
    /// - `max_participants` - Maximum number of participants
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn max_participants(mut self, max_participants: i32) -> Self {
        self.max_participants = Some(max_participants);
        self
    }

    /// Marks the event as private.
    ///
    /// # Arguments
    /// - `is_private` - `true` to hide the event from non-participants
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Sets the stored status.
    ///
    /// # Arguments
    /// - `status` - Status string, e.g. `"cancelled"`
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the event entity.
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        let now = Utc::now();
        entity::event::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set("Test event".to_string()),
            kind: ActiveValue::Set("custom".to_string()),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            organizer_id: ActiveValue::Set(self.organizer_id),
            max_participants: ActiveValue::Set(self.max_participants),
            is_private: ActiveValue::Set(self.is_private),
            recurring_pattern: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default event organized by `organizer_id`.
pub async fn create_event(
    db: &DatabaseConnection,
    organizer_id: i32,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db, organizer_id).build().await
}

/// Inserts a participant row for an event at the given position.
pub async fn create_participant(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
    status: &str,
    position: i32,
) -> Result<entity::event_participant::Model, DbErr> {
    entity::event_participant::ActiveModel {
        event_id: ActiveValue::Set(event_id),
        user_id: ActiveValue::Set(user_id),
        status: ActiveValue::Set(status.to_string()),
        position: ActiveValue::Set(position),
    }
    .insert(db)
    .await
}
