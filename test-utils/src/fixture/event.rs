//! Fixture for event test data.

use chrono::{DateTime, Duration, Utc};
use entity::event;

/// Creates an event entity model with default values.
pub fn entity() -> event::Model {
    entity_builder().build()
}

/// Creates a customizable event entity builder.
pub fn entity_builder() -> EventEntityBuilder {
    EventEntityBuilder::default()
}

/// Builder for event entity models.
pub struct EventEntityBuilder {
    id: i32,
    organizer_id: i32,
    start_date: DateTime<Utc>,
    max_participants: Option<i32>,
    is_private: bool,
    status: String,
    kind: String,
}

impl Default for EventEntityBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            organizer_id: 1,
            start_date: Utc::now() + Duration::days(1),
            max_participants: None,
            is_private: false,
            status: "scheduled".to_string(),
            kind: "custom".to_string(),
        }
    }
}

impl EventEntityBuilder {
    /// Sets the event ID.
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

    /// Sets the organizer.
    ///
    /// # Arguments
    /// - `organizer_id` - Local user id of the organizer
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn organizer_id(mut self, organizer_id: i32) -> Self {
        self.organizer_id = organizer_id;
        self
    }

    /// Sets the participant limit.
    ///
    /// # Arguments
    /// - `max_participants` - Maximum number of participants
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn max_participants(mut self, max_participants: i32) -> Self {
        self.max_participants = Some(max_participants);
        self
    }

    /// Marks the event as private.
    ///
    /// # Arguments
    /// - `is_private` - Private flag
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Sets the stored status.
    ///
    /// # Arguments
    /// - `status` - Status string
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the stored kind.
    ///
    /// # Arguments
    /// - `kind` - Kind string
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Builds the entity model.
    pub fn build(self) -> event::Model {
        let now = Utc::now();
        event::Model {
            id: self.id,
            name: "Raid night".to_string(),
            description: "Weekly raid".to_string(),
            kind: self.kind,
            start_date: self.start_date,
            end_date: None,
            location: None,
            organizer_id: self.organizer_id,
            max_participants: self.max_participants,
            is_private: self.is_private,
            recurring_pattern: None,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}
