//! Event lifecycle, participation and visibility.
//!
//! Mutations of an event (patch, status, delete) are reserved for its organizer.
//! Participants manage their own RSVP; the organizer may manage anyone's.

use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{event::EventRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        access::{can_access, require_owner},
        event::{CreateEventParams, Event, EventStatus, ParticipantStatus, UpdateEventParams},
    },
};

/// Number of events returned by the upcoming list when no limit is given.
pub const DEFAULT_UPCOMING_LIMIT: u64 = 10;

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an event organized by `params.organizer_id`.
    ///
    /// # Returns
    /// - `Ok(Event)` - The created event, scheduled and without participants
    /// - `Err(AppError::BadRequest)` - Dates out of order or capacity out of range
    /// - `Err(AppError::NotFound)` - The organizer does not exist
    pub async fn create_event(&self, params: CreateEventParams) -> Result<Event, AppError> {
        params.validate()?;
        self.ensure_user(params.organizer_id).await?;

        let event = EventRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Created event {} ({}) organized by user {}",
            event.name,
            event.id,
            event.organizer_id
        );

        Ok(event)
    }

    /// Gets an event by id.
    ///
    /// # Returns
    /// - `Ok(Event)` - The event
    /// - `Err(AppError::NotFound)` - No event with that id
    pub async fn get_event(&self, id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// Applies a shallow patch on behalf of the organizer.
    ///
    /// # Returns
    /// - `Ok(Event)` - The updated event
    /// - `Err(AppError::NotFound)` - No event with that id
    /// - `Err(AppError::AuthErr)` - The caller is not the organizer
    /// - `Err(AppError::BadRequest)` - The patch leaves the end date before the start date or
    ///   sets a capacity out of range
    /// - `Err(AppError::Capacity)` - The patch lowers capacity below the participant count
    pub async fn update_event(
        &self,
        id: i32,
        patch: UpdateEventParams,
        caller_id: i32,
    ) -> Result<Event, AppError> {
        let mut event = self.get_event(id).await?;
        require_owner(event.organizer_id, caller_id, "update this event")?;

        event.apply(patch)?;

        let event = EventRepository::new(self.db).save(&event).await?;

        tracing::info!("Updated event {} ({})", event.name, id);

        Ok(event)
    }

    /// Deletes an event on behalf of the organizer.
    pub async fn delete_event(&self, id: i32, caller_id: i32) -> Result<(), AppError> {
        let event = self.get_event(id).await?;
        require_owner(event.organizer_id, caller_id, "delete this event")?;

        EventRepository::new(self.db).delete(id).await?;

        tracing::info!("Deleted event {} ({})", event.name, id);

        Ok(())
    }

    /// Sets the lifecycle status. Any transition is allowed for the organizer.
    pub async fn update_event_status(
        &self,
        id: i32,
        status: EventStatus,
        caller_id: i32,
    ) -> Result<Event, AppError> {
        let mut event = self.get_event(id).await?;
        require_owner(event.organizer_id, caller_id, "change the event status")?;

        event.status = status;

        let event = EventRepository::new(self.db).save(&event).await?;

        tracing::info!("Event {} ({}) is now {}", event.name, id, status);

        Ok(event)
    }

    /// Records an RSVP for `user_id`.
    ///
    /// Users answer for themselves; only the organizer may answer for someone else. A
    /// private event only accepts self-service RSVPs from users who can already see it,
    /// so newcomers must be added by the organizer.
    ///
    /// # Returns
    /// - `Ok(Event)` - The event after the change
    /// - `Err(AppError::NotFound)` - The event or user does not exist
    /// - `Err(AppError::AuthErr)` - The caller may not answer for this user
    /// - `Err(AppError::Capacity)` - The user is new and the event is full
    pub async fn add_participant(
        &self,
        event_id: i32,
        user_id: i32,
        status: ParticipantStatus,
        caller_id: i32,
    ) -> Result<Event, AppError> {
        let mut event = self.get_event(event_id).await?;
        self.ensure_user(user_id).await?;

        if caller_id != user_id {
            require_owner(event.organizer_id, caller_id, "manage other participants")?;
        } else if !can_access(&event, user_id, &[]) {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("event {} is private", event_id),
            )
            .into());
        }

        event.add_participant(user_id, status)?;

        let event = EventRepository::new(self.db).save(&event).await?;

        tracing::info!(
            "User {} is {} for event {} ({})",
            user_id,
            status,
            event.name,
            event_id
        );

        Ok(event)
    }

    /// Withdraws `user_id` from an event. Withdrawing a non-participant is not an error.
    pub async fn remove_participant(
        &self,
        event_id: i32,
        user_id: i32,
        caller_id: i32,
    ) -> Result<Event, AppError> {
        let mut event = self.get_event(event_id).await?;

        if caller_id != user_id {
            require_owner(event.organizer_id, caller_id, "manage other participants")?;
        }

        if !event.remove_participant(user_id) {
            return Ok(event);
        }

        let event = EventRepository::new(self.db).save(&event).await?;

        tracing::info!("User {} left event {} ({})", user_id, event.name, event_id);

        Ok(event)
    }

    /// Gets events that have not started yet and are not cancelled, soonest first.
    pub async fn get_upcoming_events(&self, limit: u64) -> Result<Vec<Event>, AppError> {
        Ok(EventRepository::new(self.db)
            .get_upcoming(Utc::now(), limit)
            .await?)
    }

    /// Gets up to `limit` upcoming events visible to `viewer_id`.
    ///
    /// Hidden events never take a slot, so a private event sorting first does not
    /// shorten the page.
    pub async fn get_visible_upcoming_events(
        &self,
        viewer_id: i32,
        limit: u64,
    ) -> Result<Vec<Event>, AppError> {
        Ok(EventRepository::new(self.db)
            .get_upcoming_visible(Utc::now(), viewer_id, limit)
            .await?)
    }

    /// Gets the events a user organizes or participates in, latest start first.
    ///
    /// # Returns
    /// - `Ok(Vec<Event>)` - The user's events
    /// - `Err(AppError::NotFound)` - The user does not exist
    pub async fn get_user_events(&self, user_id: i32) -> Result<Vec<Event>, AppError> {
        self.ensure_user(user_id).await?;

        Ok(EventRepository::new(self.db).get_for_user(user_id).await?)
    }

    /// Evaluates whether a user may see an event.
    pub async fn check_user_access(&self, event_id: i32, user_id: i32) -> Result<bool, AppError> {
        let event = self.get_event(event_id).await?;

        Ok(can_access(&event, user_id, &[]))
    }

    /// Gets an event, reporting hidden private events as missing.
    pub async fn get_visible_event(&self, event_id: i32, viewer_id: i32) -> Result<Event, AppError> {
        let event = self.get_event(event_id).await?;

        if !can_access(&event, viewer_id, &[]) {
            return Err(AppError::NotFound(format!("Event {} not found", event_id)));
        }

        Ok(event)
    }

    async fn ensure_user(&self, user_id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        Ok(())
    }
}
