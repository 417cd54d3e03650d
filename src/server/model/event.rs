//! Event domain models, participation and capacity rules.
//!
//! Events are owned by their organizer: only the organizer may patch, delete or change
//! the status of an event. Participation is an ordered list in which each user appears
//! at most once, bounded by `max_participants` when set.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    model::event::{CreateEventDto, EventDto, ParticipantDto, UpdateEventDto},
    server::{
        error::AppError,
        model::access::{AccessScope, Restricted},
    },
};

/// Generates `as_str`, `Display` and `FromStr` for a string-backed enum.
macro_rules! string_enum {
    ($name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(AppError::BadRequest(format!(
                        "Unknown {} '{}'",
                        $label, other
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    Server,
    #[default]
    Custom,
    Recurring,
}

string_enum!(EventKind, "event kind", {
    Server => "server",
    Custom => "custom",
    Recurring => "recurring",
});

/// Lifecycle state of an event. Any transition is allowed for the organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

string_enum!(EventStatus, "event status", {
    Scheduled => "scheduled",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

/// RSVP state of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticipantStatus {
    Attending,
    #[default]
    Maybe,
    NotAttending,
}

string_enum!(ParticipantStatus, "participant status", {
    Attending => "attending",
    Maybe => "maybe",
    NotAttending => "not_attending",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub user_id: i32,
    pub status: ParticipantStatus,
}

/// Scheduled community event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub kind: EventKind,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Immutable after creation.
    pub organizer_id: i32,
    /// Ordered by join time; a user appears at most once.
    pub participants: Vec<Participant>,
    pub max_participants: Option<u32>,
    pub is_private: bool,
    pub recurring_pattern: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Converts an event row and its participant rows to a domain model.
    ///
    /// Participants are ordered by their stored position.
    ///
    /// # Returns
    /// - `Ok(Event)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored kind, status or capacity is invalid
    pub fn from_entity(
        entity: entity::event::Model,
        mut participants: Vec<entity::event_participant::Model>,
    ) -> Result<Self, DbErr> {
        participants.sort_by_key(|row| row.position);

        let participants = participants
            .into_iter()
            .map(|row| {
                Ok(Participant {
                    user_id: row.user_id,
                    status: row.status.parse().map_err(|e| {
                        DbErr::Custom(format!("Failed to parse participant status: {}", e))
                    })?,
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        let max_participants = entity
            .max_participants
            .map(u32::try_from)
            .transpose()
            .map_err(|e| DbErr::Custom(format!("Failed to parse max_participants: {}", e)))?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            kind: entity
                .kind
                .parse()
                .map_err(|e| DbErr::Custom(format!("Failed to parse event kind: {}", e)))?,
            start_date: entity.start_date,
            end_date: entity.end_date,
            location: entity.location,
            organizer_id: entity.organizer_id,
            participants,
            max_participants,
            is_private: entity.is_private,
            recurring_pattern: entity.recurring_pattern,
            status: entity
                .status
                .parse()
                .map_err(|e| DbErr::Custom(format!("Failed to parse event status: {}", e)))?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Whether no new participant can join.
    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.participants.len() >= max as usize)
    }

    pub fn participant(&self, user_id: i32) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    /// Adds `user_id` with `status`, or overwrites the status of an existing entry.
    ///
    /// Existing participants keep their position and are never blocked by capacity.
    ///
    /// # Returns
    /// - `Ok(())` - Participant added or updated
    /// - `Err(AppError::Capacity)` - User is new and the event is full
    pub fn add_participant(
        &mut self,
        user_id: i32,
        status: ParticipantStatus,
    ) -> Result<(), AppError> {
        if let Some(existing) = self.participants.iter_mut().find(|p| p.user_id == user_id) {
            existing.status = status;
            return Ok(());
        }

        if self.is_full() {
            return Err(AppError::Capacity("Event is full".to_string()));
        }

        self.participants.push(Participant { user_id, status });
        Ok(())
    }

    /// Removes `user_id` if present. Returns whether the list changed.
    pub fn remove_participant(&mut self, user_id: i32) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.user_id != user_id);
        self.participants.len() != before
    }

    /// Overwrites every field present in `patch` after validating the result.
    ///
    /// # Returns
    /// - `Ok(())` - Patch applied
    /// - `Err(AppError::BadRequest)` - End date before start date, or capacity out of range
    /// - `Err(AppError::Capacity)` - Capacity lowered below the current participant count
    pub fn apply(&mut self, patch: UpdateEventParams) -> Result<(), AppError> {
        validate_capacity(patch.max_participants)?;

        let start_date = patch.start_date.unwrap_or(self.start_date);
        let end_date = patch.end_date.or(self.end_date);
        validate_dates(start_date, end_date)?;

        if let Some(max) = patch.max_participants {
            if (max as usize) < self.participants.len() {
                return Err(AppError::Capacity(format!(
                    "Event already has {} participants",
                    self.participants.len()
                )));
            }
            self.max_participants = Some(max);
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(is_private) = patch.is_private {
            self.is_private = is_private;
        }
        if let Some(recurring_pattern) = patch.recurring_pattern {
            self.recurring_pattern = Some(recurring_pattern);
        }

        Ok(())
    }

    pub fn into_dto(self) -> EventDto {
        EventDto {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: self.kind.as_str().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            organizer_id: self.organizer_id,
            participants: self
                .participants
                .into_iter()
                .map(|p| ParticipantDto {
                    user_id: p.user_id,
                    status: p.status.as_str().to_string(),
                })
                .collect(),
            max_participants: self.max_participants,
            is_private: self.is_private,
            recurring_pattern: self.recurring_pattern,
            status: self.status.as_str().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Private events are visible to the organizer and to anyone on the participant list.
impl Restricted for Event {
    fn access_scope(&self) -> AccessScope {
        let mut allowed_users: BTreeSet<i32> =
            self.participants.iter().map(|p| p.user_id).collect();
        allowed_users.insert(self.organizer_id);

        AccessScope {
            owner_id: self.organizer_id,
            is_private: self.is_private,
            allowed_users,
            allowed_roles: BTreeSet::new(),
        }
    }
}

fn validate_dates(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<(), AppError> {
    match end {
        Some(end) if end < start => Err(AppError::BadRequest(
            "Event end date must not be before its start date".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Highest capacity the `event.max_participants` column can hold.
pub const MAX_PARTICIPANTS_LIMIT: u32 = i32::MAX as u32;

fn validate_capacity(max_participants: Option<u32>) -> Result<(), AppError> {
    match max_participants {
        Some(0) => Err(AppError::BadRequest(
            "max_participants must be a positive number".to_string(),
        )),
        Some(max) if max > MAX_PARTICIPANTS_LIMIT => Err(AppError::BadRequest(format!(
            "max_participants must not exceed {}",
            MAX_PARTICIPANTS_LIMIT
        ))),
        _ => Ok(()),
    }
}

/// Parameters for creating an event.
#[derive(Debug, Clone)]
pub struct CreateEventParams {
    pub name: String,
    pub description: String,
    pub kind: EventKind,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub organizer_id: i32,
    pub max_participants: Option<u32>,
    pub is_private: bool,
    pub recurring_pattern: Option<String>,
}

impl CreateEventParams {
    /// Validates a create request on behalf of `organizer_id`.
    ///
    /// # Returns
    /// - `Ok(CreateEventParams)` - Valid parameters
    /// - `Err(AppError::BadRequest)` - Empty name, unknown kind, bad dates or capacity
    pub fn from_dto(organizer_id: i32, dto: CreateEventDto) -> Result<Self, AppError> {
        if dto.name.trim().is_empty() {
            return Err(AppError::BadRequest("Event name is required".to_string()));
        }

        let params = Self {
            name: dto.name,
            description: dto.description,
            kind: dto
                .kind
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            start_date: dto.start_date,
            end_date: dto.end_date,
            location: dto.location,
            organizer_id,
            max_participants: dto.max_participants,
            is_private: dto.is_private,
            recurring_pattern: dto.recurring_pattern,
        };
        params.validate()?;

        Ok(params)
    }

    /// Checks date order and capacity bounds.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_dates(self.start_date, self.end_date)?;
        validate_capacity(self.max_participants)
    }
}

/// Shallow patch for an event. The organizer is not patchable.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<EventKind>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_participants: Option<u32>,
    pub is_private: Option<bool>,
    pub recurring_pattern: Option<String>,
}

impl UpdateEventParams {
    pub fn from_dto(dto: UpdateEventDto) -> Result<Self, AppError> {
        validate_capacity(dto.max_participants)?;

        Ok(Self {
            name: dto.name,
            description: dto.description,
            kind: dto.kind.as_deref().map(str::parse).transpose()?,
            start_date: dto.start_date,
            end_date: dto.end_date,
            location: dto.location,
            max_participants: dto.max_participants,
            is_private: dto.is_private,
            recurring_pattern: dto.recurring_pattern,
        })
    }
}
