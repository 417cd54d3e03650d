//! Event data repository.
//!
//! An event is stored as an `event` row plus one `event_participant` row per participant.
//! Participant order is kept in the `position` column.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionSession, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::{
    data::Touch,
    model::event::{CreateEventParams, Event, EventStatus, Participant},
};

pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> EventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a scheduled event without participants.
    pub async fn create(&self, params: CreateEventParams) -> Result<Event, DbErr> {
        let now = Utc::now();
        let entity = entity::event::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            location: ActiveValue::Set(params.location),
            organizer_id: ActiveValue::Set(params.organizer_id),
            max_participants: ActiveValue::Set(capacity_to_column(params.max_participants)?),
            is_private: ActiveValue::Set(params.is_private),
            recurring_pattern: ActiveValue::Set(params.recurring_pattern),
            status: ActiveValue::Set(EventStatus::Scheduled.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Event::from_entity(entity, Vec::new())
    }

    /// Finds an event by id with its participants in join order.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        let Some(entity) = entity::prelude::Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_participants(vec![entity])
            .await
            .map(|mut events| events.pop())
    }

    /// Gets events starting at or after `now` that are not cancelled, soonest first.
    pub async fn get_upcoming(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Event>, DbErr> {
        let entities = entity::prelude::Event::find()
            .filter(entity::event::Column::StartDate.gte(now))
            .filter(entity::event::Column::Status.ne(EventStatus::Cancelled.as_str()))
            .order_by_asc(entity::event::Column::StartDate)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_participants(entities).await
    }

    /// Gets upcoming events `viewer_id` may see, soonest first.
    ///
    /// Visibility is applied before the limit: public events plus private events the
    /// viewer organizes or participates in.
    pub async fn get_upcoming_visible(
        &self,
        now: DateTime<Utc>,
        viewer_id: i32,
        limit: u64,
    ) -> Result<Vec<Event>, DbErr> {
        let participating = self.participating_event_ids(viewer_id).await?;

        let entities = entity::prelude::Event::find()
            .filter(entity::event::Column::StartDate.gte(now))
            .filter(entity::event::Column::Status.ne(EventStatus::Cancelled.as_str()))
            .filter(
                Condition::any()
                    .add(entity::event::Column::IsPrivate.eq(false))
                    .add(entity::event::Column::OrganizerId.eq(viewer_id))
                    .add(entity::event::Column::Id.is_in(participating)),
            )
            .order_by_asc(entity::event::Column::StartDate)
            .limit(limit)
            .all(self.db)
            .await?;

        self.with_participants(entities).await
    }

    pub async fn count_upcoming(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::StartDate.gte(now))
            .filter(entity::event::Column::Status.ne(EventStatus::Cancelled.as_str()))
            .count(self.db)
            .await
    }

    /// Gets events a user organizes or participates in, most recent start first.
    pub async fn get_for_user(&self, user_id: i32) -> Result<Vec<Event>, DbErr> {
        let participating = self.participating_event_ids(user_id).await?;

        let entities = entity::prelude::Event::find()
            .filter(
                Condition::any()
                    .add(entity::event::Column::OrganizerId.eq(user_id))
                    .add(entity::event::Column::Id.is_in(participating)),
            )
            .order_by_desc(entity::event::Column::StartDate)
            .all(self.db)
            .await?;

        self.with_participants(entities).await
    }

    async fn participating_event_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Writes back a modified event snapshot, replacing the participant list.
    ///
    /// The organizer column is never written.
    pub async fn save(&self, event: &Event) -> Result<Event, DbErr> {
        let txn = self.db.begin().await?;

        let mut active_model = entity::event::ActiveModel {
            id: ActiveValue::Unchanged(event.id),
            name: ActiveValue::Set(event.name.clone()),
            description: ActiveValue::Set(event.description.clone()),
            kind: ActiveValue::Set(event.kind.as_str().to_string()),
            start_date: ActiveValue::Set(event.start_date),
            end_date: ActiveValue::Set(event.end_date),
            location: ActiveValue::Set(event.location.clone()),
            organizer_id: ActiveValue::Unchanged(event.organizer_id),
            max_participants: ActiveValue::Set(capacity_to_column(event.max_participants)?),
            is_private: ActiveValue::Set(event.is_private),
            recurring_pattern: ActiveValue::Set(event.recurring_pattern.clone()),
            status: ActiveValue::Set(event.status.as_str().to_string()),
            created_at: ActiveValue::Unchanged(event.created_at),
            updated_at: ActiveValue::NotSet,
        };
        active_model.touch(Utc::now());
        let entity = active_model.update(&txn).await?;

        entity::prelude::EventParticipant::delete_many()
            .filter(entity::event_participant::Column::EventId.eq(event.id))
            .exec(&txn)
            .await?;

        let rows = participant_rows(event.id, &event.participants);
        if !rows.is_empty() {
            entity::prelude::EventParticipant::insert_many(rows.iter().cloned().map(|row| {
                entity::event_participant::ActiveModel {
                    event_id: ActiveValue::Set(row.event_id),
                    user_id: ActiveValue::Set(row.user_id),
                    status: ActiveValue::Set(row.status),
                    position: ActiveValue::Set(row.position),
                }
            }))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        Event::from_entity(entity, rows)
    }

    /// Deletes an event. Participant rows cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    async fn with_participants(
        &self,
        entities: Vec<entity::event::Model>,
    ) -> Result<Vec<Event>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_event: HashMap<i32, Vec<entity::event_participant::Model>> = HashMap::new();
        for row in entity::prelude::EventParticipant::find()
            .filter(
                entity::event_participant::Column::EventId.is_in(entities.iter().map(|e| e.id)),
            )
            .all(self.db)
            .await?
        {
            by_event.entry(row.event_id).or_default().push(row);
        }

        entities
            .into_iter()
            .map(|entity| {
                let participants = by_event.remove(&entity.id).unwrap_or_default();
                Event::from_entity(entity, participants)
            })
            .collect()
    }
}

fn participant_rows(event_id: i32, participants: &[Participant]) -> Vec<entity::event_participant::Model> {
    participants
        .iter()
        .zip(0..)
        .map(|(participant, position)| entity::event_participant::Model {
            event_id,
            user_id: participant.user_id,
            status: participant.status.as_str().to_string(),
            position,
        })
        .collect()
}

fn capacity_to_column(max_participants: Option<u32>) -> Result<Option<i32>, DbErr> {
    max_participants
        .map(i32::try_from)
        .transpose()
        .map_err(|e| DbErr::Custom(format!("max_participants out of range: {}", e)))
}
