use super::*;
use crate::server::model::event::{CreateEventParams, EventKind, UpdateEventParams};
use chrono::{Duration, Utc};

/// Tests that only the organizer changes the status.
///
/// Expected: Ok for the organizer, Err(AppError::AuthErr) for anyone else
#[tokio::test]
async fn status_change_requires_organizer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let event = factory::create_event(db, organizer.id).await?;

    let service = EventService::new(db);

    let updated = service
        .update_event_status(event.id, EventStatus::InProgress, organizer.id)
        .await?;
    assert_eq!(updated.status, EventStatus::InProgress);

    let result = service
        .update_event_status(event.id, EventStatus::Cancelled, other.id)
        .await;
    assert!(matches!(result, Err(AppError::AuthErr(_))));
    assert_eq!(
        service.get_event(event.id).await?.status,
        EventStatus::InProgress
    );

    Ok(())
}

/// Tests lowering capacity below the current participant count.
///
/// Expected: Err(AppError::Capacity) and capacity unchanged
#[tokio::test]
async fn capacity_below_participants_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let event = EventFactory::new(db, organizer.id)
        .max_participants(5)
        .build()
        .await?;
    factory::create_participant(db, event.id, first.id, "attending", 0).await?;
    factory::create_participant(db, event.id, second.id, "maybe", 1).await?;

    let service = EventService::new(db);
    let result = service
        .update_event(
            event.id,
            UpdateEventParams {
                max_participants: Some(1),
                ..Default::default()
            },
            organizer.id,
        )
        .await;

    assert!(matches!(result, Err(AppError::Capacity(_))));
    assert_eq!(service.get_event(event.id).await?.max_participants, Some(5));

    Ok(())
}

/// Tests that non-organizers cannot delete an event.
///
/// Expected: Err(AppError::AuthErr) and the event still exists
#[tokio::test]
async fn delete_requires_organizer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let event = factory::create_event(db, organizer.id).await?;

    let service = EventService::new(db);

    assert!(matches!(
        service.delete_event(event.id, other.id).await,
        Err(AppError::AuthErr(_))
    ));

    service.delete_event(event.id, organizer.id).await?;

    assert!(matches!(
        service.get_event(event.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests capacities the store cannot hold on create and on update.
///
/// Expected: Err(AppError::BadRequest) both times and the stored capacity unchanged
#[tokio::test]
async fn capacity_out_of_range_is_bad_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let service = EventService::new(db);

    let result = service
        .create_event(CreateEventParams {
            name: "raid".to_string(),
            description: String::new(),
            kind: EventKind::Custom,
            start_date: Utc::now() + Duration::days(1),
            end_date: None,
            location: None,
            organizer_id: organizer.id,
            max_participants: Some(3_000_000_000),
            is_private: false,
            recurring_pattern: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let event = EventFactory::new(db, organizer.id)
        .max_participants(5)
        .build()
        .await?;
    let result = service
        .update_event(
            event.id,
            UpdateEventParams {
                max_participants: Some(u32::MAX),
                ..Default::default()
            },
            organizer.id,
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(service.get_event(event.id).await?.max_participants, Some(5));

    Ok(())
}
