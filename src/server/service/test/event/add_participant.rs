use super::*;

/// Tests the capacity limit.
///
/// Fills an event with a capacity of 2, then lets a third user try to join.
///
/// Expected: Err(AppError::Capacity) and the participant list unchanged
#[tokio::test]
async fn full_event_rejects_new_participant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let third = factory::create_user(db).await?;
    let event = EventFactory::new(db, organizer.id)
        .max_participants(2)
        .build()
        .await?;

    let service = EventService::new(db);
    service
        .add_participant(event.id, first.id, ParticipantStatus::Attending, first.id)
        .await?;
    service
        .add_participant(event.id, second.id, ParticipantStatus::Maybe, second.id)
        .await?;

    let result = service
        .add_participant(event.id, third.id, ParticipantStatus::Attending, third.id)
        .await;

    assert!(matches!(result, Err(AppError::Capacity(_))));
    assert_eq!(service.get_event(event.id).await?.participants.len(), 2);

    Ok(())
}

/// Tests that an existing participant can change status on a full event.
///
/// Expected: Ok with the same participant count, position and the new status
#[tokio::test]
async fn existing_participant_updates_status_when_full() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let event = EventFactory::new(db, organizer.id)
        .max_participants(2)
        .build()
        .await?;
    factory::create_participant(db, event.id, first.id, "attending", 0).await?;
    factory::create_participant(db, event.id, second.id, "attending", 1).await?;

    let event = EventService::new(db)
        .add_participant(event.id, first.id, ParticipantStatus::NotAttending, first.id)
        .await?;

    assert_eq!(event.participants.len(), 2);
    assert_eq!(event.participants[0].user_id, first.id);
    assert_eq!(event.participants[0].status, ParticipantStatus::NotAttending);

    Ok(())
}

/// Tests answering on behalf of another user.
///
/// Expected: organizer may add anyone, other users get Err(AppError::AuthErr)
#[tokio::test]
async fn only_organizer_answers_for_others() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let guest = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let event = factory::create_event(db, organizer.id).await?;

    let service = EventService::new(db);

    let result = service
        .add_participant(event.id, guest.id, ParticipantStatus::Attending, stranger.id)
        .await;
    assert!(matches!(result, Err(AppError::AuthErr(_))));

    let event = service
        .add_participant(event.id, guest.id, ParticipantStatus::Attending, organizer.id)
        .await?;
    assert_eq!(event.participants.len(), 1);

    Ok(())
}

/// Tests self-service RSVP on a private event.
///
/// Expected: Err(AppError::AuthErr) for an outsider; Ok once the organizer added them
#[tokio::test]
async fn private_event_blocks_self_join() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let guest = factory::create_user(db).await?;
    let event = EventFactory::new(db, organizer.id)
        .private(true)
        .build()
        .await?;

    let service = EventService::new(db);

    let result = service
        .add_participant(event.id, guest.id, ParticipantStatus::Attending, guest.id)
        .await;
    assert!(matches!(result, Err(AppError::AuthErr(_))));

    service
        .add_participant(event.id, guest.id, ParticipantStatus::Maybe, organizer.id)
        .await?;
    let event = service
        .add_participant(event.id, guest.id, ParticipantStatus::Attending, guest.id)
        .await?;

    assert_eq!(
        event.participant(guest.id).map(|p| p.status),
        Some(ParticipantStatus::Attending)
    );

    Ok(())
}

/// Tests leaving an event.
///
/// Expected: participant removed; leaving again is a no-op
#[tokio::test]
async fn remove_participant_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let guest = factory::create_user(db).await?;
    let event = factory::create_event(db, organizer.id).await?;
    factory::create_participant(db, event.id, guest.id, "attending", 0).await?;

    let service = EventService::new(db);
    let event = service.remove_participant(event.id, guest.id, guest.id).await?;
    assert!(event.participants.is_empty());

    let event = service.remove_participant(event.id, guest.id, guest.id).await?;
    assert!(event.participants.is_empty());

    Ok(())
}
