use super::*;

/// Tests that saving an event rewrites the participant list in order.
///
/// Expected: participants read back in insertion order with their statuses
#[tokio::test]
async fn persists_participants_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let entity = factory::create_event(db, organizer.id).await?;

    let repo = EventRepository::new(db);
    let mut event = repo.find_by_id(entity.id).await?.unwrap();
    event
        .add_participant(second.id, ParticipantStatus::Attending)
        .unwrap();
    event.add_participant(first.id, ParticipantStatus::Maybe).unwrap();
    event.status = EventStatus::InProgress;
    repo.save(&event).await?;

    let stored = repo.find_by_id(entity.id).await?.unwrap();
    let participants: Vec<(i32, ParticipantStatus)> = stored
        .participants
        .iter()
        .map(|p| (p.user_id, p.status))
        .collect();

    assert_eq!(
        participants,
        vec![
            (second.id, ParticipantStatus::Attending),
            (first.id, ParticipantStatus::Maybe)
        ]
    );
    assert_eq!(stored.status, EventStatus::InProgress);
    assert_eq!(stored.organizer_id, organizer.id);

    Ok(())
}
