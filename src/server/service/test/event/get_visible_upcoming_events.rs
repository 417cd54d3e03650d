use super::*;
use chrono::{Duration, Utc};

/// Tests that a hidden event sorting first does not take the only slot.
///
/// A private event starts in one hour and a public one in two. An outsider asking
/// for a single event gets the public one, while the organizer gets their own.
///
/// Expected: the public event for the outsider, the private event for the organizer
#[tokio::test]
async fn hidden_events_do_not_consume_limit() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let outsider = factory::create_user(db).await?;
    let now = Utc::now();

    let private = EventFactory::new(db, organizer.id)
        .name("officers")
        .private(true)
        .start_date(now + Duration::hours(1))
        .build()
        .await?;
    let public = EventFactory::new(db, organizer.id)
        .name("raid")
        .start_date(now + Duration::hours(2))
        .build()
        .await?;

    let service = EventService::new(db);

    let events = service.get_visible_upcoming_events(outsider.id, 1).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, public.id);

    let events = service.get_visible_upcoming_events(organizer.id, 1).await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, private.id);

    Ok(())
}

/// Tests that participants see the private events they joined.
///
/// Expected: both events for the participant, only the public one for an outsider
#[tokio::test]
async fn participants_see_joined_private_events() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let outsider = factory::create_user(db).await?;
    let now = Utc::now();

    let private = EventFactory::new(db, organizer.id)
        .private(true)
        .start_date(now + Duration::hours(1))
        .build()
        .await?;
    EventFactory::new(db, organizer.id)
        .start_date(now + Duration::hours(2))
        .build()
        .await?;
    factory::create_participant(db, private.id, member.id, "attending", 0).await?;

    let service = EventService::new(db);

    assert_eq!(service.get_visible_upcoming_events(member.id, 10).await?.len(), 2);
    assert_eq!(
        service.get_visible_upcoming_events(outsider.id, 10).await?.len(),
        1
    );

    Ok(())
}
