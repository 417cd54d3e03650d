use super::*;

/// Tests the upcoming listing.
///
/// Verifies past and cancelled events are excluded, results are soonest first and
/// the limit is honored.
///
/// Expected: the two nearest scheduled future events
#[tokio::test]
async fn returns_future_non_cancelled_events_soonest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::create_user(db).await?;
    let now = Utc::now();

    factory::event::EventFactory::new(db, organizer.id)
        .name("past")
        .start_date(now - Duration::days(1))
        .build()
        .await?;
    factory::event::EventFactory::new(db, organizer.id)
        .name("cancelled")
        .start_date(now + Duration::hours(1))
        .status("cancelled")
        .build()
        .await?;
    factory::event::EventFactory::new(db, organizer.id)
        .name("later")
        .start_date(now + Duration::days(3))
        .build()
        .await?;
    factory::event::EventFactory::new(db, organizer.id)
        .name("soon")
        .start_date(now + Duration::hours(2))
        .build()
        .await?;
    factory::event::EventFactory::new(db, organizer.id)
        .name("much later")
        .start_date(now + Duration::days(9))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let names: Vec<String> = repo
        .get_upcoming(now, 2)
        .await?
        .into_iter()
        .map(|e| e.name)
        .collect();

    assert_eq!(names, vec!["soon", "later"]);
    assert_eq!(repo.count_upcoming(now).await?, 3);

    Ok(())
}
