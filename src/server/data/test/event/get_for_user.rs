use super::*;

/// Tests listing the events a user organizes or takes part in.
///
/// Expected: organized and joined events, most recent start first; unrelated events excluded
#[tokio::test]
async fn includes_organized_and_joined_events() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    factory::event::EventFactory::new(db, user.id)
        .name("organized")
        .start_date(now + Duration::days(1))
        .build()
        .await?;
    let joined = factory::event::EventFactory::new(db, other.id)
        .name("joined")
        .start_date(now + Duration::days(2))
        .build()
        .await?;
    factory::create_participant(db, joined.id, user.id, "maybe", 0).await?;
    factory::event::EventFactory::new(db, other.id)
        .name("unrelated")
        .build()
        .await?;

    let names: Vec<String> = EventRepository::new(db)
        .get_for_user(user.id)
        .await?
        .into_iter()
        .map(|e| e.name)
        .collect();

    assert_eq!(names, vec!["joined", "organized"]);

    Ok(())
}
