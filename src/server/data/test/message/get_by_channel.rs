use super::*;

/// Tests channel history paging.
///
/// Verifies messages come newest first, `before` excludes the cursor and later
/// messages, and other channels are not mixed in.
///
/// Expected: the older page after the cursor, limited to two entries
#[tokio::test]
async fn pages_newest_first_before_cursor() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let other_channel = factory::create_channel(db, author.id).await?;
    let base = Utc::now() - Duration::hours(1);

    for (minutes, content) in [(0, "one"), (1, "two"), (2, "three"), (3, "four")] {
        factory::message::MessageFactory::new(db, channel.id, author.id)
            .content(content)
            .created_at(base + Duration::minutes(minutes))
            .build()
            .await?;
    }
    factory::message::MessageFactory::new(db, other_channel.id, author.id)
        .content("elsewhere")
        .created_at(base)
        .build()
        .await?;

    let repo = MessageRepository::new(db);
    let latest: Vec<String> = repo
        .get_by_channel(channel.id, 10, None)
        .await?
        .into_iter()
        .map(|m| m.content)
        .collect();
    let page: Vec<String> = repo
        .get_by_channel(channel.id, 2, Some(base + Duration::minutes(3)))
        .await?
        .into_iter()
        .map(|m| m.content)
        .collect();

    assert_eq!(latest, vec!["four", "three", "two", "one"]);
    assert_eq!(page, vec!["three", "two"]);

    Ok(())
}

/// Tests the pinned listing.
///
/// Expected: only pinned messages of the channel
#[tokio::test]
async fn get_pinned_returns_only_pinned() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    factory::message::MessageFactory::new(db, channel.id, author.id)
        .content("rules")
        .pinned(true)
        .build()
        .await?;
    factory::create_message(db, channel.id, author.id).await?;

    let pinned = MessageRepository::new(db).get_pinned(channel.id).await?;

    assert_eq!(pinned.len(), 1);
    assert_eq!(pinned[0].content, "rules");

    Ok(())
}
