use super::*;

/// Tests case-insensitive substring search.
///
/// Expected: both messages containing "raid" in any case, not the unrelated one
#[tokio::test]
async fn matches_substring_ignoring_case() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    for content in ["Raid tonight", "who is raiding?", "hello"] {
        factory::message::MessageFactory::new(db, channel.id, author.id)
            .content(content)
            .build()
            .await?;
    }

    let results = MessageRepository::new(db).search("RAID", None, 50).await?;

    let mut contents: Vec<String> = results.into_iter().map(|m| m.content).collect();
    contents.sort();
    assert_eq!(contents, vec!["Raid tonight", "who is raiding?"]);

    Ok(())
}

/// Tests restricting a search to one channel.
///
/// Expected: only the match from the requested channel
#[tokio::test]
async fn filters_by_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let other = factory::create_channel(db, author.id).await?;
    let wanted = factory::message::MessageFactory::new(db, channel.id, author.id)
        .content("raid")
        .build()
        .await?;
    factory::message::MessageFactory::new(db, other.id, author.id)
        .content("raid")
        .build()
        .await?;

    let results = MessageRepository::new(db)
        .search("raid", Some(channel.id), 50)
        .await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, wanted.id);

    Ok(())
}

/// Tests that the channel restriction is applied before the limit.
///
/// The newest match sits in a channel outside the allowed set; with a limit of one
/// the older match from the allowed channel is still returned.
///
/// Expected: the single match from the allowed channel
#[tokio::test]
async fn search_in_channels_filters_before_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let allowed = factory::create_channel(db, author.id).await?;
    let excluded = factory::create_channel(db, author.id).await?;
    let now = Utc::now();

    let wanted = factory::message::MessageFactory::new(db, allowed.id, author.id)
        .content("raid")
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;
    factory::message::MessageFactory::new(db, excluded.id, author.id)
        .content("raid")
        .created_at(now)
        .build()
        .await?;

    let results = MessageRepository::new(db)
        .search_in_channels("raid", &[allowed.id], 1)
        .await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, wanted.id);

    Ok(())
}
