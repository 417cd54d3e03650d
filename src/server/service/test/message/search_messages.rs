use super::*;

/// Tests a blank search query.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn blank_query_is_bad_request() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = MessageService::new(db).search_messages("   ", None).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that the query is trimmed before matching.
///
/// Expected: only the matching message is returned
#[tokio::test]
async fn trims_query() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    factory::message::MessageFactory::new(db, channel.id, author.id)
        .content("Raid tonight")
        .build()
        .await?;
    factory::message::MessageFactory::new(db, channel.id, author.id)
        .content("hello")
        .build()
        .await?;

    let results = MessageService::new(db)
        .search_messages("  raid ", None)
        .await?;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].content, "Raid tonight");

    Ok(())
}

/// Tests that matches in hidden channels are left out.
///
/// The newest match sits in a private channel the searcher cannot see, and naming
/// that channel explicitly is reported as missing.
///
/// Expected: only the public match, then Err(AppError::NotFound) for the hidden channel
#[tokio::test]
async fn visible_search_skips_hidden_channels() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let searcher = factory::create_user(db).await?;
    let public = factory::create_channel(db, owner.id).await?;
    let hidden = factory::channel::ChannelFactory::new(db, owner.id)
        .private(true)
        .build()
        .await?;
    let now = Utc::now();

    let wanted = factory::message::MessageFactory::new(db, public.id, owner.id)
        .content("raid at eight")
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;
    factory::message::MessageFactory::new(db, hidden.id, owner.id)
        .content("raid loot split")
        .created_at(now)
        .build()
        .await?;

    let service = MessageService::new(db);

    let results = service.search_visible_messages("raid", None, searcher.id).await?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, wanted.id);

    let result = service
        .search_visible_messages("raid", Some(hidden.id), searcher.id)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
