use super::*;

/// Tests reaction counts as several users react.
///
/// Expected: one entry per emoji with counts matching the distinct users
#[tokio::test]
async fn counts_distinct_users_per_emoji() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let message = factory::create_message(db, channel.id, author.id).await?;

    let service = MessageService::new(db);
    service.add_reaction(message.id, "👍", author.id).await?;
    service.add_reaction(message.id, "👍", other.id).await?;
    service.add_reaction(message.id, "👍", other.id).await?;
    let message = service.add_reaction(message.id, "🎉", other.id).await?;

    assert_eq!(message.reactions.len(), 2);
    assert_eq!(message.reactions[0].emoji, "👍");
    assert_eq!(message.reactions[0].users, vec![author.id, other.id]);
    assert_eq!(message.reactions[1].count(), 1);

    Ok(())
}

/// Tests withdrawing the last reaction for an emoji.
///
/// Expected: the emoji disappears from the message
#[tokio::test]
async fn withdrawing_last_reaction_drops_emoji() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let message = factory::create_message(db, channel.id, author.id).await?;

    let service = MessageService::new(db);
    service.add_reaction(message.id, "👍", author.id).await?;
    let message = service.remove_reaction(message.id, "👍", author.id).await?;

    assert!(message.reactions.is_empty());

    Ok(())
}
