use super::*;
use test_utils::factory::helpers::create_user_with_permissions;

/// Tests that pinning requires MANAGE_MESSAGES.
///
/// Expected: Err(AppError::AuthErr) for a plain member, Ok for a moderator
#[tokio::test]
async fn pin_requires_manage_messages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let (moderator, _) = create_user_with_permissions(db, &["MANAGE_MESSAGES"]).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let message = factory::create_message(db, channel.id, author.id).await?;

    let service = MessageService::new(db);

    assert!(matches!(
        service.pin_message(message.id, author.id).await,
        Err(AppError::AuthErr(_))
    ));

    let pinned = service.pin_message(message.id, moderator.id).await?;
    assert!(pinned.is_pinned);

    let unpinned = service.unpin_message(message.id, moderator.id).await?;
    assert!(!unpinned.is_pinned);

    Ok(())
}

/// Tests pinning in a channel the moderator cannot see.
///
/// Expected: Err(AppError::NotFound) for pin and unpin, and the message stays pinned
#[tokio::test]
async fn pin_in_hidden_channel_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let (moderator, _) = create_user_with_permissions(db, &["MANAGE_MESSAGES"]).await?;
    let hidden = factory::channel::ChannelFactory::new(db, author.id)
        .private(true)
        .build()
        .await?;
    let message = factory::message::MessageFactory::new(db, hidden.id, author.id)
        .pinned(true)
        .build()
        .await?;

    let service = MessageService::new(db);

    assert!(matches!(
        service.pin_message(message.id, moderator.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.unpin_message(message.id, moderator.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(service.get_message(message.id).await?.is_pinned);

    Ok(())
}
