use super::*;

/// Tests two consecutive edits by the author.
///
/// Expected: history holds the original and first edit, oldest first
#[tokio::test]
async fn edits_append_history_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_message_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let message = factory::message::MessageFactory::new(db, channel.id, author.id)
        .content("first")
        .build()
        .await?;

    let service = MessageService::new(db);
    service
        .update_message(message.id, "second".to_string(), author.id)
        .await?;
    let message = service
        .update_message(message.id, "third".to_string(), author.id)
        .await?;

    assert!(message.is_edited);
    assert_eq!(message.content, "third");
    let history: Vec<&str> = message
        .edit_history
        .iter()
        .map(|edit| edit.content.as_str())
        .collect();
    assert_eq!(history, vec!["first", "second"]);

    Ok(())
}

/// Tests that only the author may edit or delete.
///
/// Expected: Err(AppError::AuthErr) for another user and the message unchanged
#[tokio::test]
async fn non_author_cannot_edit_or_delete() -> Result<(), AppError> {
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

    assert!(matches!(
        service
            .update_message(message.id, "hijacked".to_string(), other.id)
            .await,
        Err(AppError::AuthErr(_))
    ));
    assert!(matches!(
        service.delete_message(message.id, other.id).await,
        Err(AppError::AuthErr(_))
    ));

    let stored = service.get_message(message.id).await?;
    assert_eq!(stored.content, message.content);
    assert!(stored.edit_history.is_empty());

    service.delete_message(message.id, author.id).await?;
    assert!(matches!(
        service.get_message(message.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
