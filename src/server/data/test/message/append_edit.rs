use super::*;

/// Tests that edit history is read back oldest first.
///
/// Expected: entries in the order they were appended
#[tokio::test]
async fn history_is_ordered_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let entity = factory::create_message(db, channel.id, author.id).await?;
    let base = Utc::now() - Duration::minutes(10);

    let repo = MessageRepository::new(db);
    for (minutes, content) in [(0, "v1"), (5, "v2")] {
        repo.append_edit(
            entity.id,
            &MessageEdit {
                content: content.to_string(),
                edited_at: base + Duration::minutes(minutes),
            },
        )
        .await?;
    }

    let message = repo.find_by_id(entity.id).await?.unwrap();
    let history: Vec<String> = message.edit_history.into_iter().map(|e| e.content).collect();

    assert_eq!(history, vec!["v1", "v2"]);

    Ok(())
}
