use super::*;

/// Tests that reactions are grouped by emoji with one count per user.
///
/// Expected: two emoji groups whose counts equal their user sets
#[tokio::test]
async fn persists_reactions_grouped_by_emoji() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_message_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let fan = factory::create_user(db).await?;
    let channel = factory::create_channel(db, author.id).await?;
    let entity = factory::create_message(db, channel.id, author.id).await?;

    let repo = MessageRepository::new(db);
    let mut message = repo.find_by_id(entity.id).await?.unwrap();
    message.add_reaction("👍", author.id);
    message.add_reaction("👍", fan.id);
    message.add_reaction("🎉", fan.id);
    message.add_reaction("👍", fan.id);

    let saved = repo.save(&message).await?;

    assert_eq!(saved.reactions.len(), 2);
    assert_eq!(saved.reactions[0].emoji, "👍");
    assert_eq!(saved.reactions[0].count(), 2);
    assert_eq!(saved.reactions[1].emoji, "🎉");
    assert_eq!(saved.reactions[1].users, vec![fan.id]);

    Ok(())
}
