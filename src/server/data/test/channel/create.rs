use super::*;

/// Tests creating a channel.
///
/// Expected: Ok(Channel) with empty allow-lists and the given settings
#[tokio::test]
async fn creates_channel_with_empty_allow_lists() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_channel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;

    let mut create = params(owner.id, 42, "staff");
    create.is_private = true;
    create.settings.slow_mode = 10;

    let channel = ChannelRepository::new(db).create(create).await?;

    assert_eq!(channel.discord_channel_id, 42);
    assert!(channel.is_private);
    assert!(channel.allowed_roles.is_empty());
    assert!(channel.allowed_users.is_empty());
    assert_eq!(channel.settings.slow_mode, 10);
    assert_eq!(channel.created_by, owner.id);

    Ok(())
}

/// Tests that Discord channel IDs are unique.
///
/// Expected: Err(DbErr) for the second insert
#[tokio::test]
async fn rejects_duplicate_discord_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_channel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let repo = ChannelRepository::new(db);
    repo.create(params(owner.id, 42, "general")).await?;

    let result = repo.create(params(owner.id, 42, "general-2")).await;

    assert!(result.is_err());

    Ok(())
}
