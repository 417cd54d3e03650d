use super::*;

/// Tests that saving a channel replaces both allow-lists.
///
/// Expected: the stored allow-lists equal the saved snapshot
#[tokio::test]
async fn replaces_allow_lists() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_channel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let member = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    let other_role = factory::create_role(db).await?;

    let repo = ChannelRepository::new(db);
    let mut channel = repo.create(params(owner.id, 7, "staff")).await?;
    channel.add_allowed_role(role.id);
    channel.add_allowed_user(member.id);
    repo.save(&channel).await?;

    channel.remove_allowed_role(role.id);
    channel.add_allowed_role(other_role.id);
    repo.save(&channel).await?;

    let stored = repo.find_by_id(channel.id).await?.unwrap();

    assert_eq!(stored.allowed_roles.into_iter().collect::<Vec<_>>(), vec![other_role.id]);
    assert_eq!(stored.allowed_users.into_iter().collect::<Vec<_>>(), vec![member.id]);

    Ok(())
}
