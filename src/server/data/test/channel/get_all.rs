use super::*;

/// Tests channel listing order and category filtering.
///
/// Expected: get_all ordered by category then name; get_by_category filters by name
#[tokio::test]
async fn orders_and_filters_by_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_channel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    factory::channel::ChannelFactory::new(db, owner.id)
        .name("raids")
        .category("Games")
        .build()
        .await?;
    factory::channel::ChannelFactory::new(db, owner.id)
        .name("announcements")
        .category("Info")
        .build()
        .await?;
    factory::channel::ChannelFactory::new(db, owner.id)
        .name("chat")
        .category("Games")
        .build()
        .await?;

    let repo = ChannelRepository::new(db);
    let names: Vec<String> = repo.get_all().await?.into_iter().map(|c| c.name).collect();
    let games: Vec<String> = repo
        .get_by_category("Games")
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, vec!["chat", "raids", "announcements"]);
    assert_eq!(games, vec!["chat", "raids"]);

    Ok(())
}
