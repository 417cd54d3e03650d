use super::*;

/// Tests finding an existing user by Discord ID.
///
/// Expected: Ok(Some(User)) with matching user data
#[tokio::test]
async fn finds_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .discord_id("123456789")
        .name("TestUser")
        .build()
        .await?;

    let user = UserRepository::new(db)
        .find_by_discord_id(123456789)
        .await?
        .unwrap();

    assert_eq!(user.id, created.id);
    assert_eq!(user.name, "TestUser");

    Ok(())
}

/// Tests querying for a non-existent user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db).find_by_discord_id(999999999).await?;

    assert!(result.is_none());

    Ok(())
}
