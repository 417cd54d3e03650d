use super::*;

/// Tests creating a user on first sight.
///
/// Expected: Ok(User) with the Discord ID and name stored
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.upsert(123456789, "Alice".to_string()).await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.name, "Alice");
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that upserting a known Discord ID refreshes the name in place.
///
/// Verifies the local ID is stable so role links and ownership survive renames.
///
/// Expected: Ok(User) with the same ID and the new name, one row total
#[tokio::test]
async fn refreshes_name_of_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo.upsert(123456789, "Alice".to_string()).await?;
    let second = repo.upsert(123456789, "Alicia".to_string()).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Alicia");
    assert_eq!(repo.count().await?, 1);

    Ok(())
}
