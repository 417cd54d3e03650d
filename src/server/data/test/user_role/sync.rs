use super::*;

/// Tests that syncing replaces a user's links with the given set.
///
/// Verifies stale links are removed, duplicates in the input collapse and other users
/// are untouched.
///
/// Expected: user links equal the deduplicated input
#[tokio::test]
async fn replaces_links_for_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let stale = factory::create_role(db).await?;
    let kept = factory::create_role(db).await?;
    let added = factory::create_role(db).await?;
    factory::create_user_role(db, user.id, stale.id).await?;
    factory::create_user_role(db, user.id, kept.id).await?;
    factory::create_user_role(db, other.id, stale.id).await?;

    let repo = UserRoleRepository::new(db);
    repo.sync(user.id, &[kept.id, added.id, added.id]).await?;

    let mut role_ids = repo.role_ids_for_user(user.id).await?;
    role_ids.sort();
    let mut expected = vec![kept.id, added.id];
    expected.sort();

    assert_eq!(role_ids, expected);
    assert_eq!(repo.role_ids_for_user(other.id).await?, vec![stale.id]);

    Ok(())
}

/// Tests that syncing with an empty set clears every link.
///
/// Expected: no links remain
#[tokio::test]
async fn empty_sync_clears_links() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    factory::create_user_role(db, user.id, role.id).await?;

    let repo = UserRoleRepository::new(db);
    repo.sync(user.id, &[]).await?;

    assert!(repo.role_ids_for_user(user.id).await?.is_empty());

    Ok(())
}
