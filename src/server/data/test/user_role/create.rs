use super::*;

/// Tests that linking a user to a role twice keeps a single link.
///
/// Expected: Ok(()) both times, one link stored
#[tokio::test]
async fn create_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;

    let repo = UserRoleRepository::new(db);
    repo.create(user.id, role.id).await?;
    repo.create(user.id, role.id).await?;

    assert_eq!(repo.role_ids_for_user(user.id).await?, vec![role.id]);
    assert_eq!(repo.count_users_with_role(role.id).await?, 1);

    Ok(())
}

/// Tests removing a link.
///
/// Expected: Ok(true) for an existing link, Ok(false) afterwards
#[tokio::test]
async fn delete_reports_whether_link_existed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    factory::create_user_role(db, user.id, role.id).await?;

    let repo = UserRoleRepository::new(db);

    assert!(repo.delete(user.id, role.id).await?);
    assert!(!repo.delete(user.id, role.id).await?);
    assert!(!repo.exists(user.id, role.id).await?);

    Ok(())
}
