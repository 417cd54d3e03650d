use super::*;

/// Tests creating a role with permissions.
///
/// Verifies the role row and its permission rows are written together and read back
/// as a set.
///
/// Expected: Ok(Role) carrying both permissions
#[tokio::test]
async fn creates_role_with_permissions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleRepository::new(db);
    let role = repo
        .create(CreateRoleParams::new(
            "mod",
            111,
            [Permission::KickMembers, Permission::ManageMessages],
        ))
        .await?;

    let found = repo.find_by_id(role.id).await?.unwrap();

    assert_eq!(found.name, "mod");
    assert_eq!(found.discord_role_id, 111);
    assert_eq!(
        found.permissions,
        BTreeSet::from([Permission::KickMembers, Permission::ManageMessages])
    );

    Ok(())
}

/// Tests that role names are unique at the storage level.
///
/// Expected: Err(DbErr) for the second insert
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleRepository::new(db);
    repo.create(CreateRoleParams::new("mod", 111, [])).await?;

    let result = repo.create(CreateRoleParams::new("mod", 222, [])).await;

    assert!(result.is_err());
    assert_eq!(repo.count().await?, 1);

    Ok(())
}
