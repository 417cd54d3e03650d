use super::*;

/// Tests that saving a role replaces its permission set.
///
/// Expected: Ok(Role) whose permissions equal the saved snapshot
#[tokio::test]
async fn replaces_permissions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let entity = factory::role::RoleFactory::new(db)
        .permissions(["KICK_MEMBERS", "BAN_MEMBERS"])
        .build()
        .await?;

    let repo = RoleRepository::new(db);
    let mut role = repo.find_by_id(entity.id).await?.unwrap();
    role.remove_permission(Permission::BanMembers);
    role.add_permission(Permission::ViewAuditLog);

    repo.save(&role).await?;
    let saved = repo.find_by_id(entity.id).await?.unwrap();

    assert_eq!(
        saved.permissions,
        BTreeSet::from([Permission::KickMembers, Permission::ViewAuditLog])
    );

    Ok(())
}

/// Tests that renaming a role keeps its identity and user links.
///
/// Expected: same ID, new name, user still linked
#[tokio::test]
async fn rename_keeps_user_links() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let entity = factory::role::RoleFactory::new(db).name("mod").build().await?;
    factory::create_user_role(db, user.id, entity.id).await?;

    let repo = RoleRepository::new(db);
    let mut role = repo.find_by_id(entity.id).await?.unwrap();
    role.name = "moderator".to_string();
    repo.save(&role).await?;

    let renamed = repo.find_by_name("moderator").await?.unwrap();
    let links = crate::server::data::user_role::UserRoleRepository::new(db)
        .role_ids_for_user(user.id)
        .await?;

    assert_eq!(renamed.id, entity.id);
    assert_eq!(links, vec![entity.id]);
    assert!(repo.find_by_name("mod").await?.is_none());

    Ok(())
}
