use super::*;
use test_utils::factory::role::RoleFactory;

/// Tests permissions granted through an assigned role.
///
/// A moderator role with level 5 grants only KICK_MEMBERS; the level must not imply
/// anything else.
///
/// Expected: KICK_MEMBERS granted, BAN_MEMBERS denied
#[tokio::test]
async fn grants_only_role_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = RoleFactory::new(db)
        .name("mod")
        .level(5)
        .permissions(["KICK_MEMBERS"])
        .build()
        .await?;

    let service = UserRoleService::new(db);
    service.assign_role_to_user(user.id, role.id).await?;

    assert!(service.has_permission(user.id, Permission::KickMembers).await?);
    assert!(!service.has_permission(user.id, Permission::BanMembers).await?);

    Ok(())
}

/// Tests that permissions are the union over every held role.
///
/// Expected: permissions of both roles granted
#[tokio::test]
async fn unions_permissions_across_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = RoleFactory::new(db)
        .permissions(["SEND_MESSAGES"])
        .build()
        .await?;
    let second = RoleFactory::new(db)
        .permissions(["MANAGE_EVENTS"])
        .build()
        .await?;
    factory::create_user_role(db, user.id, first.id).await?;
    factory::create_user_role(db, user.id, second.id).await?;

    let service = UserRoleService::new(db);

    assert!(service.has_permission(user.id, Permission::SendMessages).await?);
    assert!(service.has_permission(user.id, Permission::ManageEvents).await?);
    assert!(!service.has_permission(user.id, Permission::ManageRoles).await?);

    Ok(())
}

/// Tests a user without roles.
///
/// Expected: every check denied
#[tokio::test]
async fn user_without_roles_has_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    assert!(!UserRoleService::new(db)
        .has_permission(user.id, Permission::ReadMessages)
        .await?);

    Ok(())
}

/// Tests assigning a role that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn assigning_missing_role_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let result = UserRoleService::new(db)
        .assign_role_to_user(user.id, 404)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that assigning twice and removing twice are harmless.
///
/// Expected: one link after two assigns; second removal reports Ok(false)
#[tokio::test]
async fn assign_and_remove_are_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;

    let service = UserRoleService::new(db);
    service.assign_role_to_user(user.id, role.id).await?;
    service.assign_role_to_user(user.id, role.id).await?;

    assert_eq!(service.get_user_roles(user.id).await?.len(), 1);
    assert!(service.remove_role_from_user(user.id, role.id).await?);
    assert!(!service.remove_role_from_user(user.id, role.id).await?);
    assert!(service.get_user_roles(user.id).await?.is_empty());

    Ok(())
}
