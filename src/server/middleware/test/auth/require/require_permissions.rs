use super::*;
use test_utils::factory::helpers::create_user_with_permissions;

/// Tests a caller lacking a required permission.
///
/// Expected: Err(AuthError::AccessDenied) naming the missing permission
#[tokio::test]
async fn denies_missing_permission() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let (user, _) = create_user_with_permissions(db, &["SEND_MESSAGES"]).await?;
    let token = AuthService::new(db, &jwt).issue_token(user.id).await?;
    let headers = bearer(&token);

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, msg))) => {
            assert_eq!(user_id, user.id);
            assert!(msg.contains("MANAGE_ROLES"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Tests multiple permissions are all checked.
///
/// Verifies that permissions granted by different roles are combined.
///
/// Expected: Ok(User) when all permissions are met
#[tokio::test]
async fn requires_all_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let (user, _) = create_user_with_permissions(db, &["MANAGE_CHANNELS"]).await?;
    let events = factory::role::RoleFactory::new(db)
        .permissions(["CREATE_EVENTS"])
        .build()
        .await?;
    factory::create_user_role(db, user.id, events.id).await?;

    let token = AuthService::new(db, &jwt).issue_token(user.id).await?;
    let headers = bearer(&token);

    let returned_user = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::ManageChannels, Permission::CreateEvents])
        .await?;

    assert_eq!(returned_user.id, user.id);

    Ok(())
}

/// Tests that if any permission fails, the whole check fails.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn fails_if_any_permission_missing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let (user, _) = create_user_with_permissions(db, &["MANAGE_CHANNELS"]).await?;
    let token = AuthService::new(db, &jwt).issue_token(user.id).await?;
    let headers = bearer(&token);

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::ManageChannels, Permission::BanMembers])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
