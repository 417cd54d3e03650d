use super::*;

/// Tests resolving a token to its user.
///
/// Expected: the user the token was issued for
#[tokio::test]
async fn resolves_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(1));

    let user = factory::create_user(db).await?;
    let service = AuthService::new(db, &jwt);
    let token = service.issue_token(user.id).await?;

    let authenticated = service.authenticate(&token).await?;

    assert_eq!(authenticated.id, user.id);

    Ok(())
}

/// Tests a token whose user has since been removed.
///
/// Expected: Err(AppError::AuthErr(AuthError::UserNotInDatabase))
#[tokio::test]
async fn removed_user_is_rejected() -> Result<(), AppError> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(1));

    let user = factory::create_user(db).await?;
    let service = AuthService::new(db, &jwt);
    let token = service.issue_token(user.id).await?;

    entity::prelude::User::delete_by_id(user.id).exec(db).await?;

    let result = service.authenticate(&token).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(id))) if id == user.id
    ));

    Ok(())
}

/// Tests a token whose user has been deactivated since it was issued.
///
/// Reactivating the user makes the same token valid again.
///
/// Expected: Err(AppError::AuthErr(AuthError::UserInactive)), then the user
#[tokio::test]
async fn deactivated_user_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(1));

    let user = factory::create_user(db).await?;
    let service = AuthService::new(db, &jwt);
    let token = service.issue_token(user.id).await?;

    let users = UserService::new(db);
    users.deactivate_user(user.id).await?;

    let result = service.authenticate(&token).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive(id))) if id == user.id
    ));

    users.activate_user(user.id).await?;
    assert_eq!(service.authenticate(&token).await?.id, user.id);

    Ok(())
}
