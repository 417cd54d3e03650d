use super::*;

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn missing_header_is_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests an Authorization header using another scheme.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn non_bearer_scheme_is_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a malformed bearer token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn garbage_token_is_invalid() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let headers = bearer("not-a-jwt");

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests empty permission list grants access.
///
/// Verifies that when no permissions are required, any user holding a valid token
/// is granted access.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let user = factory::user::UserFactory::new(db)
        .discord_id("123456789")
        .name("Member")
        .build()
        .await?;
    let token = AuthService::new(db, &jwt).issue_token(user.id).await?;
    let headers = bearer(&token);

    let returned_user = AuthGuard::new(db, &jwt, &headers).require(&[]).await?;

    assert_eq!(returned_user.id, user.id);
    assert_eq!(returned_user.discord_id, 123456789);
    assert_eq!(returned_user.name, "Member");

    Ok(())
}

/// Tests a valid token held by a deactivated user.
///
/// Expected: Err(AuthError::UserInactive)
#[tokio::test]
async fn deactivated_user_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let user = factory::create_user(db).await?;
    let token = AuthService::new(db, &jwt).issue_token(user.id).await?;
    UserService::new(db).deactivate_user(user.id).await?;
    let headers = bearer(&token);

    let result = AuthGuard::new(db, &jwt, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive(_)))
    ));

    Ok(())
}
