use super::*;

/// Tests the claims carried by an issued token.
///
/// Expected: subject, Discord id and role ids of the user
#[tokio::test]
async fn token_carries_user_claims() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(1));

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    factory::create_user_role(db, user.id, role.id).await?;

    let service = AuthService::new(db, &jwt);
    let token = service.issue_token(user.id).await?;
    let claims = service.verify_token(&token)?;

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.discord_id, user.discord_id);
    assert_eq!(claims.roles, vec![role.id]);
    assert!(claims.exp > claims.iat);

    Ok(())
}

/// Tests issuing a token for an unknown user.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn unknown_user_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(1));

    let result = AuthService::new(db, &jwt).issue_token(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that a token signed with another secret is rejected.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn foreign_signature_is_invalid() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let issuer = JwtConfig::new("secret", Duration::hours(1));
    let verifier = JwtConfig::new("other-secret", Duration::hours(1));

    let user = factory::create_user(db).await?;
    let token = AuthService::new(db, &issuer).issue_token(user.id).await?;

    let result = AuthService::new(db, &verifier).verify_token(&token);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));

    Ok(())
}

/// Tests an expired token.
///
/// The TTL is negative so the token is expired beyond the default leeway.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn expired_token_is_invalid() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(-1));

    let user = factory::create_user(db).await?;
    let service = AuthService::new(db, &jwt);
    let token = service.issue_token(user.id).await?;

    assert!(matches!(
        service.verify_token(&token),
        Err(AuthError::InvalidToken(_))
    ));

    Ok(())
}

/// Tests issuing a token to a deactivated user.
///
/// Expected: Err(AppError::AuthErr(AuthError::UserInactive))
#[tokio::test]
async fn refuses_deactivated_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = JwtConfig::new("secret", Duration::hours(1));

    let user = UserFactory::new(db).active(false).build().await?;

    let result = AuthService::new(db, &jwt).issue_token(user.id).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive(_)))
    ));

    Ok(())
}
