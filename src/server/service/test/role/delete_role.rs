use super::*;

/// Tests that a role held by a user cannot be deleted.
///
/// Expected: Err(AppError::Conflict) and the role still exists
#[tokio::test]
async fn held_role_is_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    factory::create_user_role(db, user.id, role.id).await?;

    let service = RoleService::new(db);
    let result = service.delete_role(role.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(service.get_role(role.id).await.is_ok());

    Ok(())
}

/// Tests deleting a role nobody holds.
///
/// Expected: Ok(()) and the role is gone
#[tokio::test]
async fn deletes_unheld_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;

    let service = RoleService::new(db);
    service.delete_role(role.id).await?;

    assert!(matches!(
        service.get_role(role.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
