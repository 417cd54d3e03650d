use super::*;

/// Tests that role names are unique.
///
/// Verifies the first create succeeds and the second, with the same name but a
/// different Discord role, is rejected before touching the database.
///
/// Expected: Err(AppError::Duplicate) on the second call
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    service
        .create_role(CreateRoleParams::new("mod", 111, [Permission::KickMembers]))
        .await?;

    let result = service
        .create_role(CreateRoleParams::new("mod", 222, []))
        .await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));
    assert_eq!(service.get_all_roles().await?.len(), 1);

    Ok(())
}

/// Tests that a Discord role can only be bound once.
///
/// Expected: Err(AppError::Duplicate) for a second role bound to the same Discord role
#[tokio::test]
async fn rejects_duplicate_discord_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    service.create_role(CreateRoleParams::new("mod", 111, [])).await?;

    let result = service.create_role(CreateRoleParams::new("helper", 111, [])).await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));

    Ok(())
}

/// Tests a level the store cannot hold.
///
/// Expected: Err(AppError::BadRequest) and no role created
#[tokio::test]
async fn rejects_level_out_of_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut params = CreateRoleParams::new("mod", 111, []);
    params.level = u32::MAX;

    let service = RoleService::new(db);
    let result = service.create_role(params).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(service.get_all_roles().await?.is_empty());

    Ok(())
}
