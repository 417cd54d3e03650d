use super::*;

/// Tests that renaming onto an existing name is rejected.
///
/// Expected: Err(AppError::Duplicate) and the original name is kept
#[tokio::test]
async fn rename_collision_is_duplicate() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    service.create_role(CreateRoleParams::new("mod", 111, [])).await?;
    let helper = service
        .create_role(CreateRoleParams::new("helper", 222, []))
        .await?;

    let result = service
        .update_role(
            helper.id,
            UpdateRoleParams {
                name: Some("mod".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));
    assert_eq!(service.get_role(helper.id).await?.name, "helper");

    Ok(())
}

/// Tests a shallow patch.
///
/// Expected: only the provided fields change
#[tokio::test]
async fn patch_overwrites_only_given_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    let role = service
        .create_role(CreateRoleParams::new("mod", 111, [Permission::KickMembers]))
        .await?;

    let updated = service
        .update_role(
            role.id,
            UpdateRoleParams {
                level: Some(5),
                color: Some("#ff0000".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "mod");
    assert_eq!(updated.level, 5);
    assert_eq!(updated.color, "#ff0000");
    assert!(updated.has_permission(Permission::KickMembers));

    Ok(())
}

/// Tests patching a missing role.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn missing_role_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RoleService::new(db)
        .update_role(404, UpdateRoleParams::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests patching a level the store cannot hold.
///
/// Expected: Err(AppError::BadRequest) and the level unchanged
#[tokio::test]
async fn rejects_level_out_of_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    let role = service.create_role(CreateRoleParams::new("mod", 111, [])).await?;

    let result = service
        .update_role(
            role.id,
            UpdateRoleParams {
                level: Some(3_000_000_000),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(service.get_role(role.id).await?.level, 0);

    Ok(())
}
