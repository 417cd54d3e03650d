use super::*;
use serenity::all::Permissions;
use test_utils::serenity::{create_test_role, create_test_role_with_permissions};

/// Tests mirroring a new Discord role.
///
/// Expected: role bound to the Discord id with permissions mapped from its bits
#[tokio::test]
async fn creates_role_from_discord_bits() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let discord_role = create_test_role_with_permissions(
        111,
        "Moderators",
        0xFF0000,
        3,
        (Permissions::KICK_MEMBERS | Permissions::MANAGE_MESSAGES).bits(),
    );

    let role = RoleService::new(db).sync_discord_role(&discord_role).await?;

    assert_eq!(role.name, "Moderators");
    assert_eq!(role.discord_role_id, 111);
    assert_eq!(role.color, "#FF0000");
    assert!(role.has_permission(Permission::KickMembers));
    assert!(role.has_permission(Permission::ManageMessages));
    assert!(!role.has_permission(Permission::BanMembers));

    Ok(())
}

/// Tests that re-syncing only refreshes the name and color.
///
/// Verifies permissions edited locally survive a Discord update.
///
/// Expected: same role id, new name, locally added permission kept
#[tokio::test]
async fn refresh_keeps_local_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    let role = service
        .sync_discord_role(&create_test_role(111, "Mods", 0, 1))
        .await?;
    service.add_permission(role.id, Permission::ViewAuditLog).await?;

    let refreshed = service
        .sync_discord_role(&create_test_role(111, "Moderators", 0x00FF00, 1))
        .await?;

    assert_eq!(refreshed.id, role.id);
    assert_eq!(refreshed.name, "Moderators");
    assert!(refreshed.has_permission(Permission::ViewAuditLog));

    Ok(())
}

/// Tests that Discord roles sharing a name get distinct local names.
///
/// Expected: second role named with its Discord id appended
#[tokio::test]
async fn disambiguates_name_collisions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    service
        .sync_discord_role(&create_test_role(111, "Raiders", 0, 1))
        .await?;
    let second = service
        .sync_discord_role(&create_test_role(222, "Raiders", 0, 2))
        .await?;

    assert_eq!(second.name, "Raiders (222)");

    Ok(())
}

/// Tests a collision where the suffixed name is also taken.
///
/// A dashboard role already uses the name the second mirror would get, so a counter
/// is appended. Syncing the same Discord role again keeps the name it was given.
///
/// Expected: "Raiders (222) 2", stable across a re-sync
#[tokio::test]
async fn suffixes_until_name_is_free() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    service
        .create_role(CreateRoleParams::new("Raiders (222)", 333, []))
        .await?;
    service
        .sync_discord_role(&create_test_role(111, "Raiders", 0, 1))
        .await?;

    let second = service
        .sync_discord_role(&create_test_role(222, "Raiders", 0, 2))
        .await?;
    assert_eq!(second.name, "Raiders (222) 2");

    let resynced = service
        .sync_discord_role(&create_test_role(222, "Raiders", 0, 2))
        .await?;
    assert_eq!(resynced.id, second.id);
    assert_eq!(resynced.name, "Raiders (222) 2");

    Ok(())
}

/// Tests removing a mirrored role that users hold.
///
/// Expected: Ok(true), role gone and the holder unlinked
#[tokio::test]
async fn remove_unlinks_holders() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let service = RoleService::new(db);
    let role = service
        .sync_discord_role(&create_test_role(111, "Raiders", 0, 1))
        .await?;
    factory::create_user_role(db, user.id, role.id).await?;

    assert!(service.remove_discord_role(111).await?);
    assert!(!service.remove_discord_role(111).await?);
    assert!(matches!(
        service.get_role(role.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
