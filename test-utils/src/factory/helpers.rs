//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Provides monotonically increasing values for generating unique names and
/// Discord snowflakes across all factories.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user holding a freshly created role with the given permissions.
///
/// # Arguments
/// - `db` - Database connection
/// - `permissions` - Permission names granted by the role (e.g. `"MANAGE_ROLES"`)
///
/// # Returns
/// - `Ok((user, role))` - The created user and role
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_with_permissions(
    db: &DatabaseConnection,
    permissions: &[&str],
) -> Result<(entity::user::Model, entity::role::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let role = crate::factory::role::RoleFactory::new(db)
        .permissions(permissions.iter().copied())
        .build()
        .await?;
    crate::factory::user_role::create_user_role(db, user.id, role.id).await?;

    Ok((user, role))
}
