//! Factory for linking users to roles.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Links a user to a role.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Local user id
/// - `role_id` - Local role id
///
/// # Returns
/// - `Ok(entity::user_role::Model)` - Created link row
/// - `Err(DbErr)` - Database error, including duplicate or dangling references
pub async fn create_user_role(
    db: &DatabaseConnection,
    user_id: i32,
    role_id: i32,
) -> Result<entity::user_role::Model, DbErr> {
    entity::user_role::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        role_id: ActiveValue::Set(role_id),
    }
    .insert(db)
    .await
}
