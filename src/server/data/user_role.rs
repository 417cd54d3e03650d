//! User-role link repository.
//!
//! Links are keyed by local user and role ids, so renaming a role never breaks them.

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, TransactionSession, TransactionTrait,
};
use std::collections::BTreeSet;

pub struct UserRoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> UserRoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Links a user to a role. Linking twice leaves a single row.
    ///
    /// # Returns
    /// - `Ok(())` - Link exists after the call
    /// - `Err(DbErr)` - Database error, including foreign key violations
    pub async fn create(&self, user_id: i32, role_id: i32) -> Result<(), DbErr> {
        if self.exists(user_id, role_id).await? {
            return Ok(());
        }

        entity::prelude::UserRole::insert(entity::user_role::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            role_id: ActiveValue::Set(role_id),
        })
        .exec(self.db)
        .await?;

        Ok(())
    }

    pub async fn exists(&self, user_id: i32, role_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::UserRole::find_by_id((user_id, role_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Removes a link.
    ///
    /// # Returns
    /// - `Ok(true)` - Link removed
    /// - `Ok(false)` - No such link
    pub async fn delete(&self, user_id: i32, role_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the ids of every role linked to a user.
    pub async fn role_ids_for_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::UserRole::find()
            .select_only()
            .column(entity::user_role::Column::RoleId)
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Counts the users holding a role.
    pub async fn count_users_with_role(&self, role_id: i32) -> Result<u64, DbErr> {
        entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .count(self.db)
            .await
    }

    /// Removes every link to a role.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of links removed
    pub async fn delete_by_role(&self, role_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Replaces a user's links with exactly `role_ids`.
    pub async fn sync(&self, user_id: i32, role_ids: &[i32]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        let unique: BTreeSet<i32> = role_ids.iter().copied().collect();
        if !unique.is_empty() {
            entity::prelude::UserRole::insert_many(unique.into_iter().map(|role_id| {
                entity::user_role::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    role_id: ActiveValue::Set(role_id),
                }
            }))
            .exec(&txn)
            .await?;
        }

        txn.commit().await
    }
}
