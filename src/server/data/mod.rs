//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories are generic over the connection so the same code runs against a
//! `DatabaseConnection` or inside a `DatabaseTransaction`. Multi-row writes (an aggregate
//! row plus its child rows) open their own transaction, which nests as a savepoint when
//! the repository is already running inside one.

pub mod channel;
pub mod event;
pub mod message;
pub mod role;
pub mod user;
pub mod user_role;

#[cfg(test)]
mod test;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue;

/// Active models carrying an `updated_at` column.
///
/// Save paths call `touch` explicitly; nothing refreshes the column implicitly.
pub trait Touch {
    fn touch(&mut self, now: DateTime<Utc>);
}

macro_rules! impl_touch {
    ($($module:ident),+ $(,)?) => {
        $(
            impl Touch for entity::$module::ActiveModel {
                fn touch(&mut self, now: DateTime<Utc>) {
                    self.updated_at = ActiveValue::Set(now);
                }
            }
        )+
    };
}

impl_touch!(user, role, channel, event, message);
