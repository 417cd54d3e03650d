use crate::server::data::user_role::UserRoleRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod sync;
