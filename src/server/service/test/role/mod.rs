use crate::server::{
    error::AppError,
    model::{
        permission::Permission,
        role::{CreateRoleParams, UpdateRoleParams},
    },
    service::role::RoleService,
};
use test_utils::{builder::TestBuilder, factory};

mod create_role;
mod delete_role;
mod sync_discord_role;
mod update_role;
