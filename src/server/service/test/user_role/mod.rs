use crate::server::{
    error::AppError, model::permission::Permission, service::user_role::UserRoleService,
};
use test_utils::{builder::TestBuilder, factory};

mod has_permission;
