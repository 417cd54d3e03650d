use chrono::Duration;

use crate::server::{
    error::{auth::AuthError, AppError},
    service::{auth::AuthService, user::UserService},
    state::JwtConfig,
};
use test_utils::{builder::TestBuilder, factory, factory::user::UserFactory};

mod authenticate;
mod issue_token;
