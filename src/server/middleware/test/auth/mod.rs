use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::Duration;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
    model::permission::Permission,
    service::{auth::AuthService, user::UserService},
    state::JwtConfig,
};
use test_utils::{builder::TestBuilder, factory};


fn jwt() -> JwtConfig {
    JwtConfig::new("test-secret", Duration::hours(1))
}

/// Builds request headers carrying `Authorization: Bearer {token}`.
fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
