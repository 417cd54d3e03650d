//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use chrono::Duration;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Signing material and lifetime of dashboard bearer tokens.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Arc<str>,
    pub token_ttl: Duration,
}

impl JwtConfig {
    pub fn new(secret: &str, token_ttl: Duration) -> Self {
        Self {
            secret: Arc::from(secret),
            token_ttl,
        }
    }
}

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `JwtConfig` holds the secret behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Token settings used by `AuthGuard` to verify bearer tokens.
    pub jwt: JwtConfig,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `jwt` - Bearer token settings
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        Self { db, jwt }
    }
}
