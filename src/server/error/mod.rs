//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints. The bot layer uses
//! `AppError::user_message` to turn the same errors into Discord replies.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError},
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain rule violations (`NotFound`,
/// `Duplicate`, `Conflict`, `Capacity`) carry a client-facing message, while
/// infrastructure failures are logged and reported generically.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping. Ownership checks
    /// (event organizer, message author) and missing catalog permissions land here.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Results in 500 Internal Server Error.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Referenced entity does not exist.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation on create or rename.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Duplicate(String),

    /// Delete blocked because the entity is still referenced.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Capacity limit reached, e.g. an event that is full.
    ///
    /// Results in 422 Unprocessable Entity with the provided error message.
    #[error("{0}")]
    Capacity(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep the size of `AppError` small.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Translates a unique-constraint violation into `Duplicate`.
    ///
    /// Any other database error is passed through unchanged as `DbErr`.
    ///
    /// # Arguments
    /// - `err` - Error returned by an insert or update
    /// - `message` - Client-facing message used when the error is a uniqueness violation
    pub fn from_unique_violation(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Duplicate(message.into()),
            _ => AppError::DbErr(err),
        }
    }

    /// Message shown to a Discord user when a slash command fails.
    ///
    /// Domain errors keep their message; infrastructure failures are logged and replaced
    /// with a generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::Duplicate(msg)
            | Self::Conflict(msg)
            | Self::Capacity(msg)
            | Self::BadRequest(msg) => msg.clone(),
            Self::AuthErr(AuthError::AccessDenied(_, _)) => {
                "You don't have permission to do that.".to_string()
            }
            Self::AuthErr(AuthError::UserInactive(_)) => {
                "Your account has been deactivated.".to_string()
            }
            Self::AuthErr(_) => "You need to be registered before using this command.".to_string(),
            err => {
                tracing::error!("Command failed: {}", err);
                "Something went wrong, please try again later.".to_string()
            }
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Duplicate` and `Conflict`
/// - 422 Unprocessable Entity - For `Capacity`
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => client_error(StatusCode::NOT_FOUND, msg),
            Self::Duplicate(msg) | Self::Conflict(msg) => client_error(StatusCode::CONFLICT, msg),
            Self::Capacity(msg) => client_error(StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::BadRequest(msg) => client_error(StatusCode::BAD_REQUEST, msg),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

fn client_error(status: StatusCode, msg: String) -> Response {
    tracing::warn!("{} {}", status.as_u16(), msg);

    (status, Json(ErrorDto { error: msg })).into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
