use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header was sent with the request.
    #[error("Request is missing a bearer token")]
    MissingToken,

    /// The bearer token failed signature, expiry or claim validation.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The token refers to a user id that no longer exists.
    #[error("User with id {0} not found in database")]
    UserNotInDatabase(i32),

    /// The token refers to a user that has been deactivated.
    #[error("User {0} is deactivated")]
    UserInactive(i32),

    /// The caller is authenticated but lacks the ownership or permission required.
    ///
    /// # Fields
    /// - Id of the user that was denied
    /// - Reason for the denial, logged server-side only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingToken` / `InvalidToken` / `UserNotInDatabase` / `UserInactive` -> 401 Unauthorized
/// - `AccessDenied` -> 403 Forbidden
///
/// Details are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingToken
            | Self::InvalidToken(_)
            | Self::UserNotInDatabase(_)
            | Self::UserInactive(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Access denied".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
