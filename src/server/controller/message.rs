use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::message::{MessageDto, UpdateMessageDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::message::MessageService,
        state::AppState,
    },
};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub channel_id: Option<i32>,
}

/// Search message content.
///
/// Accepts `?q=` and an optional `?channel_id=`. Matches in channels the caller cannot
/// see are left out.
///
/// # Returns
/// - `200 OK` - Up to 50 matches, newest first
/// - `400 Bad Request` - Blank query
pub async fn search_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let messages = MessageService::new(&state.db)
        .search_visible_messages(&params.q, params.channel_id, caller.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            messages
                .into_iter()
                .map(|m| m.into_dto())
                .collect::<Vec<MessageDto>>(),
        ),
    ))
}

/// Get a message.
///
/// # Returns
/// - `200 OK` - The message with its reactions and edit history
/// - `404 Not Found` - No such message, or its channel is hidden from the caller
pub async fn get_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let message = MessageService::new(&state.db)
        .get_visible_message(message_id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}

/// Edit a message's content.
///
/// # Access Control
/// - Author only
///
/// # Returns
/// - `200 OK` - The message with the previous content appended to its edit history
/// - `403 Forbidden` - The caller is not the author
pub async fn update_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
    Json(payload): Json<UpdateMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let message = MessageService::new(&state.db)
        .update_message(message_id, payload.content, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}

/// Delete a message.
///
/// # Access Control
/// - Author only
pub async fn delete_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    MessageService::new(&state.db)
        .delete_message(message_id, caller.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// React to a message with an emoji. Reacting twice with the same emoji is a no-op.
///
/// # Returns
/// - `200 OK` - The message with updated reactions
/// - `404 Not Found` - No such message, or its channel is hidden from the caller
pub async fn add_reaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((message_id, emoji)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let service = MessageService::new(&state.db);
    service.get_visible_message(message_id, caller.id).await?;

    let message = service
        .add_reaction(message_id, &emoji, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}

/// Withdraw the caller's reaction.
pub async fn remove_reaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((message_id, emoji)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let service = MessageService::new(&state.db);
    service.get_visible_message(message_id, caller.id).await?;

    let message = service
        .remove_reaction(message_id, &emoji, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}

/// Pin a message.
///
/// # Access Control
/// - `MANAGE_MESSAGES` and access to the message's channel
///
/// # Returns
/// - `200 OK` - The pinned message
/// - `403 Forbidden` - The caller lacks `MANAGE_MESSAGES`
/// - `404 Not Found` - No such message, or its channel is hidden from the caller
pub async fn pin_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let message = MessageService::new(&state.db)
        .pin_message(message_id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}

/// Unpin a message.
///
/// # Access Control
/// - `MANAGE_MESSAGES` and access to the message's channel
pub async fn unpin_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let message = MessageService::new(&state.db)
        .unpin_message(message_id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(message.into_dto())))
}
