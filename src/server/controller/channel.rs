use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::{
        api::CheckDto,
        channel::{ChannelDto, CreateChannelDto, UpdateChannelDto, UpdateChannelSettingsDto},
        message::MessageDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            access::can_access,
            channel::{CreateChannelParams, UpdateChannelParams, UpdateChannelSettingsParams},
            permission::Permission,
        },
        service::{
            channel::ChannelService, message::MessageService, user_role::UserRoleService,
        },
        state::AppState,
    },
};

#[derive(Deserialize)]
pub struct ChannelFilter {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u64>,
    pub before: Option<DateTime<Utc>>,
}

/// List the channels visible to the caller.
///
/// Optionally filtered by `?category=`. Private channels the caller is not allowed to
/// see are omitted.
///
/// # Returns
/// - `200 OK` - Channels ordered by category, then name
pub async fn get_channels(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<ChannelFilter>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let service = ChannelService::new(&state.db);
    let channels = match filter.category {
        Some(category) => service.get_channels_by_category(&category).await?,
        None => service.get_all_channels().await?,
    };

    let role_ids = UserRoleService::new(&state.db)
        .get_user_role_ids(caller.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            channels
                .into_iter()
                .filter(|channel| can_access(channel, caller.id, &role_ids))
                .map(|channel| channel.into_dto())
                .collect::<Vec<ChannelDto>>(),
        ),
    ))
}

/// Register a channel for tracking.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
///
/// # Returns
/// - `201 Created` - The created channel
/// - `409 Conflict` - The Discord channel is already tracked
pub async fn create_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let params = CreateChannelParams::from_dto(caller.id, payload)?;
    let channel = ChannelService::new(&state.db).create_channel(params).await?;

    Ok((StatusCode::CREATED, Json(channel.into_dto())))
}

/// Get a channel. Channels hidden from the caller are reported as not found.
pub async fn get_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let channel = ChannelService::new(&state.db)
        .get_visible_channel(channel_id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Update a channel's descriptive fields and privacy.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
pub async fn update_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
    Json(payload): Json<UpdateChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let patch = UpdateChannelParams::from_dto(payload)?;
    let channel = ChannelService::new(&state.db)
        .update_channel(channel_id, patch)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Merge new values into a channel's settings.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
pub async fn update_channel_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
    Json(payload): Json<UpdateChannelSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let patch = UpdateChannelSettingsParams::from_dto(payload)?;
    let channel = ChannelService::new(&state.db)
        .update_channel_settings(channel_id, patch)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Stop tracking a channel.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
///
/// # Returns
/// - `204 No Content` - Channel removed with its message history
/// - `404 Not Found` - No channel with that id
pub async fn delete_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    ChannelService::new(&state.db)
        .delete_channel(channel_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a role to a channel's allow-list. Idempotent.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
///
/// # Returns
/// - `200 OK` - The channel with the role allowed
/// - `404 Not Found` - The channel or role does not exist
pub async fn add_allowed_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((channel_id, role_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let channel = ChannelService::new(&state.db)
        .add_allowed_role(channel_id, role_id)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Remove a role from a channel's allow-list. Removing an absent role succeeds.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
///
/// # Returns
/// - `200 OK` - The channel without the role
/// - `404 Not Found` - The channel or role does not exist
pub async fn remove_allowed_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((channel_id, role_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let channel = ChannelService::new(&state.db)
        .remove_allowed_role(channel_id, role_id)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Add a user to a channel's allow-list. Idempotent.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
///
/// # Returns
/// - `200 OK` - The channel with the user allowed
/// - `404 Not Found` - The channel or user does not exist
pub async fn add_allowed_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((channel_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let channel = ChannelService::new(&state.db)
        .add_allowed_user(channel_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Remove a user from a channel's allow-list.
///
/// # Access Control
/// - `MANAGE_CHANNELS`
pub async fn remove_allowed_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((channel_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageChannels])
        .await?;

    let channel = ChannelService::new(&state.db)
        .remove_allowed_user(channel_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(channel.into_dto())))
}

/// Check whether the caller may see a channel.
///
/// # Returns
/// - `200 OK` - `{ "granted": bool }`
/// - `404 Not Found` - No channel with that id
pub async fn check_channel_access(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let granted = ChannelService::new(&state.db)
        .check_user_access(channel_id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(CheckDto { granted })))
}

/// Page through a channel's history, newest first.
///
/// Accepts `?limit=` (default 50) and `?before=` (RFC 3339 timestamp).
pub async fn get_channel_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    ChannelService::new(&state.db)
        .get_visible_channel(channel_id, caller.id)
        .await?;

    let messages = MessageService::new(&state.db)
        .get_channel_messages(channel_id, params.limit, params.before)
        .await?;

    Ok((
        StatusCode::OK,
        Json(messages.into_iter().map(|m| m.into_dto()).collect::<Vec<MessageDto>>()),
    ))
}

/// List a channel's pinned messages.
pub async fn get_pinned_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(channel_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    ChannelService::new(&state.db)
        .get_visible_channel(channel_id, caller.id)
        .await?;

    let messages = MessageService::new(&state.db)
        .get_pinned_messages(channel_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(messages.into_iter().map(|m| m.into_dto()).collect::<Vec<MessageDto>>()),
    ))
}
