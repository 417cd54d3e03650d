use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::event::{CreateEventDto, EventDto, JoinEventDto, UpdateEventDto, UpdateEventStatusDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            event::{CreateEventParams, EventStatus, ParticipantStatus, UpdateEventParams},
            permission::Permission,
        },
        service::event::{EventService, DEFAULT_UPCOMING_LIMIT},
        state::AppState,
    },
};

#[derive(Deserialize)]
pub struct UpcomingParams {
    pub limit: Option<u64>,
}

/// List upcoming events visible to the caller, soonest first.
///
/// Accepts `?limit=` (default 10). Cancelled events are excluded.
pub async fn get_upcoming_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UpcomingParams>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let events = EventService::new(&state.db)
        .get_visible_upcoming_events(caller.id, params.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT))
        .await?;

    Ok((
        StatusCode::OK,
        Json(events.into_iter().map(|e| e.into_dto()).collect::<Vec<EventDto>>()),
    ))
}

/// Create an event organized by the caller.
///
/// # Access Control
/// - `CREATE_EVENTS`
///
/// # Returns
/// - `201 Created` - The created event
/// - `400 Bad Request` - Empty name, end before start or zero capacity
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::CreateEvents])
        .await?;

    let params = CreateEventParams::from_dto(caller.id, payload)?;
    let event = EventService::new(&state.db).create_event(params).await?;

    Ok((StatusCode::CREATED, Json(event.into_dto())))
}

/// Get an event. Private events hidden from the caller are reported as not found.
pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let event = EventService::new(&state.db)
        .get_visible_event(event_id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Update an event.
///
/// # Access Control
/// - Organizer only
///
/// # Returns
/// - `200 OK` - The updated event
/// - `403 Forbidden` - The caller is not the organizer
/// - `422 Unprocessable Entity` - Capacity lowered below the participant count
pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
    Json(payload): Json<UpdateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let patch = UpdateEventParams::from_dto(payload)?;
    let event = EventService::new(&state.db)
        .update_event(event_id, patch, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Delete an event.
///
/// # Access Control
/// - Organizer only
pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    EventService::new(&state.db)
        .delete_event(event_id, caller.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Set an event's status. Any transition is accepted from the organizer.
pub async fn update_event_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
    Json(payload): Json<UpdateEventStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let status: EventStatus = payload.status.parse()?;
    let event = EventService::new(&state.db)
        .update_event_status(event_id, status, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// RSVP to an event as the caller.
///
/// The body may carry a `status` (default `attending`). Answering again replaces the
/// previous answer.
///
/// # Returns
/// - `200 OK` - The event with the caller's answer recorded
/// - `403 Forbidden` - The event is private and the caller is not on it
/// - `422 Unprocessable Entity` - The event is full
pub async fn join_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
    payload: Option<Json<JoinEventDto>>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let status = match payload.and_then(|Json(dto)| dto.status) {
        Some(status) => status.parse()?,
        None => ParticipantStatus::Attending,
    };

    let event = EventService::new(&state.db)
        .add_participant(event_id, caller.id, status, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Withdraw the caller from an event.
pub async fn leave_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let event = EventService::new(&state.db)
        .remove_participant(event_id, caller.id, caller.id)
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}
