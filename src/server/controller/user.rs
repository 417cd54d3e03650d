use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::CheckDto, event::EventDto, role::RoleDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{access::can_access, permission::Permission},
        service::{event::EventService, user::UserService, user_role::UserRoleService},
        state::AppState,
    },
};

/// Get the authenticated user.
///
/// # Returns
/// - `200 OK` - The caller
/// - `401 Unauthorized` - Missing or invalid bearer token
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// List the roles held by a user, ordered by level then name.
///
/// # Returns
/// - `200 OK` - The user's roles
/// - `404 Not Found` - No user with that id
pub async fn get_user_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let roles = UserRoleService::new(&state.db)
        .get_user_roles(user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(roles.into_iter().map(|r| r.into_dto()).collect::<Vec<RoleDto>>()),
    ))
}

/// Assign a role to a user. Idempotent.
///
/// # Access Control
/// - `MANAGE_ROLES`
///
/// # Returns
/// - `204 No Content` - The user holds the role
/// - `404 Not Found` - The user or role does not exist
pub async fn assign_user_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, role_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    UserRoleService::new(&state.db)
        .assign_role_to_user(user_id, role_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a role from a user. Removing an unheld role succeeds.
///
/// # Access Control
/// - `MANAGE_ROLES`
pub async fn remove_user_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, role_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    UserRoleService::new(&state.db)
        .remove_role_from_user(user_id, role_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a user holds a permission through any of their roles.
///
/// # Returns
/// - `200 OK` - `{ "granted": bool }`
/// - `400 Bad Request` - Unknown permission name
/// - `404 Not Found` - No user with that id
pub async fn check_user_permission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, permission)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let permission: Permission = permission.parse()?;
    let granted = UserRoleService::new(&state.db)
        .has_permission(user_id, permission)
        .await?;

    Ok((StatusCode::OK, Json(CheckDto { granted })))
}

/// List the events a user organizes or joined that the caller can see.
pub async fn get_user_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let caller = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let events = EventService::new(&state.db)
        .get_user_events(user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(
            events
                .into_iter()
                .filter(|event| can_access(event, caller.id, &[]))
                .map(|event| event.into_dto())
                .collect::<Vec<EventDto>>(),
        ),
    ))
}

/// Deactivate a user. Their existing tokens stop authenticating.
///
/// # Access Control
/// - `BAN_MEMBERS`
///
/// # Returns
/// - `200 OK` - The deactivated user
/// - `404 Not Found` - No user with that id
pub async fn deactivate_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::BanMembers])
        .await?;

    let user = UserService::new(&state.db).deactivate_user(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Reactivate a user.
///
/// # Access Control
/// - `BAN_MEMBERS`
///
/// # Returns
/// - `200 OK` - The active user
/// - `404 Not Found` - No user with that id
pub async fn activate_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::BanMembers])
        .await?;

    let user = UserService::new(&state.db).activate_user(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
