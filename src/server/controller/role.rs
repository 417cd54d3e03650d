use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::role::{CreateRoleDto, RoleDto, UpdateRoleDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            permission::Permission,
            role::{CreateRoleParams, UpdateRoleParams},
        },
        service::role::RoleService,
        state::AppState,
    },
};

/// List all roles.
///
/// Roles are ordered by level ascending, then name.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - List of roles
/// - `401 Unauthorized` - Missing or invalid bearer token
pub async fn get_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let roles = RoleService::new(&state.db).get_all_roles().await?;

    Ok((
        StatusCode::OK,
        Json(roles.into_iter().map(|r| r.into_dto()).collect::<Vec<RoleDto>>()),
    ))
}

/// Create a role.
///
/// # Access Control
/// - `MANAGE_ROLES`
///
/// # Returns
/// - `201 Created` - The created role
/// - `400 Bad Request` - Empty name, invalid snowflake or unknown permission
/// - `409 Conflict` - Name or Discord role already taken
pub async fn create_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    let params = CreateRoleParams::from_dto(payload)?;
    let role = RoleService::new(&state.db).create_role(params).await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

/// Get a role by id.
///
/// # Returns
/// - `200 OK` - The role
/// - `404 Not Found` - No role with that id
pub async fn get_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(role_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let role = RoleService::new(&state.db).get_role(role_id).await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Update a role.
///
/// Every field present in the body overwrites the stored value.
///
/// # Access Control
/// - `MANAGE_ROLES`
///
/// # Returns
/// - `200 OK` - The updated role
/// - `404 Not Found` - No role with that id
/// - `409 Conflict` - New name or Discord role already taken
pub async fn update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(role_id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    let patch = UpdateRoleParams::from_dto(payload)?;
    let role = RoleService::new(&state.db)
        .update_role(role_id, patch)
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Delete a role.
///
/// # Access Control
/// - `MANAGE_ROLES`
///
/// # Returns
/// - `204 No Content` - Role deleted
/// - `404 Not Found` - No role with that id
/// - `409 Conflict` - The role is still held by at least one user
pub async fn delete_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(role_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    RoleService::new(&state.db).delete_role(role_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Grant a permission to a role. Idempotent.
pub async fn add_role_permission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((role_id, permission)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    let permission: Permission = permission.parse()?;
    let role = RoleService::new(&state.db)
        .add_permission(role_id, permission)
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Revoke a permission from a role. Idempotent.
pub async fn remove_role_permission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((role_id, permission)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::ManageRoles])
        .await?;

    let permission: Permission = permission.parse()?;
    let role = RoleService::new(&state.db)
        .remove_permission(role_id, permission)
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}
