use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::server::{
    error::AppError, middleware::auth::AuthGuard, service::stats::StatsService,
    state::AppState,
};

/// Dashboard overview counters. Any authenticated member may read them.
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let stats = StatsService::new(&state.db).get_stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
