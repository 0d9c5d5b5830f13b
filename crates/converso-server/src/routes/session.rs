//! Session History Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::application::DEFAULT_SESSION_LIMIT;
use crate::auth::Identity;
use crate::error::ApiError;
use crate::models::{companion_responses, CompanionResponse, SessionListParams, SessionResponse};
use crate::AppState;

/// Record a session with a companion
#[utoipa::path(
    post,
    path = "/api/companions/{id}/sessions",
    params(
        ("id" = Uuid, Path, description = "Companion ID")
    ),
    responses(
        (status = 201, description = "Session recorded", body = SessionResponse),
        (status = 403, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn add_session(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let record = state
        .companion_service
        .add_to_session_history(&ctx, id)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Companions from the most recent sessions across all users
#[utoipa::path(
    get,
    path = "/api/sessions/recent",
    params(SessionListParams),
    responses(
        (status = 200, description = "Recent session companions, newest first", body = Vec<CompanionResponse>),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn recent_sessions(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Query(params): Query<SessionListParams>,
) -> Result<Json<Vec<CompanionResponse>>, ApiError> {
    let companions = state
        .companion_service
        .get_recent_sessions(&ctx, params.limit.unwrap_or(DEFAULT_SESSION_LIMIT))
        .await?;

    Ok(Json(companion_responses(companions)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/companions/:id/sessions", post(add_session))
        .route("/api/sessions/recent", get(recent_sessions))
}
