//! Companion Routes
//!
//! Listing, creation and lookup of companions plus the creation quota check.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use converso::DomainError;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::models::{
    CompanionListResponse, CompanionResponse, CreateCompanionRequest, ListCompanionsParams,
    PermissionsResponse,
};
use crate::AppState;

/// List companions, newest first
#[utoipa::path(
    get,
    path = "/api/companions",
    params(ListCompanionsParams),
    responses(
        (status = 200, description = "One page of companions", body = CompanionListResponse),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Companion"
)]
pub async fn list_companions(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Query(params): Query<ListCompanionsParams>,
) -> Result<Json<CompanionListResponse>, ApiError> {
    let page = state
        .companion_service
        .get_all_companions(&ctx, &params.into())
        .await?;

    Ok(Json(page.into()))
}

/// Create a companion owned by the caller
#[utoipa::path(
    post,
    path = "/api/companions",
    request_body = CreateCompanionRequest,
    responses(
        (status = 201, description = "Companion created", body = CompanionResponse),
        (status = 400, description = "Invalid companion", body = crate::error::ErrorResponse),
        (status = 403, description = "Not signed in or companion limit reached", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Companion"
)]
pub async fn create_companion(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Json(payload): Json<CreateCompanionRequest>,
) -> Result<(StatusCode, Json<CompanionResponse>), ApiError> {
    let companion = state
        .companion_service
        .create_companion(&ctx, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(companion.into())))
}

/// Get companion by ID
///
/// Store failures are logged and reported as not found; missing identity
/// and token failures keep their own status.
#[utoipa::path(
    get,
    path = "/api/companions/{id}",
    params(
        ("id" = Uuid, Path, description = "Companion ID")
    ),
    responses(
        (status = 200, description = "Companion found", body = CompanionResponse),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 404, description = "Companion not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Companion"
)]
pub async fn get_companion(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanionResponse>, ApiError> {
    match state.companion_service.get_companion(&ctx, id).await {
        Ok(Some(companion)) => Ok(Json(companion.into())),
        Ok(None) => Err(ApiError::NotFound("Companion not found".to_string())),
        Err(e @ DomainError::Store(_)) => {
            tracing::error!("Failed to load companion {}: {}", id, e);
            Err(ApiError::NotFound("Companion not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Whether the caller may create another companion
#[utoipa::path(
    get,
    path = "/api/permissions/companions",
    responses(
        (status = 200, description = "Permission decision", body = PermissionsResponse),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Companion"
)]
pub async fn companion_permissions(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<PermissionsResponse>, ApiError> {
    let allowed = state
        .companion_service
        .new_companion_permissions(&ctx)
        .await?;

    Ok(Json(PermissionsResponse { allowed }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/companions",
            get(list_companions).post(create_companion),
        )
        .route("/api/companions/:id", get(get_companion))
        .route("/api/permissions/companions", get(companion_permissions))
}
