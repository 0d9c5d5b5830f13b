//! Bookmark Route
//!
//! Single endpoint toggling a bookmark for the signed-in user. The body is
//! parsed by hand so malformed requests get the same `{error}` shape as
//! every other failure.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::models::{BookmarkAction, BookmarkRequest, BookmarkResponse};
use crate::AppState;

/// Add or remove a bookmark
///
/// Anonymous callers get `{success: true}` without any change.
#[utoipa::path(
    post,
    path = "/api/bookmark",
    request_body = BookmarkRequest,
    responses(
        (status = 200, description = "Bookmark updated", body = BookmarkResponse),
        (status = 400, description = "Missing parameters, invalid action, invalid companionId or invalid JSON body", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Bookmark"
)]
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    body: Bytes,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let request: BookmarkRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::bad_request("Invalid JSON body"))?;

    let (Some(companion_id), Some(action)) = (
        request.companion_id(),
        non_empty(request.action.as_deref()),
    ) else {
        return Err(ApiError::bad_request("Missing parameters"));
    };

    let action =
        BookmarkAction::parse(action).ok_or_else(|| ApiError::bad_request("Invalid action"))?;
    let companion_id = companion_id
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid companionId"))?;
    let path = request.path.as_deref().unwrap_or("/");

    let service = &state.companion_service;
    match action {
        BookmarkAction::Add => {
            service.add_bookmark(&ctx, companion_id, path).await?;
        }
        BookmarkAction::Remove => {
            service.remove_bookmark(&ctx, companion_id, path).await?;
        }
    }

    Ok(Json(BookmarkResponse { success: true }))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/bookmark", post(toggle_bookmark))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::super::test_support::{post_json, post_raw, TestApp};
    use crate::application::testing::FakeSession;
    use converso::DomainError;

    #[tokio::test]
    async fn test_add_and_remove() {
        let app = TestApp::new().with_session("tok", FakeSession::new("user_1"));
        let companion = app.store.seed_companion("Countsy", "maths", "Fractions", "user_2");

        let (status, body) = post_json(
            &app,
            "/api/bookmark",
            Some("tok"),
            json!({ "companionId": companion.id, "action": "add", "path": "/companions" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(app.store.bookmarks().len(), 1);

        let (status, _) = post_json(
            &app,
            "/api/bookmark",
            Some("tok"),
            json!({ "companionId": companion.id, "action": "remove" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(app.store.bookmarks().is_empty());
        assert_eq!(app.cache.paths(), vec!["/companions", "/"]);
    }

    #[tokio::test]
    async fn test_anonymous_is_a_no_op() {
        let app = TestApp::new();
        let companion = app.store.seed_companion("Countsy", "maths", "Fractions", "user_2");

        let (status, body) = post_json(
            &app,
            "/api/bookmark",
            None,
            json!({ "companionId": companion.id, "action": "add" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert!(app.store.bookmarks().is_empty());
        assert!(app.cache.paths().is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameters() {
        let app = TestApp::new().with_session("tok", FakeSession::new("user_1"));
        for payload in [
            json!({ "action": "add" }),
            json!({ "companionId": "", "action": "add" }),
            json!({ "companionId": null, "action": "add" }),
            json!({ "companionId": "abc" }),
            json!({ "companionId": "abc", "action": "" }),
        ] {
            let (status, body) = post_json(&app, "/api/bookmark", Some("tok"), payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Missing parameters" }));
        }
    }

    #[tokio::test]
    async fn test_invalid_action() {
        let app = TestApp::new().with_session("tok", FakeSession::new("user_1"));
        let (status, body) = post_json(
            &app,
            "/api/bookmark",
            Some("tok"),
            json!({ "companionId": "abc", "action": "toggle" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid action" }));
    }

    #[tokio::test]
    async fn test_invalid_companion_id() {
        let app = TestApp::new().with_session("tok", FakeSession::new("user_1"));
        let (status, body) = post_json(
            &app,
            "/api/bookmark",
            Some("tok"),
            json!({ "companionId": "not-a-uuid", "action": "add" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid companionId" }));
    }

    #[tokio::test]
    async fn test_non_string_companion_id() {
        let app = TestApp::new().with_session("tok", FakeSession::new("user_1"));
        let (status, body) = post_json(
            &app,
            "/api/bookmark",
            Some("tok"),
            json!({ "companionId": 123, "action": "add" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid companionId" }));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let app = TestApp::new();
        let (status, body) = post_raw(&app, "/api/bookmark", None, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid JSON body" }));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let app = TestApp::new().with_session("tok", FakeSession::new("user_1"));
        let companion = app.store.seed_companion("Countsy", "maths", "Fractions", "user_2");
        app.store.fail_next(DomainError::store("insert or update violates foreign key"));

        let (status, body) = post_json(
            &app,
            "/api/bookmark",
            Some("tok"),
            json!({ "companionId": companion.id, "action": "add" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
        assert!(app.cache.paths().is_empty());
    }
}
