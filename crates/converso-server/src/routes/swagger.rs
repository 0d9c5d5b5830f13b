//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::models::{
    // Bookmark models
    BookmarkRequest,
    BookmarkResponse,
    // Companion models
    CompanionListResponse,
    CompanionResponse,
    CreateCompanionRequest,
    PermissionsResponse,
    // Session models
    SessionResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Companion endpoints
        super::companion::list_companions,
        super::companion::create_companion,
        super::companion::get_companion,
        super::companion::companion_permissions,
        // Session endpoints
        super::session::add_session,
        super::session::recent_sessions,
        // User endpoints
        super::user::user_sessions,
        super::user::user_companions,
        super::user::user_bookmarks,
        // Bookmark endpoints
        super::bookmark::toggle_bookmark,
    ),
    info(
        title = "Converso API",
        version = "0.1.0",
        description = "Learning companions, session history and bookmarks.\n\nRequests are authorized with the caller's identity provider session token.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Companion", description = "Companion - learning-session profiles"),
        (name = "Session", description = "Session - history of companion sessions"),
        (name = "User", description = "User - a user's sessions, companions and bookmarks"),
        (name = "Bookmark", description = "Bookmark - saved companions"),
    ),
    components(
        schemas(
            ErrorResponse,
            // Companion
            CompanionResponse,
            CreateCompanionRequest,
            CompanionListResponse,
            PermissionsResponse,
            // Session
            SessionResponse,
            // Bookmark
            BookmarkRequest,
            BookmarkResponse,
        )
    ),
)]
pub struct ApiDoc;
