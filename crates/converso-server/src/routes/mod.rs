//! Converso API Routes
//!
//! - /api/companions - Companion listing, creation and lookup
//! - /api/companions/:id/sessions - Session history
//! - /api/sessions/recent - Recent sessions across users
//! - /api/users/:user_id/* - A user's sessions, companions and bookmarks
//! - /api/permissions/companions - Companion creation quota
//! - /api/bookmark - Bookmark add/remove

use axum::Router;

use crate::AppState;

pub mod bookmark;
pub mod companion;
pub mod session;
pub mod swagger;
pub mod user;

/// All API routes, without state
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(companion::router())
        .merge(session::router())
        .merge(user::router())
        .merge(bookmark::router())
}
