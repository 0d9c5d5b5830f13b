//! Bookmark - A user's saved reference to a Companion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub companion_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Bookmark row to insert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBookmark {
    pub companion_id: Uuid,
    pub user_id: String,
}
