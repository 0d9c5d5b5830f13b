//! SessionRecord - A user engaging with a Companion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only record of a started/completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub companion_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Session row to insert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSessionRecord {
    pub companion_id: Uuid,
    pub user_id: String,
}
