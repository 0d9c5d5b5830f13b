//! Session history DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use converso::SessionRecord;

/// Recorded session
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub companion_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<SessionRecord> for SessionResponse {
    fn from(record: SessionRecord) -> Self {
        Self {
            id: record.id,
            companion_id: record.companion_id,
            user_id: record.user_id,
            created_at: record.created_at,
        }
    }
}

/// Session listing parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionListParams {
    /// Maximum number of sessions (default 10)
    pub limit: Option<u32>,
}
