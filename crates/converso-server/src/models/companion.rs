//! Companion DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use converso::{Companion, CompanionPage, CompanionQuery, NewCompanion};

/// Companion as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompanionResponse {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub topic: String,
    pub voice: String,
    pub style: String,
    /// Session length in minutes
    pub duration: i32,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<Companion> for CompanionResponse {
    fn from(companion: Companion) -> Self {
        Self {
            id: companion.id,
            name: companion.name,
            subject: companion.subject,
            topic: companion.topic,
            voice: companion.voice,
            style: companion.style,
            duration: companion.duration,
            author: companion.author,
            created_at: companion.created_at,
        }
    }
}

pub fn companion_responses(companions: Vec<Companion>) -> Vec<CompanionResponse> {
    companions.into_iter().map(CompanionResponse::from).collect()
}

/// Create companion request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanionRequest {
    pub name: String,
    pub subject: String,
    pub topic: String,
    pub voice: String,
    pub style: String,
    pub duration: i32,
}

impl From<CreateCompanionRequest> for NewCompanion {
    fn from(request: CreateCompanionRequest) -> Self {
        NewCompanion {
            name: request.name,
            subject: request.subject,
            topic: request.topic,
            voice: request.voice,
            style: request.style,
            duration: request.duration,
        }
    }
}

/// Companion listing parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCompanionsParams {
    /// Page size (default 10)
    pub limit: Option<u32>,
    /// 1-based page (default 1)
    pub page: Option<u32>,
    /// Substring match on subject
    pub subject: Option<String>,
    /// Substring match on topic or name
    pub topic: Option<String>,
}

impl From<ListCompanionsParams> for CompanionQuery {
    fn from(params: ListCompanionsParams) -> Self {
        let defaults = CompanionQuery::default();
        CompanionQuery {
            limit: params.limit.unwrap_or(defaults.limit),
            page: params.page.unwrap_or(defaults.page),
            subject: params.subject,
            topic: params.topic,
        }
    }
}

/// One page of companions
#[derive(Debug, Serialize, ToSchema)]
pub struct CompanionListResponse {
    pub companions: Vec<CompanionResponse>,
    /// Total matching rows, when the store reported it
    pub count: Option<u64>,
}

impl From<CompanionPage> for CompanionListResponse {
    fn from(page: CompanionPage) -> Self {
        Self {
            companions: companion_responses(page.companions),
            count: page.count,
        }
    }
}

/// Whether the caller may create another companion
#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionsResponse {
    pub allowed: bool,
}
