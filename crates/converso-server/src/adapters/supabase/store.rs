//! Supabase implementation of CompanionStore
//!
//! Every request carries the project's anon key and the caller's access
//! token, so row-level security runs as the signed-in user.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use converso::{
    Bookmark, Companion, CompanionDraft, CompanionStore, DomainError, NewBookmark,
    NewSessionRecord, PageRange, SessionRecord, StoreConnector, StoreFilter,
};

use super::query::{parse_content_range, render_filters};

const COMPANIONS: &str = "companions";
const SESSION_HISTORY: &str = "session_history";
const BOOKMARKS: &str = "bookmarks";

/// Embeds the referenced companion in session/bookmark rows
const JOINED_COMPANION: &str = "companions:companion_id(*)";

/// Builds Supabase clients scoped to an access token
#[derive(Clone)]
pub struct SupabaseConnector {
    client: Client,
    rest_url: String,
    anon_key: String,
}

impl SupabaseConnector {
    pub fn new(supabase_url: &str, anon_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.into(),
        }
    }

    pub fn store(&self, access_token: String) -> SupabaseStore {
        SupabaseStore {
            client: self.client.clone(),
            rest_url: self.rest_url.clone(),
            anon_key: self.anon_key.clone(),
            access_token,
        }
    }
}

impl StoreConnector for SupabaseConnector {
    fn connect(&self, access_token: String) -> Box<dyn CompanionStore> {
        Box::new(self.store(access_token))
    }
}

/// PostgREST client authorized as one identity
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    anon_key: String,
    access_token: String,
}

/// Row shape of `select=companions:companion_id(*)`
#[derive(Deserialize)]
struct CompanionJoin {
    companions: Option<Companion>,
}

/// PostgREST error body
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl SupabaseStore {
    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
    }

    async fn send<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<(T, HeaderMap), DomainError> {
        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;

        if !status.is_success() {
            return Err(store_error(status, &body));
        }

        let value = serde_json::from_str(&body)
            .map_err(|e| DomainError::store(format!("Unexpected response from store: {e}")))?;

        Ok((value, headers))
    }

    async fn insert_one<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, DomainError> {
        let builder = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(row);

        let (rows, _) = Self::send::<Vec<T>>(builder).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DomainError::store(format!("Insert into {table} returned no rows")))
    }

    async fn joined_companions(
        &self,
        table: &str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<Companion>, DomainError> {
        let builder = self
            .request(Method::GET, table)
            .query(&[("select", JOINED_COMPANION), ("order", "created_at.desc")])
            .query(&params);

        let (rows, _) = Self::send::<Vec<CompanionJoin>>(builder).await?;
        Ok(rows.into_iter().filter_map(|row| row.companions).collect())
    }
}

/// Map a failed response to a store error carrying the store's message
fn store_error(status: StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{status}: {}", body.trim())
            }
        });

    DomainError::Store(message)
}

#[async_trait]
impl CompanionStore for SupabaseStore {
    async fn insert_companion(&self, draft: &CompanionDraft) -> Result<Companion, DomainError> {
        self.insert_one(COMPANIONS, draft).await
    }

    async fn select_companions(
        &self,
        filters: &[StoreFilter],
        range: Option<PageRange>,
    ) -> Result<(Vec<Companion>, Option<u64>), DomainError> {
        let mut builder = self
            .request(Method::GET, COMPANIONS)
            .header("Prefer", "count=exact")
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .query(&render_filters(filters));

        if let Some(range) = range {
            builder = builder.query(&[("offset", range.from), ("limit", range.len())]);
        }

        let (companions, headers) = Self::send::<Vec<Companion>>(builder).await?;
        let count = headers
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        Ok((companions, count))
    }

    async fn find_companion(&self, id: Uuid) -> Result<Option<Companion>, DomainError> {
        let builder = self
            .request(Method::GET, COMPANIONS)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))]);

        let (rows, _) = Self::send::<Vec<Companion>>(builder).await?;
        Ok(rows.into_iter().next())
    }

    async fn count_companions(&self, filters: &[StoreFilter]) -> Result<u64, DomainError> {
        let builder = self
            .request(Method::GET, COMPANIONS)
            .header("Prefer", "count=exact")
            .query(&[("select", "id"), ("limit", "1")])
            .query(&render_filters(filters));

        let (_, headers) = Self::send::<Vec<serde_json::Value>>(builder).await?;
        headers
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| DomainError::store("Store did not report a companion count"))
    }

    async fn insert_session(
        &self,
        session: &NewSessionRecord,
    ) -> Result<SessionRecord, DomainError> {
        self.insert_one(SESSION_HISTORY, session).await
    }

    async fn session_companions(
        &self,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Companion>, DomainError> {
        let mut params = vec![("limit".to_string(), limit.to_string())];
        if let Some(user_id) = user_id {
            params.push(("user_id".to_string(), format!("eq.{user_id}")));
        }

        self.joined_companions(SESSION_HISTORY, params).await
    }

    async fn insert_bookmark(
        &self,
        bookmark: &NewBookmark,
    ) -> Result<Option<Bookmark>, DomainError> {
        let builder = self
            .request(Method::POST, BOOKMARKS)
            .query(&[("on_conflict", "companion_id,user_id")])
            .header(
                "Prefer",
                "return=representation,resolution=ignore-duplicates",
            )
            .json(bookmark);

        let (rows, _) = Self::send::<Vec<Bookmark>>(builder).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_bookmarks(
        &self,
        companion_id: Uuid,
        user_id: &str,
    ) -> Result<u64, DomainError> {
        let builder = self
            .request(Method::DELETE, BOOKMARKS)
            .header("Prefer", "return=representation")
            .query(&[
                ("companion_id", format!("eq.{companion_id}")),
                ("user_id", format!("eq.{user_id}")),
            ]);

        let (rows, _) = Self::send::<Vec<serde_json::Value>>(builder).await?;
        Ok(rows.len() as u64)
    }

    async fn bookmarked_companions(&self, user_id: &str) -> Result<Vec<Companion>, DomainError> {
        self.joined_companions(
            BOOKMARKS,
            vec![("user_id".to_string(), format!("eq.{user_id}"))],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_uses_message() {
        let error = store_error(
            StatusCode::UNAUTHORIZED,
            r#"{"code":"PGRST301","details":null,"hint":null,"message":"JWT expired"}"#,
        );
        assert_eq!(error, DomainError::Store("JWT expired".to_string()));
    }

    #[test]
    fn test_store_error_falls_back_to_status() {
        let error = store_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(error, DomainError::Store("502 Bad Gateway".to_string()));

        let error = store_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            error,
            DomainError::Store("502 Bad Gateway: upstream down".to_string())
        );
    }

    #[test]
    fn test_connector_scopes_token() {
        let connector = SupabaseConnector::new("https://demo.supabase.co/", "anon");
        let store = connector.store("user.jwt".to_string());
        assert_eq!(store.rest_url, "https://demo.supabase.co/rest/v1");
        assert_eq!(store.access_token, "user.jwt");
    }

    #[test]
    fn test_join_row_without_companion() {
        let rows: Vec<CompanionJoin> =
            serde_json::from_str(r#"[{"companions":null}]"#).unwrap();
        assert!(rows[0].companions.is_none());
    }
}
