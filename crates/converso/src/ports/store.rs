//! Data Store Port
//!
//! Abstract interface for the hosted companion store. A store value is
//! scoped to one identity's access token; the connector builds it.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    errors::DomainError, Bookmark, Companion, CompanionDraft, NewBookmark, NewSessionRecord,
    PageRange, SessionRecord, StoreFilter,
};

/// Query surface of the data store, authorized as a single identity
#[async_trait]
pub trait CompanionStore: Send + Sync {
    /// Insert a companion and return the stored row
    async fn insert_companion(&self, draft: &CompanionDraft) -> Result<Companion, DomainError>;

    /// Select companions matching all `filters`, optionally limited to a range.
    /// Returns the rows and the exact match count when available.
    async fn select_companions(
        &self,
        filters: &[StoreFilter],
        range: Option<PageRange>,
    ) -> Result<(Vec<Companion>, Option<u64>), DomainError>;

    /// Find a companion by ID
    async fn find_companion(&self, id: Uuid) -> Result<Option<Companion>, DomainError>;

    /// Count companions matching all `filters`
    async fn count_companions(&self, filters: &[StoreFilter]) -> Result<u64, DomainError>;

    /// Append a session record
    async fn insert_session(
        &self,
        session: &NewSessionRecord,
    ) -> Result<SessionRecord, DomainError>;

    /// Companions joined through session history, newest session first
    async fn session_companions(
        &self,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Companion>, DomainError>;

    /// Insert a bookmark. `Ok(None)` when the store ignored a duplicate.
    async fn insert_bookmark(&self, bookmark: &NewBookmark)
        -> Result<Option<Bookmark>, DomainError>;

    /// Delete bookmarks for (companion, user); returns rows removed
    async fn delete_bookmarks(&self, companion_id: Uuid, user_id: &str)
        -> Result<u64, DomainError>;

    /// Companions joined through a user's bookmarks, newest bookmark first.
    /// May contain repeats.
    async fn bookmarked_companions(&self, user_id: &str) -> Result<Vec<Companion>, DomainError>;
}

/// Builds identity-scoped store clients
pub trait StoreConnector: Send + Sync {
    /// Client whose requests carry `access_token`
    fn connect(&self, access_token: String) -> Box<dyn CompanionStore>;
}
