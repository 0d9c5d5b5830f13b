//! Companion Application Service (Use Cases)
//!
//! One method per action. Each composes the client factory and the auth
//! retry wrapper with a single store query.

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use converso::{
    dedup_companions, execute_with_retry, Bookmark, CacheInvalidator, Companion, CompanionField,
    CompanionPage, CompanionQuery, CompanionQuota, CompanionStore, DomainError, NewBookmark,
    NewCompanion, NewSessionRecord, QuotaPolicy, RequestContext, RetryPolicy, SessionRecord,
    StoreConnector, StoreFilter,
};

use super::ClientFactory;

pub const DEFAULT_SESSION_LIMIT: u32 = 10;

/// Application service for companion, session and bookmark operations
pub struct CompanionService<C: StoreConnector + ?Sized, V: CacheInvalidator + ?Sized> {
    clients: ClientFactory<C>,
    invalidator: Arc<V>,
    retry: RetryPolicy,
    quota: QuotaPolicy,
}

impl<C: StoreConnector + ?Sized, V: CacheInvalidator + ?Sized> CompanionService<C, V> {
    pub fn new(
        clients: ClientFactory<C>,
        invalidator: Arc<V>,
        retry: RetryPolicy,
        quota: QuotaPolicy,
    ) -> Self {
        Self {
            clients,
            invalidator,
            retry,
            quota,
        }
    }

    /// Connect as the request's identity and run `query`, retrying
    /// expired-token failures with a fresh client.
    async fn run<T, F, Fut>(&self, ctx: &RequestContext, query: F) -> Result<T, DomainError>
    where
        F: Fn(Box<dyn CompanionStore>) -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let query = &query;
        execute_with_retry(
            &self.retry,
            move || async move {
                let store = self.clients.client(ctx).await?;
                query(store).await
            },
            move || self.clients.sign_out(ctx),
        )
        .await
    }

    /// Create a companion owned by the current identity
    pub async fn create_companion(
        &self,
        ctx: &RequestContext,
        form: NewCompanion,
    ) -> Result<Companion, DomainError> {
        let author = ctx.user_id().ok_or(DomainError::Unauthorized)?;
        let form = form.validated()?;

        if !self.new_companion_permissions(ctx).await? {
            return Err(DomainError::QuotaExceeded);
        }

        let draft = &form.authored_by(author);
        let companion = self
            .run(ctx, move |store| async move {
                store.insert_companion(draft).await
            })
            .await?;

        tracing::info!("Created companion: {} ({})", companion.name, companion.id);

        Ok(companion)
    }

    /// Page through companions, optionally searching by subject and topic
    pub async fn get_all_companions(
        &self,
        ctx: &RequestContext,
        query: &CompanionQuery,
    ) -> Result<CompanionPage, DomainError> {
        let filters = &query.filters();
        let range = query.range();

        let (companions, count) = self
            .run(ctx, move |store| async move {
                store.select_companions(filters, Some(range)).await
            })
            .await?;

        Ok(CompanionPage { companions, count })
    }

    /// Get a companion by ID. `Ok(None)` when it does not exist.
    pub async fn get_companion(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Option<Companion>, DomainError> {
        self.run(ctx, move |store| async move { store.find_companion(id).await })
            .await
    }

    /// Record that the current identity ran a session with a companion
    pub async fn add_to_session_history(
        &self,
        ctx: &RequestContext,
        companion_id: Uuid,
    ) -> Result<SessionRecord, DomainError> {
        let user_id = ctx.user_id().ok_or(DomainError::Unauthorized)?;
        let record = &NewSessionRecord {
            companion_id,
            user_id: user_id.to_string(),
        };

        self.run(ctx, move |store| async move {
            store.insert_session(record).await
        })
        .await
    }

    /// Most recent sessions across all users, newest first
    pub async fn get_recent_sessions(
        &self,
        ctx: &RequestContext,
        limit: u32,
    ) -> Result<Vec<Companion>, DomainError> {
        self.run(ctx, move |store| async move {
            store.session_companions(None, limit).await
        })
        .await
    }

    /// A user's sessions, newest first
    pub async fn get_user_sessions(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Companion>, DomainError> {
        self.run(ctx, move |store| async move {
            store.session_companions(Some(user_id), limit).await
        })
        .await
    }

    /// All companions authored by a user
    pub async fn get_user_companions(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<Vec<Companion>, DomainError> {
        let filters = &[StoreFilter::eq(CompanionField::Author, user_id)];

        let (companions, _) = self
            .run(ctx, move |store| async move {
                store.select_companions(filters, None).await
            })
            .await?;

        Ok(companions)
    }

    /// Whether the current identity may create another companion
    pub async fn new_companion_permissions(
        &self,
        ctx: &RequestContext,
    ) -> Result<bool, DomainError> {
        let user_id = ctx.user_id().ok_or(DomainError::Unauthenticated)?;

        let limit = match self.quota.resolve(|entitlement| ctx.has(entitlement)) {
            CompanionQuota::Unlimited => return Ok(true),
            CompanionQuota::Limited(0) => return Ok(false),
            CompanionQuota::Limited(limit) => limit,
        };

        let filters = &[StoreFilter::eq(CompanionField::Author, user_id)];
        let authored = self
            .run(ctx, move |store| async move {
                store.count_companions(filters).await
            })
            .await?;

        Ok(CompanionQuota::Limited(limit).allows(authored))
    }

    /// Bookmark a companion for the current identity.
    ///
    /// Without an identity this is a silent no-op (`Ok(None)`). `Ok(None)` is
    /// also returned when the store ignored an existing bookmark.
    pub async fn add_bookmark(
        &self,
        ctx: &RequestContext,
        companion_id: Uuid,
        path: &str,
    ) -> Result<Option<Bookmark>, DomainError> {
        let Some(user_id) = ctx.user_id() else {
            return Ok(None);
        };

        let bookmark = &NewBookmark {
            companion_id,
            user_id: user_id.to_string(),
        };
        let created = self
            .run(ctx, move |store| async move {
                store.insert_bookmark(bookmark).await
            })
            .await?;

        self.invalidator.revalidate(revalidation_path(path)).await;

        Ok(created)
    }

    /// Remove the current identity's bookmarks of a companion.
    ///
    /// Without an identity this is a silent no-op (`Ok(None)`); otherwise
    /// returns the number of rows removed.
    pub async fn remove_bookmark(
        &self,
        ctx: &RequestContext,
        companion_id: Uuid,
        path: &str,
    ) -> Result<Option<u64>, DomainError> {
        let Some(user_id) = ctx.user_id() else {
            return Ok(None);
        };

        let removed = self
            .run(ctx, move |store| async move {
                store.delete_bookmarks(companion_id, user_id).await
            })
            .await?;

        if removed > 0 {
            tracing::info!("Removed {} bookmark(s) of companion {}", removed, companion_id);
        }
        self.invalidator.revalidate(revalidation_path(path)).await;

        Ok(Some(removed))
    }

    /// A user's bookmarked companions, newest bookmark first, each once
    pub async fn get_bookmarked_companions(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<Vec<Companion>, DomainError> {
        let companions = self
            .run(ctx, move |store| async move {
                store.bookmarked_companions(user_id).await
            })
            .await?;

        Ok(dedup_companions(companions))
    }
}

fn revalidation_path(path: &str) -> &str {
    if path.trim().is_empty() {
        "/"
    } else {
        path
    }
}
