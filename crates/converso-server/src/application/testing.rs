//! In-process fakes for the identity provider, data store and render cache

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use converso::{
    Bookmark, CacheInvalidator, Companion, CompanionDraft, CompanionStore, DomainError,
    Entitlement, IdentityProvider, IdentitySession, NewBookmark, NewSessionRecord, PageRange,
    RequestContext, SessionRecord, StoreConnector, StoreFilter,
};

pub struct FakeSession {
    user_id: String,
    entitlements: Vec<Entitlement>,
    issues_token: bool,
    sign_outs: AtomicU32,
}

impl FakeSession {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            entitlements: Vec::new(),
            issues_token: true,
            sign_outs: AtomicU32::new(0),
        }
    }

    pub fn with(mut self, entitlement: Entitlement) -> Self {
        self.entitlements.push(entitlement);
        self
    }

    pub fn without_token(mut self) -> Self {
        self.issues_token = false;
        self
    }

    pub fn sign_outs(&self) -> u32 {
        self.sign_outs.load(Ordering::SeqCst)
    }

    pub fn into_context(self) -> RequestContext {
        RequestContext::authenticated(Arc::new(self))
    }
}

#[async_trait]
impl IdentitySession for FakeSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn has(&self, entitlement: &Entitlement) -> bool {
        self.entitlements.contains(entitlement)
    }

    async fn get_token(&self, _template: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .issues_token
            .then(|| format!("token-for-{}", self.user_id)))
    }

    async fn sign_out(&self) {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
    }
}

/// Maps bearer tokens to fixed sessions
#[derive(Clone, Default)]
pub struct FakeIdentityProvider {
    sessions: HashMap<String, Arc<FakeSession>>,
}

impl FakeIdentityProvider {
    pub fn with_session(mut self, bearer: &str, session: FakeSession) -> Self {
        self.sessions.insert(bearer.to_string(), Arc::new(session));
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn authenticate(
        &self,
        bearer: &str,
    ) -> Result<Option<Arc<dyn IdentitySession>>, DomainError> {
        Ok(self
            .sessions
            .get(bearer)
            .map(|session| session.clone() as Arc<dyn IdentitySession>))
    }
}

#[derive(Default)]
struct StoreState {
    companions: Vec<Companion>,
    sessions: Vec<SessionRecord>,
    bookmarks: Vec<Bookmark>,
    failures: VecDeque<DomainError>,
    calls: u32,
    ticks: i64,
}

impl StoreState {
    /// Deterministic, strictly increasing timestamps
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        epoch() + Duration::seconds(self.ticks)
    }

    fn companion(&self, id: Uuid) -> Option<Companion> {
        self.companions.iter().find(|c| c.id == id).cloned()
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Shared in-memory tables; every connected store sees the same data
#[derive(Default)]
pub struct InMemoryConnector {
    state: Arc<Mutex<StoreState>>,
    tokens: Mutex<Vec<String>>,
}

impl InMemoryConnector {
    /// Number of store operations attempted so far
    pub fn calls(&self) -> u32 {
        self.state.lock().unwrap().calls
    }

    /// Queue an error for the next store operation
    pub fn fail_next(&self, error: DomainError) {
        self.state.lock().unwrap().failures.push_back(error);
    }

    pub fn seed_companion(
        &self,
        name: &str,
        subject: &str,
        topic: &str,
        author: &str,
    ) -> Companion {
        let mut state = self.state.lock().unwrap();
        let created_at = state.now();
        let companion = Companion {
            id: Uuid::new_v4(),
            name: name.to_string(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            voice: "female".to_string(),
            style: "casual".to_string(),
            duration: 15,
            author: author.to_string(),
            created_at,
        };
        state.companions.push(companion.clone());
        companion
    }

    pub fn seed_bookmark(&self, companion_id: Uuid, user_id: &str, created_at: DateTime<Utc>) {
        self.state.lock().unwrap().bookmarks.push(Bookmark {
            id: Uuid::new_v4(),
            companion_id,
            user_id: user_id.to_string(),
            created_at,
        });
    }

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.state.lock().unwrap().bookmarks.clone()
    }

    /// Access tokens handed to `connect`, in order
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.state.lock().unwrap().sessions.clone()
    }
}

impl StoreConnector for InMemoryConnector {
    fn connect(&self, access_token: String) -> Box<dyn CompanionStore> {
        self.tokens.lock().unwrap().push(access_token);
        Box::new(InMemoryStore {
            state: self.state.clone(),
        })
    }
}

pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Count the call and surface a queued failure, if any
    fn begin(&self) -> Result<std::sync::MutexGuard<'_, StoreState>, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        match state.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

fn newest_first<T>(mut rows: Vec<(DateTime<Utc>, T)>) -> Vec<T> {
    rows.sort_by(|a, b| b.0.cmp(&a.0));
    rows.into_iter().map(|(_, row)| row).collect()
}

#[async_trait]
impl CompanionStore for InMemoryStore {
    async fn insert_companion(&self, draft: &CompanionDraft) -> Result<Companion, DomainError> {
        let mut state = self.begin()?;
        let created_at = state.now();
        let companion = Companion {
            id: Uuid::new_v4(),
            name: draft.form.name.clone(),
            subject: draft.form.subject.clone(),
            topic: draft.form.topic.clone(),
            voice: draft.form.voice.clone(),
            style: draft.form.style.clone(),
            duration: draft.form.duration,
            author: draft.author.clone(),
            created_at,
        };
        state.companions.push(companion.clone());
        Ok(companion)
    }

    async fn select_companions(
        &self,
        filters: &[StoreFilter],
        range: Option<PageRange>,
    ) -> Result<(Vec<Companion>, Option<u64>), DomainError> {
        let state = self.begin()?;
        let matching = newest_first(
            state
                .companions
                .iter()
                .filter(|c| StoreFilter::matches_all(filters, c))
                .map(|c| (c.created_at, c.clone()))
                .collect(),
        );
        let count = matching.len() as u64;

        let page = match range {
            Some(range) => matching
                .into_iter()
                .skip(range.from as usize)
                .take(range.len() as usize)
                .collect(),
            None => matching,
        };

        Ok((page, Some(count)))
    }

    async fn find_companion(&self, id: Uuid) -> Result<Option<Companion>, DomainError> {
        Ok(self.begin()?.companion(id))
    }

    async fn count_companions(&self, filters: &[StoreFilter]) -> Result<u64, DomainError> {
        let state = self.begin()?;
        Ok(state
            .companions
            .iter()
            .filter(|c| StoreFilter::matches_all(filters, c))
            .count() as u64)
    }

    async fn insert_session(
        &self,
        session: &NewSessionRecord,
    ) -> Result<SessionRecord, DomainError> {
        let mut state = self.begin()?;
        let created_at = state.now();
        let record = SessionRecord {
            id: Uuid::new_v4(),
            companion_id: session.companion_id,
            user_id: session.user_id.clone(),
            created_at,
        };
        state.sessions.push(record.clone());
        Ok(record)
    }

    async fn session_companions(
        &self,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Companion>, DomainError> {
        let state = self.begin()?;
        let rows: Vec<_> = state
            .sessions
            .iter()
            .filter(|s| user_id.map_or(true, |u| s.user_id == u))
            .filter_map(|s| state.companion(s.companion_id).map(|c| (s.created_at, c)))
            .collect();

        Ok(newest_first(rows).into_iter().take(limit as usize).collect())
    }

    async fn insert_bookmark(
        &self,
        bookmark: &NewBookmark,
    ) -> Result<Option<Bookmark>, DomainError> {
        let mut state = self.begin()?;
        let created_at = state.now();
        let row = Bookmark {
            id: Uuid::new_v4(),
            companion_id: bookmark.companion_id,
            user_id: bookmark.user_id.clone(),
            created_at,
        };
        state.bookmarks.push(row.clone());
        Ok(Some(row))
    }

    async fn delete_bookmarks(
        &self,
        companion_id: Uuid,
        user_id: &str,
    ) -> Result<u64, DomainError> {
        let mut state = self.begin()?;
        let before = state.bookmarks.len();
        state
            .bookmarks
            .retain(|b| !(b.companion_id == companion_id && b.user_id == user_id));
        Ok((before - state.bookmarks.len()) as u64)
    }

    async fn bookmarked_companions(&self, user_id: &str) -> Result<Vec<Companion>, DomainError> {
        let state = self.begin()?;
        let rows: Vec<_> = state
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter_map(|b| state.companion(b.companion_id).map(|c| (b.created_at, c)))
            .collect();

        Ok(newest_first(rows))
    }
}

#[derive(Default)]
pub struct RecordingInvalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheInvalidator for RecordingInvalidator {
    async fn revalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}
