//! Identity Provider Port
//!
//! Abstract interface for the external identity provider and the
//! request-scoped session it produces.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Entitlement};

/// Authenticated session for a single inbound request
#[async_trait]
pub trait IdentitySession: Send + Sync {
    /// External user id (may be empty if the provider sent no subject)
    fn user_id(&self) -> &str;

    /// Whether the identity holds a plan or feature entitlement
    fn has(&self, entitlement: &Entitlement) -> bool;

    /// Access token minted from a provider-side template.
    /// `Ok(None)` when the provider issues no token for this session.
    async fn get_token(&self, template: &str) -> Result<Option<String>, DomainError>;

    /// Drop any credentials cached for this session
    async fn sign_out(&self);
}

/// Resolves bearer credentials into sessions
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when the credentials are not a valid session
    async fn authenticate(
        &self,
        bearer: &str,
    ) -> Result<Option<Arc<dyn IdentitySession>>, DomainError>;
}

/// Explicit per-request identity, threaded into every action
#[derive(Clone, Default)]
pub struct RequestContext {
    session: Option<Arc<dyn IdentitySession>>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn authenticated(session: Arc<dyn IdentitySession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&Arc<dyn IdentitySession>> {
        self.session.as_ref()
    }

    /// Non-empty user id of the current identity
    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_deref()
            .map(|s| s.user_id())
            .filter(|id| !id.is_empty())
    }

    pub fn has(&self, entitlement: &Entitlement) -> bool {
        self.session
            .as_deref()
            .is_some_and(|s| s.has(entitlement))
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("user_id", &self.user_id())
            .finish()
    }
}
