//! Authenticated Client Factory
//!
//! Builds a data store client authorized as the request's identity.

use std::sync::Arc;

use converso::{CompanionStore, DomainError, RequestContext, StoreConnector};

pub struct ClientFactory<C: StoreConnector + ?Sized> {
    connector: Arc<C>,
    token_template: String,
}

impl<C: StoreConnector + ?Sized> ClientFactory<C> {
    pub fn new(connector: Arc<C>, token_template: impl Into<String>) -> Self {
        Self {
            connector,
            token_template: token_template.into(),
        }
    }

    /// Fetch a templated access token and connect with it.
    /// Nothing is kept beyond the returned client.
    pub async fn client(
        &self,
        ctx: &RequestContext,
    ) -> Result<Box<dyn CompanionStore>, DomainError> {
        let session = ctx.session().ok_or(DomainError::Unauthenticated)?;
        if session.user_id().is_empty() {
            return Err(DomainError::Unauthenticated);
        }

        let token = session
            .get_token(&self.token_template)
            .await
            .map_err(|e| match e {
                DomainError::TokenAcquisitionFailed(_) => e,
                other => DomainError::TokenAcquisitionFailed(other.to_string()),
            })?
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                DomainError::TokenAcquisitionFailed(format!(
                    "no '{}' token issued for the current user",
                    self.token_template
                ))
            })?;

        Ok(self.connector.connect(token))
    }

    /// Drop credentials cached by the session so the next client gets a fresh token
    pub async fn sign_out(&self, ctx: &RequestContext) {
        if let Some(session) = ctx.session() {
            session.sign_out().await;
        }
    }
}
