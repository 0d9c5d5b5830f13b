//! Clerk Identity Provider
//!
//! Verifies Clerk session tokens locally (RS256 public key) and mints
//! templated data store tokens through the Clerk Backend API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use converso::{DomainError, Entitlement, IdentityProvider, IdentitySession};

/// Claims carried by a Clerk session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClerkClaims {
    pub sub: String,
    pub sid: String,
    pub exp: usize,
    /// Active plan, e.g. `u:pro`
    #[serde(default)]
    pub pla: Option<String>,
    /// Comma separated features, e.g. `u:3_companion_limit,u:voice`
    #[serde(default)]
    pub fea: Option<String>,
}

/// Clerk Backend API access shared by every session
struct ClerkApi {
    client: Client,
    api_url: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    jwt: String,
}

impl ClerkApi {
    async fn session_token(
        &self,
        session_id: &str,
        template: &str,
    ) -> Result<Option<String>, DomainError> {
        let url = format!(
            "{}/v1/sessions/{}/tokens/{}",
            self.api_url, session_id, template
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| DomainError::TokenAcquisitionFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::TokenAcquisitionFailed(format!(
                "identity provider returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DomainError::TokenAcquisitionFailed(e.to_string()))?;

        Ok(Some(token.jwt).filter(|jwt| !jwt.is_empty()))
    }
}

/// Identity provider backed by Clerk
pub struct ClerkIdentityProvider {
    api: Arc<ClerkApi>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl ClerkIdentityProvider {
    pub fn new(
        api_url: impl Into<String>,
        secret_key: impl Into<String>,
        jwt_public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        let decoding_key = DecodingKey::from_rsa_pem(jwt_public_key_pem.as_bytes())
            .map_err(|e| DomainError::Validation(format!("Invalid Clerk JWT key: {e}")))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;
        validation.leeway = 5;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            api: Arc::new(ClerkApi {
                client,
                api_url: api_url.into(),
                secret_key: secret_key.into(),
            }),
            decoding_key,
            validation,
        })
    }
}

#[async_trait]
impl IdentityProvider for ClerkIdentityProvider {
    async fn authenticate(
        &self,
        bearer: &str,
    ) -> Result<Option<Arc<dyn IdentitySession>>, DomainError> {
        let claims = match decode::<ClerkClaims>(bearer, &self.decoding_key, &self.validation) {
            Ok(decoded) => decoded.claims,
            Err(error) => {
                match error.kind() {
                    ErrorKind::ExpiredSignature => tracing::warn!("Expired Clerk session token"),
                    _ => tracing::warn!("Rejected Clerk session token: {}", error),
                }
                return Ok(None);
            }
        };

        let session: Arc<dyn IdentitySession> =
            Arc::new(ClerkSession::from_claims(claims, self.api.clone()));
        Ok(Some(session))
    }
}

/// Request-scoped Clerk session
///
/// Minted tokens are cached per template until `sign_out`.
pub struct ClerkSession {
    user_id: String,
    session_id: String,
    plan: Option<String>,
    features: Vec<String>,
    tokens: Mutex<HashMap<String, String>>,
    api: Arc<ClerkApi>,
}

impl ClerkSession {
    fn from_claims(claims: ClerkClaims, api: Arc<ClerkApi>) -> Self {
        let features = claims
            .fea
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|f| strip_scope(f.trim()).to_string())
            .filter(|f| !f.is_empty())
            .collect();

        Self {
            user_id: claims.sub,
            session_id: claims.sid,
            plan: claims.pla.map(|p| strip_scope(p.trim()).to_string()),
            features,
            tokens: Mutex::new(HashMap::new()),
            api,
        }
    }

    fn cached_token(&self, template: &str) -> Option<String> {
        self.tokens
            .lock()
            .ok()
            .and_then(|tokens| tokens.get(template).cloned())
    }

    fn cache_token(&self, template: &str, token: &str) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(template.to_string(), token.to_string());
        }
    }
}

/// Entitlements are scoped to the user (`u:`) or organization (`o:`)
fn strip_scope(value: &str) -> &str {
    value
        .strip_prefix("u:")
        .or_else(|| value.strip_prefix("o:"))
        .unwrap_or(value)
}

#[async_trait]
impl IdentitySession for ClerkSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn has(&self, entitlement: &Entitlement) -> bool {
        match entitlement {
            Entitlement::Plan(name) => self.plan.as_deref() == Some(name.as_str()),
            Entitlement::Feature(name) => self.features.iter().any(|f| f == name),
        }
    }

    async fn get_token(&self, template: &str) -> Result<Option<String>, DomainError> {
        if let Some(token) = self.cached_token(template) {
            return Ok(Some(token));
        }

        let token = self.api.session_token(&self.session_id, template).await?;
        if let Some(token) = &token {
            self.cache_token(template, token);
        }
        Ok(token)
    }

    async fn sign_out(&self) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.clear();
        }
        tracing::debug!("Cleared cached tokens for session {}", self.session_id);
    }
}
