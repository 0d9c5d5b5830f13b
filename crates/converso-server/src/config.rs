//! Server configuration
//!
//! Read from Shuttle secrets (`Secrets.toml`) through a key lookup so the
//! parsing can be exercised without a running deployment.

use std::fmt::Display;
use std::str::FromStr;

use converso::{QuotaPolicy, QuotaTier, RetryPolicy};
use thiserror::Error;

pub const DEFAULT_CLERK_API_URL: &str = "https://api.clerk.com";
pub const DEFAULT_TOKEN_TEMPLATE: &str = "supabase";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required secret: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub clerk_secret_key: String,
    /// PEM public key used to verify session tokens without a network call
    pub clerk_jwt_key: String,
    pub clerk_api_url: String,
    /// Identity provider template used to mint data store tokens
    pub token_template: String,
    pub retry: RetryPolicy,
    pub quota: QuotaPolicy,
    /// Frontend endpoint notified after bookmark changes
    pub revalidate_url: Option<String>,
    pub revalidate_secret: Option<String>,
}

impl AppConfig {
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| secrets.get(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let mut retry = RetryPolicy::default();
        if let Some(raw) = get("AUTH_MAX_RETRIES") {
            retry = retry.with_max_attempts(parse("AUTH_MAX_RETRIES", &raw)?);
        }
        if let Some(raw) = get("AUTH_RETRY_PATTERNS") {
            retry.token_error_patterns = split_list(&raw).map(str::to_string).collect();
        }

        let mut quota = QuotaPolicy::default();
        if let Some(plan) = get("COMPANION_UNLIMITED_PLAN") {
            quota.unlimited_plan = plan;
        }
        if let Some(raw) = get("COMPANION_QUOTA_TIERS") {
            quota.tiers = parse_tiers(&raw)?;
        }

        Ok(Self {
            supabase_url: require("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_anon_key: require("SUPABASE_ANON_KEY")?,
            clerk_secret_key: require("CLERK_SECRET_KEY")?,
            clerk_jwt_key: require("CLERK_JWT_KEY")?,
            clerk_api_url: get("CLERK_API_URL")
                .unwrap_or_else(|| DEFAULT_CLERK_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token_template: get("SUPABASE_TOKEN_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_TOKEN_TEMPLATE.to_string()),
            retry,
            quota,
            revalidate_url: get("REVALIDATE_URL"),
            revalidate_secret: get("REVALIDATE_SECRET"),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// `feature:limit` pairs, comma separated, e.g. `3_companion_limit:3`
fn parse_tiers(raw: &str) -> Result<Vec<QuotaTier>, ConfigError> {
    split_list(raw)
        .map(|entry| {
            let (feature, limit) =
                entry
                    .rsplit_once(':')
                    .ok_or_else(|| ConfigError::Invalid {
                        key: "COMPANION_QUOTA_TIERS",
                        message: format!("expected feature:limit, got '{entry}'"),
                    })?;
            Ok(QuotaTier::new(
                feature.trim(),
                parse("COMPANION_QUOTA_TIERS", limit.trim())?,
            ))
        })
        .collect()
}
