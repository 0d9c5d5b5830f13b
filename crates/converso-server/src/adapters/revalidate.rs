//! Render cache revalidation
//!
//! Notifies the frontend that cached renders of a path are stale.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use converso::CacheInvalidator;

/// Shared secret header checked by the frontend revalidation route
pub const REVALIDATE_SECRET_HEADER: &str = "x-revalidate-secret";

#[derive(Serialize)]
struct RevalidateRequest<'a> {
    path: &'a str,
}

/// POSTs `{path}` to a frontend revalidation endpoint
pub struct HttpRevalidator {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl HttpRevalidator {
    pub fn new(url: impl Into<String>, secret: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            url: url.into(),
            secret,
        }
    }
}

#[async_trait]
impl CacheInvalidator for HttpRevalidator {
    async fn revalidate(&self, path: &str) {
        let mut request = self.client.post(&self.url).json(&RevalidateRequest { path });

        if let Some(secret) = &self.secret {
            request = request.header(REVALIDATE_SECRET_HEADER, secret);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!("Revalidated {}", path);
            }
            Ok(resp) => {
                tracing::warn!("Revalidation of {} returned {}", path, resp.status());
            }
            Err(e) => {
                tracing::warn!("Revalidation of {} failed: {}", path, e);
            }
        }
    }
}

/// Used when no frontend endpoint is configured
#[derive(Default)]
pub struct LogRevalidator;

#[async_trait]
impl CacheInvalidator for LogRevalidator {
    async fn revalidate(&self, path: &str) {
        tracing::info!("Path {} is stale (no revalidation endpoint configured)", path);
    }
}
