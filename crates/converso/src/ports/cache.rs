//! Cache Invalidation Port

use async_trait::async_trait;

/// Signals that cached renders of a path are stale
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Best effort: implementations log failures instead of returning them
    async fn revalidate(&self, path: &str);
}
