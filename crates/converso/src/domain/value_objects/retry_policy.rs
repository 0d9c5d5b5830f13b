//! RetryPolicy - When and how often to retry after an expired access token

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Substrings of store error messages that indicate a stale access token
pub const DEFAULT_TOKEN_ERROR_PATTERNS: &[&str] = &["JWT", "token"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one (at least 1)
    pub max_attempts: u32,
    /// Case-sensitive substrings matched against store error messages
    pub token_error_patterns: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            token_error_patterns: DEFAULT_TOKEN_ERROR_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, token_error_patterns: Vec<String>) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            token_error_patterns,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Only store failures are inspected; every other error kind is final
    pub fn is_token_error(&self, error: &DomainError) -> bool {
        error.store_message().is_some_and(|message| {
            self.token_error_patterns
                .iter()
                .filter(|p| !p.is_empty())
                .any(|p| message.contains(p.as_str()))
        })
    }
}
