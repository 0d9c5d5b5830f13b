//! Auth retry wrapper
//!
//! Access tokens issued by the identity provider expire independently of the
//! user's session. When the store rejects a stale token, the wrapper signs out
//! (dropping cached credentials) and runs the whole operation again so that a
//! fresh token is fetched.

use std::future::Future;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::RetryPolicy;

/// Run `operation`, retrying token failures as described by `policy`.
///
/// `sign_out` runs between attempts only. Errors that are not token failures
/// propagate on the attempt that produced them.
pub async fn execute_with_retry<T, Op, Fut, SignOut, SignOutFut>(
    policy: &RetryPolicy,
    mut operation: Op,
    mut sign_out: SignOut,
) -> Result<T, DomainError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
    SignOut: FnMut() -> SignOutFut,
    SignOutFut: Future<Output = ()>,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if policy.is_token_error(&error) => {
                if attempt >= max_attempts {
                    tracing::warn!("Access token still rejected after {} attempts", attempt);
                    return Err(DomainError::MaxRetriesExceeded {
                        attempts: attempt,
                        last_error: error.to_string(),
                    });
                }

                tracing::warn!(
                    "Access token rejected (attempt {}/{}), signing out and retrying: {}",
                    attempt,
                    max_attempts,
                    error
                );
                sign_out().await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
