//! Value Objects
//!
//! Immutable value types used across the domain.

mod companion_query;
mod entitlement;
mod quota_policy;
mod retry_policy;
mod store_filter;

pub use companion_query::*;
pub use entitlement::*;
pub use quota_policy::*;
pub use retry_policy::*;
pub use store_filter::*;
