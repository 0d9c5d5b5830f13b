//! Converso Domain Library
//!
//! Core domain types and interfaces for the Converso companion service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Companion, SessionRecord, Bookmark)
//!   - `value_objects/`: Immutable value types (CompanionQuery, StoreFilter,
//!     RetryPolicy, QuotaPolicy, Entitlement)
//!   - `services/`: Auth retry wrapper, bookmark ordering
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - identity provider and request context
//!   - identity-scoped data store
//!   - render cache invalidation
//!
//! # Usage
//!
//! ```rust,ignore
//! use converso::domain::{Companion, RetryPolicy, execute_with_retry};
//! use converso::ports::{CompanionStore, RequestContext};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    dedup_companions, execute_with_retry, Bookmark, Companion, CompanionDraft, CompanionField,
    CompanionPage, CompanionQuery, CompanionQuota, DomainError, Entitlement, NewBookmark,
    NewCompanion, NewSessionRecord, PageRange, QuotaPolicy, QuotaTier, RetryPolicy,
    SessionRecord, StoreFilter,
};
pub use ports::{
    CacheInvalidator, CompanionStore, IdentityProvider, IdentitySession, RequestContext,
    StoreConnector,
};
