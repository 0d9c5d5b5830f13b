//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the identity provider, the data store and the render cache.

mod client_factory;
mod companion_service;

#[cfg(test)]
pub(crate) mod testing;

pub use client_factory::ClientFactory;
pub use companion_service::{CompanionService, DEFAULT_SESSION_LIMIT};
