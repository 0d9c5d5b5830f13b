//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (identity provider, data store,
//! render cache).
//!
//! Implementations of these traits live in the infrastructure layer.

mod cache;
mod identity;
mod store;

// Re-exports
pub use cache::*;
pub use identity::*;
pub use store::*;
