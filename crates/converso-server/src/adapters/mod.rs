//! Infrastructure Adapters
//!
//! Implementations of domain ports for hosted services.

pub mod clerk;
pub mod revalidate;
pub mod supabase;

// Re-exports
pub use clerk::ClerkIdentityProvider;
pub use revalidate::{HttpRevalidator, LogRevalidator};
pub use supabase::SupabaseConnector;
