//! Supabase (PostgREST) Store Implementation

mod query;
mod store;

pub use store::SupabaseConnector;
