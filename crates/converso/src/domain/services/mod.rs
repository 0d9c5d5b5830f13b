//! Domain Services
//!
//! Stateless domain logic shared by application services.

mod bookmark_order;
mod retry;

pub use bookmark_order::*;
pub use retry::*;
