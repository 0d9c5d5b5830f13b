//! Converso Data Models
//!
//! Request/response DTOs for the HTTP API.

mod bookmark;
mod companion;
mod session;

pub use bookmark::*;
pub use companion::*;
pub use session::*;
