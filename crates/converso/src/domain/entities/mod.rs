//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Companion: user-authored learning profile
//! - SessionRecord: a user engaging with a Companion
//! - Bookmark: a user's saved reference to a Companion

mod bookmark;
mod companion;
mod session;

pub use bookmark::*;
pub use companion::*;
pub use session::*;
