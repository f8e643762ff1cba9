//! Type definitions for Lumière storage.

mod ids;
mod invitations;
mod sessions;
mod users;

// Re-export all types from submodules
pub use ids::*;
pub use invitations::*;
pub use sessions::*;
pub use users::*;
