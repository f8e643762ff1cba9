//! Storage abstraction for Lumière.
//!
//! Backend crates (e.g., lumiere-store-sqlite) implement [`Store`] so the server
//! doesn't depend on any specific database engine or schema details.

mod gallery;
mod store;
mod types;

pub use gallery::{decode_gallery, encode_gallery, GalleryDecode};
pub use store::Store;
#[cfg(feature = "test-support")]
pub use store::MockStore;
pub use types::*;

use thiserror::Error;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
