//! Server unit and integration tests.
//!
//! Tests are organized into modules by feature area:
//! - `common` - Shared test helpers (in-memory app, users, requests)
//! - `authoring` - Authoring service rules under both scopes
//! - `share` - Public share-token gate and view counting
//! - `store_failures` - Backend failure mapping via `MockStore`
//! - `handlers` - HTTP endpoint tests driven through the router

pub mod common;
