//! Session types.

use chrono::{DateTime, Utc};

use super::{SessionId, UserId};

/// Session record. Only the SHA-256 hash of the bearer token is stored.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Parameters for creating a session
#[derive(Clone, Debug)]
pub struct CreateSessionParams {
    pub user_id: UserId,
    pub token_hash: String, // hex(sha256(bearer token))
    pub expires_at: DateTime<Utc>,
}
