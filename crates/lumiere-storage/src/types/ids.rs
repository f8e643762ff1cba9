//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use uuid::Uuid;

/// User identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

/// Invitation identifier (internal, never used as a public key).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvitationId(pub Uuid);

/// Session identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);
