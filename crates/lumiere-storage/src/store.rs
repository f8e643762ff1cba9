//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the server depends on.
///
/// Invitation methods that take an [`InvitationScope`] apply the scope inside
/// the same statement as the read or write, so "not yours" and "not there"
/// are the same [`StoreError::NotFound`].
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    /// Create a new user. Duplicate emails map to `AlreadyExists`.
    async fn create_user(&self, params: &CreateUserParams) -> Result<User, StoreError>;

    /// Get user by ID.
    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError>;

    /// Get user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// List all users, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    // ───────────────────────────────────── Sessions ───────────────────────────────────────

    /// Store a new session for a user.
    async fn create_session(&self, params: &CreateSessionParams) -> Result<Session, StoreError>;

    /// Resolve an unexpired session's user by token hash.
    async fn get_session_user(&self, token_hash: &str) -> Result<User, StoreError>;

    // ───────────────────────────────────── Invitations ────────────────────────────────────

    /// Create an invitation. A share-token collision maps to `AlreadyExists`.
    async fn create_invitation(
        &self,
        params: &CreateInvitationParams,
    ) -> Result<Invitation, StoreError>;

    /// Get an invitation by ID within a scope.
    async fn get_invitation(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
    ) -> Result<Invitation, StoreError>;

    /// List all invitations owned by a user, newest first.
    async fn list_client_invitations(
        &self,
        client_id: &UserId,
    ) -> Result<Vec<Invitation>, StoreError>;

    /// List a page of all invitations, newest first.
    async fn list_invitations(&self, limit: u32, offset: u32)
        -> Result<Vec<Invitation>, StoreError>;

    /// Count all invitations.
    async fn count_invitations(&self) -> Result<u64, StoreError>;

    /// Apply a partial update and return the updated row.
    async fn update_invitation(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
        patch: &InvitationPatch,
    ) -> Result<Invitation, StoreError>;

    /// Flip `is_published` and return the updated row.
    async fn toggle_invitation_published(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
    ) -> Result<Invitation, StoreError>;

    /// Append locations to the end of the gallery in one transaction.
    async fn append_invitation_gallery(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
        locations: &[String],
    ) -> Result<Invitation, StoreError>;

    /// Permanently delete an invitation.
    async fn delete_invitation(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
    ) -> Result<(), StoreError>;

    /// Public read by share token.
    ///
    /// Succeeds only for published rows, incrementing `views` by one in the
    /// same statement. Missing and unpublished tokens are both `NotFound` and
    /// leave the counter untouched.
    async fn view_published_invitation(&self, share_token: &str)
        -> Result<Invitation, StoreError>;
}
