//! Public access to invitations by share token.

use lumiere_storage::{Invitation, Store};
use tracing::debug;

use crate::error::ApiError;
use crate::metrics;

/// Look up a published invitation and count the view.
///
/// Unknown and unpublished tokens are the same `NotFound`, and neither is
/// counted. The increment happens in the store, in the same statement as the
/// lookup.
pub async fn open_shared(store: &dyn Store, token: &str) -> Result<Invitation, ApiError> {
    let invitation = store.view_published_invitation(token).await?;
    metrics::record_invitation_view();
    debug!(invitation = %invitation.id.0, views = invitation.views, "shared invitation viewed");
    Ok(invitation)
}
