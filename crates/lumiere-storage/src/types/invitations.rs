//! Digital invitation types.

use chrono::{DateTime, Utc};

use super::{InvitationId, UserId};

/// Invitation record
#[derive(Clone, Debug)]
pub struct Invitation {
    pub id: InvitationId,
    pub client_id: UserId,
    pub share_token: String,
    pub event_type: Option<String>,
    pub title: Option<String>,
    pub names: String,
    pub event_date: String,
    pub event_time: Option<String>,
    pub venue: Option<String>,
    pub location_note: Option<String>,
    pub message: Option<String>,
    pub quote: Option<String>,
    pub hashtag: Option<String>,
    pub dress_code: Option<String>,
    pub rsvp_label: Option<String>,
    pub rsvp_value: Option<String>,
    pub template: String, // template key, resolved at render time
    pub primary_color: String,
    pub text_color: String,
    pub font_style: String,
    pub is_dark: bool,
    pub gallery: Vec<String>, // decoded; see `decode_gallery`
    pub is_published: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating an invitation.
///
/// The share token is generated by the caller and must be unique; backends
/// report a collision as [`crate::StoreError::AlreadyExists`].
#[derive(Clone, Debug)]
pub struct CreateInvitationParams {
    pub client_id: UserId,
    pub share_token: String,
    pub event_type: Option<String>,
    pub title: Option<String>,
    pub names: String,
    pub event_date: String,
    pub event_time: Option<String>,
    pub venue: Option<String>,
    pub location_note: Option<String>,
    pub message: Option<String>,
    pub quote: Option<String>,
    pub hashtag: Option<String>,
    pub dress_code: Option<String>,
    pub rsvp_label: Option<String>,
    pub rsvp_value: Option<String>,
    pub template: String,
    pub primary_color: String,
    pub text_color: String,
    pub font_style: String,
    pub is_dark: bool,
    pub gallery: Vec<String>,
    pub is_published: bool,
}

/// Partial update. `Some` replaces the stored value, `None` leaves it alone.
#[derive(Clone, Debug, Default)]
pub struct InvitationPatch {
    pub client_id: Option<UserId>,
    pub event_type: Option<String>,
    pub title: Option<String>,
    pub names: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub venue: Option<String>,
    pub location_note: Option<String>,
    pub message: Option<String>,
    pub quote: Option<String>,
    pub hashtag: Option<String>,
    pub dress_code: Option<String>,
    pub rsvp_label: Option<String>,
    pub rsvp_value: Option<String>,
    pub template: Option<String>,
    pub primary_color: Option<String>,
    pub text_color: Option<String>,
    pub font_style: Option<String>,
    pub is_dark: Option<bool>,
    pub gallery: Option<Vec<String>>, // full replacement
    pub is_published: Option<bool>,
}

impl InvitationPatch {
    pub fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.event_type.is_none()
            && self.title.is_none()
            && self.names.is_none()
            && self.event_date.is_none()
            && self.event_time.is_none()
            && self.venue.is_none()
            && self.location_note.is_none()
            && self.message.is_none()
            && self.quote.is_none()
            && self.hashtag.is_none()
            && self.dress_code.is_none()
            && self.rsvp_label.is_none()
            && self.rsvp_value.is_none()
            && self.template.is_none()
            && self.primary_color.is_none()
            && self.text_color.is_none()
            && self.font_style.is_none()
            && self.is_dark.is_none()
            && self.gallery.is_none()
            && self.is_published.is_none()
    }
}

/// Which rows an invitation lookup or write may touch.
///
/// An `Owner` scope that does not match the stored owner behaves exactly like
/// a missing row: backends return [`crate::StoreError::NotFound`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvitationScope {
    /// Only invitations owned by this user.
    Owner(UserId),
    /// Any invitation (administrative access).
    Any,
}

impl InvitationScope {
    pub fn owner(&self) -> Option<&UserId> {
        match self {
            InvitationScope::Owner(user_id) => Some(user_id),
            InvitationScope::Any => None,
        }
    }

    /// Whether a record owned by `client_id` is visible in this scope.
    pub fn permits(&self, client_id: &UserId) -> bool {
        self.owner().map_or(true, |owner| owner == client_id)
    }
}
