//! HTTP handlers and their JSON shapes.

pub mod admin;
pub mod client;
pub mod health;
pub mod public;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use lumiere_storage::{Invitation, User};
use serde::{Deserialize, Serialize};

use crate::uploads::{IncomingFile, UploadError};

/// Multipart field carrying gallery images.
pub const PHOTOS_FIELD: &str = "photos";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for ClientSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub id: String,
    pub client_id: String,
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
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSummary>,
}

impl From<Invitation> for InvitationResponse {
    fn from(inv: Invitation) -> Self {
        Self {
            id: inv.id.0.to_string(),
            client_id: inv.client_id.0.to_string(),
            share_token: inv.share_token,
            event_type: inv.event_type,
            title: inv.title,
            names: inv.names,
            event_date: inv.event_date,
            event_time: inv.event_time,
            venue: inv.venue,
            location_note: inv.location_note,
            message: inv.message,
            quote: inv.quote,
            hashtag: inv.hashtag,
            dress_code: inv.dress_code,
            rsvp_label: inv.rsvp_label,
            rsvp_value: inv.rsvp_value,
            template: inv.template,
            primary_color: inv.primary_color,
            text_color: inv.text_color,
            font_style: inv.font_style,
            is_dark: inv.is_dark,
            gallery: inv.gallery,
            is_published: inv.is_published,
            views: inv.views,
            created_at: inv.created_at,
            updated_at: inv.updated_at,
            client: None,
        }
    }
}

impl InvitationResponse {
    pub fn with_client(mut self, client: Option<ClientSummary>) -> Self {
        self.client = client;
        self
    }
}

/// Admin requests may carry an owner; everything else is [`InvitationInput`].
///
/// [`InvitationInput`]: crate::authoring::InvitationInput
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInvitationRequest {
    pub client_id: Option<String>,
    #[serde(flatten)]
    pub fields: crate::authoring::InvitationInput,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Collect the `photos` parts of a multipart body. Other fields are ignored.
pub async fn read_photos(mut multipart: Multipart) -> Result<Vec<IncomingFile>, UploadError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(PHOTOS_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        files.push(IncomingFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Ok(files)
}

/// Bodies cut off by the request size limit stay 413; anything else is malformed.
fn multipart_error(e: MultipartError) -> UploadError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::BodyTooLarge(e.body_text())
    } else {
        UploadError::Multipart(e.body_text())
    }
}
