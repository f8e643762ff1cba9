//! Unauthenticated endpoints.

use axum::extract::{Path, State};
use lumiere_storage::Invitation;
use lumiere_templates::{
    demo_invitation, placeholder_count, resolve_theme, rsvp_href, share_url, whatsapp_share_url,
    PageStyle, StyleOverrides, Template, TemplateInfo, DEMO_TOKEN,
};
use serde::Serialize;

use super::InvitationResponse;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::server::LumiereServer;
use crate::share::open_shared;

/// What the public page needs to render beyond the record itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub style: PageStyle,
    pub placeholders: usize,
    pub rsvp_href: Option<String>,
    pub share_url: String,
    pub whatsapp_share_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedInvitationResponse {
    #[serde(flatten)]
    pub invitation: InvitationResponse,
    pub presentation: Presentation,
}

impl Presentation {
    fn for_invitation(invitation: &Invitation, public_url: &str) -> Self {
        let style = PageStyle::compose(
            resolve_theme(&invitation.template),
            StyleOverrides {
                primary_color: Some(&invitation.primary_color),
                text_color: Some(&invitation.text_color),
                font_style: Some(&invitation.font_style),
                is_dark: Some(invitation.is_dark),
            },
        );
        let link = share_url(public_url, &invitation.share_token);
        Self {
            style,
            placeholders: placeholder_count(&invitation.gallery),
            rsvp_href: invitation
                .rsvp_value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(rsvp_href),
            whatsapp_share_url: whatsapp_share_url(&link),
            share_url: link,
        }
    }
}

pub async fn list_templates() -> ApiResponse<Vec<TemplateInfo>> {
    ApiResponse::ok(Template::ALL.iter().map(|t| t.info()).collect())
}

/// Public read by share token. The demo token never touches the store.
pub async fn get_shared_invitation(
    State(server): State<LumiereServer>,
    Path(token): Path<String>,
) -> Result<ApiResponse<SharedInvitationResponse>, ApiError> {
    let invitation = if token == DEMO_TOKEN {
        demo_invitation()
    } else {
        open_shared(server.store.as_ref(), &token).await?
    };

    let presentation = Presentation::for_invitation(&invitation, &server.config.public_url);
    Ok(ApiResponse::ok(SharedInvitationResponse {
        invitation: invitation.into(),
        presentation,
    }))
}
