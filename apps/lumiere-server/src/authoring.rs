//! Invitation authoring under the self-service and administrative scopes.

use lumiere_storage::{
    CreateInvitationParams, Invitation, InvitationId, InvitationPatch, InvitationScope, Store,
    StoreError, User, UserId,
};
use rand_core::{OsRng, RngCore};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::uploads::{IncomingFile, UploadStore};

pub const DEFAULT_TEMPLATE: &str = "elegante";
pub const DEFAULT_PRIMARY_COLOR: &str = "#1a2744";
pub const DEFAULT_TEXT_COLOR: &str = "#F5F0E8";
pub const DEFAULT_FONT_STYLE: &str = "serif";

const SHARE_TOKEN_ATTEMPTS: usize = 3;

/// Who is authoring and which records they may touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthoringScope {
    /// The caller, acting on invitations they own.
    SelfService(UserId),
    /// An administrator, acting on any invitation.
    Admin,
}

impl AuthoringScope {
    fn store_scope(&self) -> InvitationScope {
        match self {
            AuthoringScope::SelfService(user_id) => InvitationScope::Owner(user_id.clone()),
            AuthoringScope::Admin => InvitationScope::Any,
        }
    }
}

/// Invitation fields as sent by the editor. Absent fields are `None`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationInput {
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
    pub gallery: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Admin list paging. `page` starts at 1, `limit` is capped at 50.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Paging {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 50;

    /// Lenient parse of raw query values; junk falls back to the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|v| v.trim().parse::<i64>().ok());
        let page = parse(page)
            .filter(|p| *p >= 1)
            .map_or(1, |p| p.min(i64::from(u32::MAX)) as u32);
        let limit = parse(limit)
            .filter(|l| *l >= 1)
            .map_or(Self::DEFAULT_LIMIT, |l| l.min(i64::from(Self::MAX_LIMIT)) as u32);
        Self { page, limit }
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

pub struct Authoring<'a> {
    store: &'a dyn Store,
}

impl<'a> Authoring<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Create an invitation.
    ///
    /// Self-service binds the owner to the caller and ignores `client_id`.
    /// Admin creation requires `client_id` to name an existing user.
    pub async fn create(
        &self,
        scope: &AuthoringScope,
        input: InvitationInput,
        client_id: Option<&str>,
    ) -> Result<Invitation, ApiError> {
        let mut errors = Vec::new();
        if let AuthoringScope::SelfService(_) = scope {
            require(&mut errors, "eventType", input.event_type.as_deref());
            require(&mut errors, "title", input.title.as_deref());
        }
        require(&mut errors, "names", input.names.as_deref());
        require(&mut errors, "eventDate", input.event_date.as_deref());

        let owner = match scope {
            AuthoringScope::SelfService(user_id) => Some(user_id.clone()),
            AuthoringScope::Admin => match client_id.map(str::trim).filter(|c| !c.is_empty()) {
                None => {
                    errors.push("clientId is required".to_string());
                    None
                }
                Some(raw) => match self.resolve_owner(raw).await {
                    Ok(user) => Some(user.id),
                    Err(ApiError::Validation(mut e)) => {
                        errors.append(&mut e);
                        None
                    }
                    Err(e) => return Err(e),
                },
            },
        };

        let owner = match owner {
            Some(owner) if errors.is_empty() => owner,
            _ => return Err(ApiError::Validation(errors)),
        };

        let mut params = CreateInvitationParams {
            client_id: owner,
            share_token: String::new(),
            event_type: input.event_type,
            title: input.title,
            names: input.names.unwrap_or_default(),
            event_date: input.event_date.unwrap_or_default(),
            event_time: input.event_time,
            venue: input.venue,
            location_note: input.location_note,
            message: input.message,
            quote: input.quote,
            hashtag: input.hashtag,
            dress_code: input.dress_code,
            rsvp_label: input.rsvp_label,
            rsvp_value: input.rsvp_value,
            template: or_default(input.template, DEFAULT_TEMPLATE),
            primary_color: or_default(input.primary_color, DEFAULT_PRIMARY_COLOR),
            text_color: or_default(input.text_color, DEFAULT_TEXT_COLOR),
            font_style: or_default(input.font_style, DEFAULT_FONT_STYLE),
            is_dark: input.is_dark.unwrap_or(true),
            gallery: input.gallery.unwrap_or_default(),
            is_published: input.is_published.unwrap_or(true),
        };

        for attempt in 1..=SHARE_TOKEN_ATTEMPTS {
            params.share_token = new_share_token();
            match self.store.create_invitation(&params).await {
                Ok(invitation) => {
                    info!(
                        invitation = %invitation.id.0,
                        owner = %invitation.client_id.0,
                        "created invitation"
                    );
                    return Ok(invitation);
                }
                Err(StoreError::AlreadyExists) => {
                    warn!(attempt, "share token collision, regenerating");
                }
                Err(StoreError::NotFound) => {
                    return Err(ApiError::validation(
                        "clientId does not match an existing user",
                    ))
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(ApiError::Internal(
            "could not allocate a unique share token".to_string(),
        ))
    }

    pub async fn get(&self, scope: &AuthoringScope, id: &str) -> Result<Invitation, ApiError> {
        let id = parse_invitation_id(id)?;
        Ok(self.store.get_invitation(&id, &scope.store_scope()).await?)
    }

    /// Everything the user owns, newest first.
    pub async fn list_owned(&self, owner: &UserId) -> Result<Vec<Invitation>, ApiError> {
        Ok(self.store.list_client_invitations(owner).await?)
    }

    /// One page of all invitations, newest first, plus the total count.
    pub async fn list_page(&self, paging: Paging) -> Result<(Vec<Invitation>, u64), ApiError> {
        let items = self
            .store
            .list_invitations(paging.limit, paging.offset())
            .await?;
        let total = self.store.count_invitations().await?;
        Ok((items, total))
    }

    /// Partial update. `client_id` is only honoured in the admin scope.
    pub async fn update(
        &self,
        scope: &AuthoringScope,
        id: &str,
        input: InvitationInput,
        client_id: Option<&str>,
    ) -> Result<Invitation, ApiError> {
        let id = parse_invitation_id(id)?;
        let store_scope = scope.store_scope();

        let mut errors = Vec::new();
        if input.names.is_some() {
            require(&mut errors, "names", input.names.as_deref());
        }
        if input.event_date.is_some() {
            require(&mut errors, "eventDate", input.event_date.as_deref());
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let new_owner = match (scope, client_id) {
            (AuthoringScope::Admin, Some(raw)) => Some(self.resolve_owner(raw.trim()).await?.id),
            _ => None,
        };

        let patch = InvitationPatch {
            client_id: new_owner,
            event_type: input.event_type,
            title: input.title,
            names: input.names,
            event_date: input.event_date,
            event_time: input.event_time,
            venue: input.venue,
            location_note: input.location_note,
            message: input.message,
            quote: input.quote,
            hashtag: input.hashtag,
            dress_code: input.dress_code,
            rsvp_label: input.rsvp_label,
            rsvp_value: input.rsvp_value,
            template: input.template,
            primary_color: input.primary_color,
            text_color: input.text_color,
            font_style: input.font_style,
            is_dark: input.is_dark,
            gallery: input.gallery,
            is_published: input.is_published,
        };

        if patch.is_empty() {
            return Ok(self.store.get_invitation(&id, &store_scope).await?);
        }

        match self.store.update_invitation(&id, &store_scope, &patch).await {
            Ok(invitation) => Ok(invitation),
            Err(StoreError::Conflict) => Err(ApiError::validation(
                "clientId does not match an existing user",
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn toggle_published(
        &self,
        scope: &AuthoringScope,
        id: &str,
    ) -> Result<Invitation, ApiError> {
        let id = parse_invitation_id(id)?;
        let invitation = self
            .store
            .toggle_invitation_published(&id, &scope.store_scope())
            .await?;
        info!(
            invitation = %invitation.id.0,
            published = invitation.is_published,
            "toggled invitation"
        );
        Ok(invitation)
    }

    /// Store a batch of images and append them to the gallery.
    ///
    /// Either every file ends up in the gallery or none does.
    pub async fn add_photos(
        &self,
        scope: &AuthoringScope,
        id: &str,
        uploads: &dyn UploadStore,
        files: &[IncomingFile],
    ) -> Result<Invitation, ApiError> {
        let id = parse_invitation_id(id)?;
        let store_scope = scope.store_scope();

        // Resolve first so a foreign or missing id never writes files.
        let current = self.store.get_invitation(&id, &store_scope).await?;
        if files.is_empty() {
            return Ok(current);
        }

        let locations = uploads.save_batch(files).await?;
        match self
            .store
            .append_invitation_gallery(&id, &store_scope, &locations)
            .await
        {
            Ok(invitation) => {
                info!(invitation = %id.0, added = locations.len(), "appended photos");
                Ok(invitation)
            }
            Err(e) => {
                uploads.discard(&locations).await;
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, scope: &AuthoringScope, id: &str) -> Result<(), ApiError> {
        let id = parse_invitation_id(id)?;
        self.store
            .delete_invitation(&id, &scope.store_scope())
            .await?;
        info!(invitation = %id.0, "deleted invitation");
        Ok(())
    }

    async fn resolve_owner(&self, raw: &str) -> Result<User, ApiError> {
        let unknown = || ApiError::validation("clientId does not match an existing user");
        let user_id = Uuid::try_parse(raw).map_err(|_| unknown())?;
        match self.store.get_user_by_id(&UserId(user_id)).await {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound) => Err(unknown()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Ids that are not UUIDs cannot exist.
pub fn parse_invitation_id(raw: &str) -> Result<InvitationId, ApiError> {
    Uuid::try_parse(raw)
        .map(InvitationId)
        .map_err(|_| ApiError::NotFound)
}

/// 128 random bits, hex encoded.
fn new_share_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn require(errors: &mut Vec<String>, field: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.push(format!("{field} is required"));
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
