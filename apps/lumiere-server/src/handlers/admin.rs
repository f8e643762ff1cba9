//! Administrative endpoints: any invitation, explicit owners, paged listing.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lumiere_storage::{Invitation, StoreError, UserId};
use std::collections::HashMap;
use tracing::info;

use super::{read_photos, AdminInvitationRequest, ClientSummary, InvitationResponse, PageQuery};
use crate::auth::AdminCaller;
use crate::authoring::{AuthoringScope, Paging};
use crate::error::ApiError;
use crate::response::{created, ApiResponse, PaginationMeta};
use crate::server::LumiereServer;

const SCOPE: AuthoringScope = AuthoringScope::Admin;

/// Attach owner summaries, looking each owner up once.
async fn with_clients(
    server: &LumiereServer,
    invitations: Vec<Invitation>,
) -> Result<Vec<InvitationResponse>, ApiError> {
    let mut owners: HashMap<UserId, Option<ClientSummary>> = HashMap::new();
    let mut out = Vec::with_capacity(invitations.len());
    for invitation in invitations {
        if !owners.contains_key(&invitation.client_id) {
            let summary = match server.store.get_user_by_id(&invitation.client_id).await {
                Ok(user) => Some(ClientSummary::from(&user)),
                Err(StoreError::NotFound) => None,
                Err(e) => return Err(e.into()),
            };
            owners.insert(invitation.client_id.clone(), summary);
        }
        let client = owners.get(&invitation.client_id).cloned().flatten();
        out.push(InvitationResponse::from(invitation).with_client(client));
    }
    Ok(out)
}

pub async fn list_invitations(
    State(server): State<LumiereServer>,
    _caller: AdminCaller,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<Vec<InvitationResponse>>, ApiError> {
    let paging = Paging::from_query(query.page.as_deref(), query.limit.as_deref());
    let (items, total) = server.authoring().list_page(paging).await?;
    let items = with_clients(&server, items).await?;
    Ok(ApiResponse::paginated(
        items,
        PaginationMeta::new(total, paging.page, paging.limit),
    ))
}

pub async fn get_invitation(
    State(server): State<LumiereServer>,
    _caller: AdminCaller,
    Path(id): Path<String>,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let invitation = server.authoring().get(&SCOPE, &id).await?;
    let mut items = with_clients(&server, vec![invitation]).await?;
    items.pop().map(ApiResponse::ok).ok_or(ApiError::NotFound)
}

pub async fn create_invitation(
    State(server): State<LumiereServer>,
    caller: AdminCaller,
    Json(req): Json<AdminInvitationRequest>,
) -> Result<Response, ApiError> {
    let invitation = server
        .authoring()
        .create(&SCOPE, req.fields, req.client_id.as_deref())
        .await?;
    info!(admin = %caller.0.id.0, invitation = %invitation.id.0, "admin created invitation");
    Ok(created(
        "Invitation created",
        InvitationResponse::from(invitation),
    ))
}

pub async fn update_invitation(
    State(server): State<LumiereServer>,
    caller: AdminCaller,
    Path(id): Path<String>,
    Json(req): Json<AdminInvitationRequest>,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let invitation = server
        .authoring()
        .update(&SCOPE, &id, req.fields, req.client_id.as_deref())
        .await?;
    info!(admin = %caller.0.id.0, invitation = %invitation.id.0, "admin updated invitation");
    Ok(ApiResponse::with_message(
        "Invitation updated",
        invitation.into(),
    ))
}

pub async fn delete_invitation(
    State(server): State<LumiereServer>,
    caller: AdminCaller,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    server.authoring().delete(&SCOPE, &id).await?;
    info!(admin = %caller.0.id.0, invitation = %id, "admin deleted invitation");
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn toggle_published(
    State(server): State<LumiereServer>,
    caller: AdminCaller,
    Path(id): Path<String>,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let invitation = server.authoring().toggle_published(&SCOPE, &id).await?;
    info!(
        admin = %caller.0.id.0,
        invitation = %invitation.id.0,
        published = invitation.is_published,
        "admin toggled invitation"
    );
    Ok(ApiResponse::ok(invitation.into()))
}

pub async fn add_photos(
    State(server): State<LumiereServer>,
    caller: AdminCaller,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let files = read_photos(multipart).await?;
    let invitation = server
        .authoring()
        .add_photos(&SCOPE, &id, server.uploads.as_ref(), &files)
        .await?;
    info!(
        admin = %caller.0.id.0,
        invitation = %invitation.id.0,
        added = files.len(),
        "admin added photos"
    );
    Ok(ApiResponse::ok(invitation.into()))
}
