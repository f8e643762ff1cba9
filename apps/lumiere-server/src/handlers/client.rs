//! Self-service endpoints: the caller's own invitations.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{read_photos, InvitationResponse};
use crate::auth::ClientCaller;
use crate::authoring::{AuthoringScope, InvitationInput};
use crate::error::ApiError;
use crate::response::{created, ApiResponse};
use crate::server::LumiereServer;

fn scope(caller: &ClientCaller) -> AuthoringScope {
    AuthoringScope::SelfService(caller.0.id.clone())
}

pub async fn list_invitations(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
) -> Result<ApiResponse<Vec<InvitationResponse>>, ApiError> {
    let items = server.authoring().list_owned(&caller.0.id).await?;
    Ok(ApiResponse::ok(
        items.into_iter().map(InvitationResponse::from).collect(),
    ))
}

pub async fn get_invitation(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
    Path(id): Path<String>,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let invitation = server.authoring().get(&scope(&caller), &id).await?;
    Ok(ApiResponse::ok(invitation.into()))
}

/// Any `clientId` in the body is ignored; the caller always owns the result.
pub async fn create_invitation(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
    Json(input): Json<InvitationInput>,
) -> Result<Response, ApiError> {
    let invitation = server
        .authoring()
        .create(&scope(&caller), input, None)
        .await?;
    Ok(created(
        "Invitation created",
        InvitationResponse::from(invitation),
    ))
}

pub async fn update_invitation(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
    Path(id): Path<String>,
    Json(input): Json<InvitationInput>,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let invitation = server
        .authoring()
        .update(&scope(&caller), &id, input, None)
        .await?;
    Ok(ApiResponse::with_message(
        "Invitation updated",
        invitation.into(),
    ))
}

pub async fn delete_invitation(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    server.authoring().delete(&scope(&caller), &id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn toggle_published(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
    Path(id): Path<String>,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let invitation = server
        .authoring()
        .toggle_published(&scope(&caller), &id)
        .await?;
    Ok(ApiResponse::ok(invitation.into()))
}

pub async fn add_photos(
    State(server): State<LumiereServer>,
    caller: ClientCaller,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<ApiResponse<InvitationResponse>, ApiError> {
    let files = read_photos(multipart).await?;
    let invitation = server
        .authoring()
        .add_photos(&scope(&caller), &id, server.uploads.as_ref(), &files)
        .await?;
    Ok(ApiResponse::ok(invitation.into()))
}
