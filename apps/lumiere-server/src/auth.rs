//! Bearer-token authentication.
//!
//! Session tokens are 32 random bytes, hex encoded. Only the SHA-256 of a
//! token is stored.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use lumiere_storage::{CreateSessionParams, Role, Store, StoreError, User};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::ApiError;
use crate::server::LumiereServer;

pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Create a session for `user` and return the plaintext token.
pub async fn issue_session(
    store: &dyn Store,
    user: &User,
    ttl_hours: i64,
) -> Result<String, StoreError> {
    let token = generate_token();
    store
        .create_session(&CreateSessionParams {
            user_id: user.id.clone(),
            token_hash: hash_token(&token),
            expires_at: Utc::now() + Duration::hours(ttl_hours),
        })
        .await?;
    Ok(token)
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn authenticate(parts: &Parts, server: &LumiereServer) -> Result<User, ApiError> {
    let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
    let user = match server.store.get_session_user(&hash_token(token)).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(ApiError::Unauthorized),
        Err(e) => return Err(e.into()),
    };
    if !user.is_active {
        debug!(user = %user.email, "rejected inactive user");
        return Err(ApiError::Unauthorized);
    }
    Ok(user)
}

/// Any signed-in user. Admins acting here act on their own invitations.
pub struct ClientCaller(pub User);

/// A signed-in user with the admin role.
pub struct AdminCaller(pub User);

#[axum::async_trait]
impl FromRequestParts<LumiereServer> for ClientCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        server: &LumiereServer,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, server).await?;
        match user.role {
            Role::Client | Role::Admin => Ok(ClientCaller(user)),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<LumiereServer> for AdminCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        server: &LumiereServer,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, server).await?;
        if user.role != Role::Admin {
            return Err(ApiError::Forbidden);
        }
        Ok(AdminCaller(user))
    }
}
