//! SQLite backend for [`lumiere_storage::Store`].

use chrono::{DateTime, Utc};
use lumiere_storage::{
    decode_gallery, encode_gallery, CreateInvitationParams, CreateSessionParams, CreateUserParams,
    Invitation, InvitationId, InvitationPatch, InvitationScope, Role, Session, SessionId, Store,
    StoreError, User, UserId,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const INVITATION_COLUMNS: &str = "id, client_id, share_token, event_type, title, names, \
     event_date, event_time, venue, location_note, message, quote, hashtag, dress_code, \
     rsvp_label, rsvp_value, template, primary_color, text_color, font_style, is_dark, \
     gallery, is_published, views, created_at, updated_at";

const USER_COLUMNS: &str = "id, email, name, role, is_active, created_at";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        // Every connection to `:memory:` is a separate database, so pin the pool to one.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(backend)?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(backend)?;
        Self::migrate(pool).await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(backend)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(backend)?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, StoreError> {
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn unique_or_backend(e: sqlx::Error) -> StoreError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => StoreError::AlreadyExists,
        _ => backend(e),
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, StoreError> {
    Uuid::try_parse(s).map_err(|e| StoreError::Backend(e.to_string()))
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| StoreError::Backend(format!("invalid timestamp: {ms}")))
}

fn scope_owner(scope: &InvitationScope) -> Option<String> {
    scope.owner().map(|id| id.0.to_string())
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    role: String,
    is_active: bool,
    created_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(parse_uuid(&row.id)?),
            email: row.email,
            name: row.name,
            role: Role::from_str(&row.role).map_err(StoreError::Backend)?,
            is_active: row.is_active,
            created_at: from_millis(row.created_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InvitationRow {
    id: String,
    client_id: String,
    share_token: String,
    event_type: Option<String>,
    title: Option<String>,
    names: String,
    event_date: String,
    event_time: Option<String>,
    venue: Option<String>,
    location_note: Option<String>,
    message: Option<String>,
    quote: Option<String>,
    hashtag: Option<String>,
    dress_code: Option<String>,
    rsvp_label: Option<String>,
    rsvp_value: Option<String>,
    template: String,
    primary_color: String,
    text_color: String,
    font_style: String,
    is_dark: bool,
    gallery: Option<String>,
    is_published: bool,
    views: i64,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<InvitationRow> for Invitation {
    type Error = StoreError;

    fn try_from(row: InvitationRow) -> Result<Self, Self::Error> {
        Ok(Invitation {
            id: InvitationId(parse_uuid(&row.id)?),
            client_id: UserId(parse_uuid(&row.client_id)?),
            share_token: row.share_token,
            event_type: row.event_type,
            title: row.title,
            names: row.names,
            event_date: row.event_date,
            event_time: row.event_time,
            venue: row.venue,
            location_note: row.location_note,
            message: row.message,
            quote: row.quote,
            hashtag: row.hashtag,
            dress_code: row.dress_code,
            rsvp_label: row.rsvp_label,
            rsvp_value: row.rsvp_value,
            template: row.template,
            primary_color: row.primary_color,
            text_color: row.text_color,
            font_style: row.font_style,
            is_dark: row.is_dark,
            gallery: decode_gallery(row.gallery.as_deref()),
            is_published: row.is_published,
            views: row.views,
            created_at: from_millis(row.created_at)?,
            updated_at: from_millis(row.updated_at)?,
        })
    }
}

fn rows_to_invitations(rows: Vec<InvitationRow>) -> Result<Vec<Invitation>, StoreError> {
    rows.into_iter().map(Invitation::try_from).collect()
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // ───────────────────────────── Users ─────────────────────────────

    async fn create_user(&self, params: &CreateUserParams) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users(id, email, name, role, is_active, created_at)
             VALUES(?, ?, ?, ?, 1, ?)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::now_v7().to_string())
            .bind(&params.email)
            .bind(&params.name)
            .bind(params.role.as_str())
            .bind(Utc::now().timestamp_millis())
            .fetch_one(&self.pool)
            .await
            .map_err(unique_or_backend)?;
        row.try_into()
    }

    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.0.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound)?
            .try_into()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound)?
            .try_into()
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, rowid");
        sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    // ───────────────────────────── Sessions ─────────────────────────────

    async fn create_session(&self, params: &CreateSessionParams) -> Result<Session, StoreError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO sessions(id, user_id, token_hash, created_at, expires_at)
             VALUES(?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(params.user_id.0.to_string())
        .bind(&params.token_hash)
        .bind(created_at.timestamp_millis())
        .bind(params.expires_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => StoreError::NotFound,
            _ => unique_or_backend(e),
        })?;

        Ok(Session {
            id: SessionId(id),
            user_id: params.user_id.clone(),
            token_hash: params.token_hash.clone(),
            created_at,
            expires_at: params.expires_at,
        })
    }

    async fn get_session_user(&self, token_hash: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.email, u.name, u.role, u.is_active, u.created_at
               FROM sessions s
               JOIN users u ON u.id = s.user_id
              WHERE s.token_hash = ? AND s.expires_at > ?",
        )
        .bind(token_hash)
        .bind(Utc::now().timestamp_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.ok_or(StoreError::NotFound)?.try_into()
    }

    // ───────────────────────────── Invitations ─────────────────────────────

    async fn create_invitation(
        &self,
        params: &CreateInvitationParams,
    ) -> Result<Invitation, StoreError> {
        let now = Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let sql = format!(
            "INSERT INTO invitations(
                id, client_id, share_token, event_type, title, names, event_date, event_time,
                venue, location_note, message, quote, hashtag, dress_code, rsvp_label,
                rsvp_value, template, primary_color, text_color, font_style, is_dark, gallery,
                is_published, views, created_at, updated_at)
             VALUES(?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,0,?,?)
             RETURNING {INVITATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(Uuid::now_v7().to_string())
            .bind(params.client_id.0.to_string())
            .bind(&params.share_token)
            .bind(&params.event_type)
            .bind(&params.title)
            .bind(&params.names)
            .bind(&params.event_date)
            .bind(&params.event_time)
            .bind(&params.venue)
            .bind(&params.location_note)
            .bind(&params.message)
            .bind(&params.quote)
            .bind(&params.hashtag)
            .bind(&params.dress_code)
            .bind(&params.rsvp_label)
            .bind(&params.rsvp_value)
            .bind(&params.template)
            .bind(&params.primary_color)
            .bind(&params.text_color)
            .bind(&params.font_style)
            .bind(params.is_dark)
            .bind(encode_gallery(&params.gallery))
            .bind(params.is_published)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_foreign_key_violation() => StoreError::NotFound,
                _ => unique_or_backend(e),
            })?;

        // A token that belonged to a deleted invitation counts as taken.
        let retired: Option<(String,)> =
            sqlx::query_as("SELECT share_token FROM retired_share_tokens WHERE share_token = ?")
                .bind(&params.share_token)
                .fetch_optional(&mut *tx)
                .await
                .map_err(backend)?;
        if retired.is_some() {
            return Err(StoreError::AlreadyExists);
        }

        tx.commit().await.map_err(backend)?;
        row.try_into()
    }

    async fn get_invitation(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
    ) -> Result<Invitation, StoreError> {
        let owner = scope_owner(scope);
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations
              WHERE id = ? AND (? IS NULL OR client_id = ?)"
        );
        sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(invitation_id.0.to_string())
            .bind(owner.clone())
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound)?
            .try_into()
    }

    async fn list_client_invitations(
        &self,
        client_id: &UserId,
    ) -> Result<Vec<Invitation>, StoreError> {
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations
              WHERE client_id = ?
              ORDER BY created_at DESC, rowid DESC"
        );
        let rows = sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(client_id.0.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        rows_to_invitations(rows)
    }

    async fn list_invitations(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Invitation>, StoreError> {
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations
              ORDER BY created_at DESC, rowid DESC
              LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        rows_to_invitations(rows)
    }

    async fn count_invitations(&self) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invitations")
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(count.max(0) as u64)
    }

    async fn update_invitation(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
        patch: &InvitationPatch,
    ) -> Result<Invitation, StoreError> {
        let owner = scope_owner(scope);
        let sql = format!(
            "UPDATE invitations SET
                client_id     = COALESCE(?, client_id),
                event_type    = COALESCE(?, event_type),
                title         = COALESCE(?, title),
                names         = COALESCE(?, names),
                event_date    = COALESCE(?, event_date),
                event_time    = COALESCE(?, event_time),
                venue         = COALESCE(?, venue),
                location_note = COALESCE(?, location_note),
                message       = COALESCE(?, message),
                quote         = COALESCE(?, quote),
                hashtag       = COALESCE(?, hashtag),
                dress_code    = COALESCE(?, dress_code),
                rsvp_label    = COALESCE(?, rsvp_label),
                rsvp_value    = COALESCE(?, rsvp_value),
                template      = COALESCE(?, template),
                primary_color = COALESCE(?, primary_color),
                text_color    = COALESCE(?, text_color),
                font_style    = COALESCE(?, font_style),
                is_dark       = COALESCE(?, is_dark),
                gallery       = COALESCE(?, gallery),
                is_published  = COALESCE(?, is_published),
                updated_at    = ?
              WHERE id = ? AND (? IS NULL OR client_id = ?)
              RETURNING {INVITATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(patch.client_id.as_ref().map(|id| id.0.to_string()))
            .bind(&patch.event_type)
            .bind(&patch.title)
            .bind(&patch.names)
            .bind(&patch.event_date)
            .bind(&patch.event_time)
            .bind(&patch.venue)
            .bind(&patch.location_note)
            .bind(&patch.message)
            .bind(&patch.quote)
            .bind(&patch.hashtag)
            .bind(&patch.dress_code)
            .bind(&patch.rsvp_label)
            .bind(&patch.rsvp_value)
            .bind(&patch.template)
            .bind(&patch.primary_color)
            .bind(&patch.text_color)
            .bind(&patch.font_style)
            .bind(patch.is_dark)
            .bind(patch.gallery.as_deref().map(encode_gallery))
            .bind(patch.is_published)
            .bind(Utc::now().timestamp_millis())
            .bind(invitation_id.0.to_string())
            .bind(owner.clone())
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                // Reassigning to a user that doesn't exist.
                Some(db) if db.is_foreign_key_violation() => StoreError::Conflict,
                _ => backend(e),
            })?;

        row.ok_or(StoreError::NotFound)?.try_into()
    }

    async fn toggle_invitation_published(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
    ) -> Result<Invitation, StoreError> {
        let owner = scope_owner(scope);
        let sql = format!(
            "UPDATE invitations
                SET is_published = NOT is_published, updated_at = ?
              WHERE id = ? AND (? IS NULL OR client_id = ?)
              RETURNING {INVITATION_COLUMNS}"
        );
        sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(Utc::now().timestamp_millis())
            .bind(invitation_id.0.to_string())
            .bind(owner.clone())
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound)?
            .try_into()
    }

    async fn append_invitation_gallery(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
        locations: &[String],
    ) -> Result<Invitation, StoreError> {
        let owner = scope_owner(scope);
        let id = invitation_id.0.to_string();
        let now = Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await.map_err(backend)?;

        // Write first so the transaction holds the write lock before reading the gallery.
        let touched = sqlx::query(
            "UPDATE invitations SET updated_at = ?
              WHERE id = ? AND (? IS NULL OR client_id = ?)",
        )
        .bind(now)
        .bind(&id)
        .bind(owner.clone())
        .bind(owner)
        .execute(&mut *tx)
        .await
        .map_err(backend)?;
        if touched.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        let (raw,): (Option<String>,) =
            sqlx::query_as("SELECT gallery FROM invitations WHERE id = ?")
                .bind(&id)
                .fetch_one(&mut *tx)
                .await
                .map_err(backend)?;
        let mut gallery = decode_gallery(raw.as_deref());
        gallery.extend(locations.iter().cloned());

        let sql = format!(
            "UPDATE invitations SET gallery = ? WHERE id = ?
              RETURNING {INVITATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(encode_gallery(&gallery))
            .bind(&id)
            .fetch_one(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)?;
        row.try_into()
    }

    async fn delete_invitation(
        &self,
        invitation_id: &InvitationId,
        scope: &InvitationScope,
    ) -> Result<(), StoreError> {
        let owner = scope_owner(scope);
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let deleted: Option<(String,)> = sqlx::query_as(
            "DELETE FROM invitations
              WHERE id = ? AND (? IS NULL OR client_id = ?)
              RETURNING share_token",
        )
        .bind(invitation_id.0.to_string())
        .bind(owner.clone())
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await
        .map_err(backend)?;

        let Some((share_token,)) = deleted else {
            return Err(StoreError::NotFound);
        };

        sqlx::query("INSERT OR IGNORE INTO retired_share_tokens(share_token, retired_at) VALUES(?, ?)")
            .bind(share_token)
            .bind(Utc::now().timestamp_millis())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)?;
        Ok(())
    }

    async fn view_published_invitation(
        &self,
        share_token: &str,
    ) -> Result<Invitation, StoreError> {
        // Relative increment in the same statement as the lookup; no lost updates.
        let sql = format!(
            "UPDATE invitations SET views = views + 1
              WHERE share_token = ? AND is_published = 1
              RETURNING {INVITATION_COLUMNS}"
        );
        sqlx::query_as::<_, InvitationRow>(&sql)
            .bind(share_token)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound)?
            .try_into()
    }
}
