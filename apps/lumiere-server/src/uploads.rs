//! Gallery image uploads.
//!
//! Files land in the upload directory as `<uuid>.<ext>` and are addressed by
//! the `/uploads/<file>` location stored in the invitation gallery.

use axum::body::Bytes;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// URL prefix the upload directory is served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

const ALLOWED_IMAGE_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{name}: only images are allowed (jpeg, jpg, png, gif, webp)")]
    UnsupportedType { name: String },

    #[error("{name}: file exceeds the {limit} byte limit")]
    TooLarge { name: String, limit: u64 },

    #[error("upload body too large: {0}")]
    BodyTooLarge(String),

    #[error("malformed multipart body: {0}")]
    Multipart(String),

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// One file part from a multipart request.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist a batch and return one location per file, in order.
    ///
    /// Every file is validated before anything is written. If a write fails
    /// the files already written for this batch are removed.
    async fn save_batch(&self, files: &[IncomingFile]) -> Result<Vec<String>, UploadError>;

    /// Best-effort removal of previously saved locations.
    async fn discard(&self, locations: &[String]);
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_file_size: u64,
}

pub struct DiskUploadStore {
    config: UploadConfig,
}

impl DiskUploadStore {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Create the upload directory if needed.
    pub async fn init(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.config.dir).await?;
        Ok(())
    }

    fn path_for(&self, location: &str) -> Option<PathBuf> {
        // Only the final component; locations never address subdirectories.
        Path::new(location)
            .file_name()
            .map(|name| self.config.dir.join(name))
    }
}

#[async_trait::async_trait]
impl UploadStore for DiskUploadStore {
    async fn save_batch(&self, files: &[IncomingFile]) -> Result<Vec<String>, UploadError> {
        let extensions = files
            .iter()
            .map(|f| validate_image(f, self.config.max_file_size))
            .collect::<Result<Vec<_>, _>>()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }
        self.init().await?;

        let mut saved = Vec::with_capacity(files.len());
        for (file, ext) in files.iter().zip(extensions) {
            let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
            let location = format!("{UPLOADS_ROUTE}/{stored_name}");
            if let Err(e) = fs::write(self.config.dir.join(&stored_name), &file.bytes).await {
                warn!(file = %file.file_name, error = %e, "upload write failed, rolling back batch");
                self.discard(&saved).await;
                return Err(e.into());
            }
            debug!(file = %file.file_name, %location, bytes = file.bytes.len(), "stored upload");
            saved.push(location);
        }
        Ok(saved)
    }

    async fn discard(&self, locations: &[String]) {
        for location in locations {
            let Some(path) = self.path_for(location) else {
                continue;
            };
            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "failed to remove upload");
            }
        }
    }
}

/// Check one file against the image allow-list and size limit.
///
/// Both the extension and the declared content type must name an allowed
/// image type. Returns the normalized extension.
pub fn validate_image(file: &IncomingFile, max_file_size: u64) -> Result<&'static str, UploadError> {
    let unsupported = || UploadError::UnsupportedType {
        name: file.file_name.clone(),
    };

    let ext = Path::new(&file.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|e| ALLOWED_IMAGE_TYPES.iter().copied().find(|t| *t == e))
        .ok_or_else(unsupported)?;

    let content_type = file.content_type.to_ascii_lowercase();
    let subtype = content_type
        .strip_prefix("image/")
        .map(|s| s.split(';').next().unwrap_or_default().trim())
        .ok_or_else(unsupported)?;
    if !ALLOWED_IMAGE_TYPES.contains(&subtype) {
        return Err(unsupported());
    }

    if file.bytes.len() as u64 > max_file_size {
        return Err(UploadError::TooLarge {
            name: file.file_name.clone(),
            limit: max_file_size,
        });
    }

    Ok(ext)
}
