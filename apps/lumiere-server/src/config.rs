//! Server configuration.
//!
//! Read from environment variables:
//!
//! ```bash
//! LUMIERE_UPLOAD_DIR=uploads              # gallery uploads, served at /uploads
//! LUMIERE_MAX_FILE_SIZE=10485760          # per-file byte limit
//! LUMIERE_SESSION_TTL_HOURS=168           # lifetime of issued session tokens
//! LUMIERE_PUBLIC_URL=http://localhost:5173  # share-link base and CORS origin
//! ```
//!
//! `DATABASE_URL` and `LUMIERE_ADDR` are CLI flags with env fallbacks; see `main.rs`.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub upload_dir: PathBuf,
    pub max_file_size: u64,
    pub session_ttl_hours: i64,
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid number for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let upload_dir = env::var("LUMIERE_UPLOAD_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let max_file_size =
            parse_number("LUMIERE_MAX_FILE_SIZE")?.unwrap_or(defaults.max_file_size);
        if max_file_size == 0 {
            return Err(ConfigError::NotPositive("LUMIERE_MAX_FILE_SIZE"));
        }

        let session_ttl_hours =
            parse_number("LUMIERE_SESSION_TTL_HOURS")?.unwrap_or(defaults.session_ttl_hours);
        if session_ttl_hours <= 0 {
            return Err(ConfigError::NotPositive("LUMIERE_SESSION_TTL_HOURS"));
        }

        let public_url = env::var("LUMIERE_PUBLIC_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.public_url);

        Ok(Self {
            upload_dir,
            max_file_size,
            session_ttl_hours,
            public_url,
        })
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(None),
    }
}
