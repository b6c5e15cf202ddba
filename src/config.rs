//! # Application Configuration
//!
//! All collaborator configuration in one serde-backed value, loadable from
//! a JSON file. Every section has sensible defaults so a missing file or a
//! partial file still boots a development server.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::jwt::JwtConfig;
use crate::auth::session::SessionConfig;
use crate::http::config::HttpServerConfig;
use crate::media::MediaConfig;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {}", .0.display(), .1)]
    Io(PathBuf, String),

    #[error("Cannot parse config file {}: {}", .0.display(), .1)]
    Parse(PathBuf, String),
}

/// Auth collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HS256 signing secret
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

fn default_jwt_secret() -> String {
    "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string()
}

fn default_access_token_ttl_minutes() -> i64 {
    15
}

fn default_refresh_token_ttl_days() -> i64 {
    30
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_token_ttl_minutes: default_access_token_ttl_minutes(),
            refresh_token_ttl_days: default_refresh_token_ttl_days(),
        }
    }
}

impl AuthSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            access_token_ttl: Duration::minutes(self.access_token_ttl_minutes),
            ..JwtConfig::default()
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            refresh_token_ttl: Duration::days(self.refresh_token_ttl_days),
        }
    }
}

/// Media collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSettings {
    /// Directory the local media store keeps assets in
    #[serde(default = "default_media_root")]
    pub root: PathBuf,

    /// Base URL prefixed onto asset ids
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Directory multipart uploads are staged in before upload
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,
}

fn default_media_root() -> PathBuf {
    std::env::temp_dir().join("vidhub_media")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join("vidhub_staging")
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            public_base_url: default_public_base_url(),
            staging_dir: default_staging_dir(),
        }
    }
}

impl MediaSettings {
    pub fn media_config(&self) -> MediaConfig {
        MediaConfig {
            root: self.root.clone(),
            public_base_url: self.public_base_url.clone(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub media: MediaSettings,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
