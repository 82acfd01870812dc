//! Configuration management for the bands-to-see service.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Everything the service needs is read
//! once at startup into a [`Settings`] value that is then passed to the parts
//! that need it.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::{BandsError, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_ARTIST_BATCH_SIZE: usize = 2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Spotify rejects several-artist lookups with more ids than this.
pub const MAX_ARTIST_BATCH_SIZE: usize = 50;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at `bandstosee/.env` under the platform data directory:
/// - Linux: `~/.local/share/bandstosee/.env`
/// - macOS: `~/Library/Application Support/bandstosee/.env`
/// - Windows: `%LOCALAPPDATA%/bandstosee/.env`
///
/// The directory is created when missing. A missing file is fine, since the
/// variables may come straight from the environment; a file that exists but
/// cannot be parsed is an error.
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| BandsError::Config(e.to_string()))?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| BandsError::Config(format!("{}: {}", path.display(), e)))
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("bandstosee/.env");
    path
}

/// Client credentials for the Spotify accounts service.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// The playlist whose tracks make up the bands list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSource {
    pub owner_id: String,
    pub playlist_id: String,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub credentials: ClientCredentials,
    pub playlist: PlaylistSource,
    pub api_url: String,
    pub token_url: String,
    pub artist_batch_size: usize,
    pub request_timeout: Duration,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BandsError::Config`] when a required variable is unset or a
    /// numeric value does not parse or is out of range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BandsError::Config(format!("{} must be set", key)))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let artist_batch_size = parse_number(
            "ARTIST_BATCH_SIZE",
            lookup("ARTIST_BATCH_SIZE"),
            DEFAULT_ARTIST_BATCH_SIZE,
        )?;
        if artist_batch_size == 0 || artist_batch_size > MAX_ARTIST_BATCH_SIZE {
            return Err(BandsError::Config(format!(
                "ARTIST_BATCH_SIZE must be between 1 and {}, got {}",
                MAX_ARTIST_BATCH_SIZE, artist_batch_size
            )));
        }

        let timeout_secs = parse_number(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(BandsError::Config(
                "REQUEST_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        Ok(Settings {
            server_addr: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            credentials: ClientCredentials {
                client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
                client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            },
            playlist: PlaylistSource {
                owner_id: required("SPOTIFY_SOURCE_PLAYLIST_OWNER_ID")?,
                playlist_id: required("SPOTIFY_SOURCE_PLAYLIST_ID")?,
            },
            api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
                .trim_end_matches('/')
                .to_string(),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_API_TOKEN_URL),
            artist_batch_size,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_number<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| BandsError::Config(format!("{} is not a valid number: {}", key, e))),
        None => Ok(default),
    }
}
