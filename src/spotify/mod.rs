//! # Spotify Integration Module
//!
//! The remote side of the service: the accounts service that issues
//! client-credentials tokens and the Web API endpoints that return playlists
//! and artists.
//!
//! ## Architecture
//!
//! ```text
//! Management Layer (TokenManager, ArtistBatchFetcher, PlaylistAggregator)
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The management layer only sees [`SpotifyApi`], so tests can drive it with
//! an in-memory implementation. [`SpotifyClient`] is the real one; its methods
//! are split by endpoint family:
//!
//! - [`auth`] - `POST /api/token` with `grant_type=client_credentials`
//! - [`playlist`] - `GET /playlists/{playlist_id}`
//! - [`artists`] - `GET /artists?ids=...`
//!
//! Every request carries the client-wide timeout configured at construction.
//! Nothing here retries: a failed call surfaces as the matching
//! [`BandsError`] variant and the caller decides what to do.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Settings,
    error::{BandsError, Result},
    types::{Artist, PlaylistResponse, TokenResponse},
};

pub mod artists;
pub mod auth;
pub mod playlist;

/// Operations the service needs from Spotify.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Requests an app token via the client-credentials grant.
    async fn grant_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse>;

    /// Fetches a playlist with its first page of tracks.
    async fn get_playlist(
        &self,
        token: &str,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse>;

    /// Fetches full artist objects for `ids`, in request order.
    ///
    /// Unknown ids come back as `None`.
    async fn get_artists_by_ids(&self, token: &str, ids: &[String]) -> Result<Vec<Option<Artist>>>;
}

/// [`SpotifyApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
}

impl SpotifyClient {
    pub fn new(
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BandsError::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(SpotifyClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.api_url.clone(),
            settings.token_url.clone(),
            settings.request_timeout,
        )
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn grant_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        self.request_app_token(client_id, client_secret).await
    }

    async fn get_playlist(
        &self,
        token: &str,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse> {
        self.fetch_playlist(token, owner_id, playlist_id).await
    }

    async fn get_artists_by_ids(&self, token: &str, ids: &[String]) -> Result<Vec<Option<Artist>>> {
        self.fetch_several_artists(token, ids).await
    }
}
