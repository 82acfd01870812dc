//! # CLI Module
//!
//! User-facing commands of the `bandstosee` binary.
//!
//! - [`serve`] - runs the HTTP service (`GET /userdata`, `GET /health`)
//! - [`bands`] - runs one aggregation and prints the result as a table or JSON
//!
//! Both commands build the same object graph from [`Settings`]: one
//! [`SpotifyClient`], one [`TokenManager`] shared for the life of the
//! process, and a [`PlaylistAggregator`] on top.
//!
//! ```text
//! CLI Layer
//!     ↓
//! Management Layer (TokenManager, ArtistBatchFetcher, PlaylistAggregator)
//!     ↓
//! Spotify Layer (SpotifyApi / SpotifyClient)
//! ```
//!
//! Setup errors are fatal and reported with the `error!` macro, which exits.

use std::sync::Arc;

use crate::{
    config::Settings,
    error::Result,
    management::{PlaylistAggregator, TokenManager},
    spotify::{SpotifyApi, SpotifyClient},
};

mod bands;
mod serve;

pub use bands::bands;
pub use serve::serve;

/// Wires the Spotify client, token manager and aggregator together.
pub fn build_aggregator(
    settings: &Settings,
) -> Result<(Arc<TokenManager>, Arc<PlaylistAggregator>)> {
    let api: Arc<dyn SpotifyApi> = Arc::new(SpotifyClient::from_settings(settings)?);
    let tokens = Arc::new(TokenManager::new(
        Arc::clone(&api),
        settings.credentials.clone(),
    ));
    let aggregator = Arc::new(PlaylistAggregator::new(
        Arc::clone(&tokens),
        api,
        settings.playlist.clone(),
        settings.artist_batch_size,
    ));

    Ok((tokens, aggregator))
}
