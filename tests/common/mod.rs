#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use bandstosee::{
    BandsError,
    config::{ClientCredentials, PlaylistSource},
    error::Result,
    management::{PlaylistAggregator, TokenManager},
    spotify::SpotifyApi,
    types::{
        Artist, PlaylistItem, PlaylistOwner, PlaylistResponse, PlaylistTrack, PlaylistTracks,
        TokenResponse, TrackArtist,
    },
};
use serde_json::Map;

pub const OWNER: &str = "owner-1";
pub const PLAYLIST: &str = "playlist-1";

/// In-memory Spotify that records every call it receives.
pub struct FakeSpotify {
    pub grant_calls: AtomicUsize,
    pub playlist_calls: AtomicUsize,
    pub artist_batches: Mutex<Vec<Vec<String>>>,
    pub fail_grant: AtomicBool,
    pub grant_delay: Duration,
    pub expires_in: u64,
    pub playlist: Option<PlaylistResponse>,
    pub artists: HashMap<String, Artist>,
    /// Any batch containing this id fails.
    pub fail_on_artist: Option<String>,
    pub artist_delay: Duration,
    pub artists_in_flight: AtomicUsize,
    pub peak_artists_in_flight: AtomicUsize,
}

impl FakeSpotify {
    pub fn new() -> Self {
        FakeSpotify {
            grant_calls: AtomicUsize::new(0),
            playlist_calls: AtomicUsize::new(0),
            artist_batches: Mutex::new(Vec::new()),
            fail_grant: AtomicBool::new(false),
            grant_delay: Duration::ZERO,
            expires_in: 3600,
            playlist: None,
            artists: HashMap::new(),
            fail_on_artist: None,
            artist_delay: Duration::ZERO,
            artists_in_flight: AtomicUsize::new(0),
            peak_artists_in_flight: AtomicUsize::new(0),
        }
    }

    /// `tracks` pairs a track id with its comma separated artist ids.
    pub fn with_playlist(mut self, tracks: &[(&str, &str)]) -> Self {
        self.playlist = Some(playlist(tracks));
        for (_, artists) in tracks {
            for id in artists.split(',').filter(|a| !a.is_empty()) {
                self.artists.insert(id.to_string(), artist(id));
            }
        }
        self
    }

    pub fn with_artists(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self.artists.insert(id.to_string(), artist(id));
        }
        self
    }

    /// Answers `requested` with an artist whose canonical id is `canonical`,
    /// the way Spotify does for relinked artists.
    pub fn with_relinked(mut self, requested: &str, canonical: &str) -> Self {
        self.artists.insert(requested.to_string(), artist(canonical));
        self
    }

    pub fn grants(&self) -> usize {
        self.grant_calls.load(Ordering::SeqCst)
    }

    pub fn peak_artist_calls(&self) -> usize {
        self.peak_artists_in_flight.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.artist_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn grant_client_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        let n = self.grant_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.grant_delay.is_zero() {
            tokio::time::sleep(self.grant_delay).await;
        }
        if self.fail_grant.load(Ordering::SeqCst) {
            return Err(BandsError::Auth("invalid_client".to_string()));
        }
        assert_eq!(client_id, "client");
        assert_eq!(client_secret, "secret");

        Ok(TokenResponse {
            access_token: format!("token-{}", n),
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
        })
    }

    async fn get_playlist(
        &self,
        token: &str,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);
        assert!(token.starts_with("token-"));
        assert_eq!(owner_id, OWNER);
        assert_eq!(playlist_id, PLAYLIST);

        self.playlist
            .clone()
            .ok_or_else(|| BandsError::PlaylistFetch("404 Not Found".to_string()))
    }

    async fn get_artists_by_ids(&self, token: &str, ids: &[String]) -> Result<Vec<Option<Artist>>> {
        assert!(token.starts_with("token-"));
        self.artist_batches.lock().unwrap().push(ids.to_vec());

        let running = self.artists_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_artists_in_flight.fetch_max(running, Ordering::SeqCst);
        if !self.artist_delay.is_zero() {
            tokio::time::sleep(self.artist_delay).await;
        }
        self.artists_in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(bad) = &self.fail_on_artist {
            if ids.contains(bad) {
                return Err(BandsError::ArtistFetch("502 Bad Gateway".to_string()));
            }
        }

        Ok(ids.iter().map(|id| self.artists.get(id).cloned()).collect())
    }
}

pub fn artist(id: &str) -> Artist {
    let mut extra = Map::new();
    extra.insert("popularity".to_string(), serde_json::json!(42));
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: vec!["post-rock".to_string()],
        extra,
    }
}

pub fn playlist(tracks: &[(&str, &str)]) -> PlaylistResponse {
    PlaylistResponse {
        id: PLAYLIST.to_string(),
        name: "Bands I want to see".to_string(),
        owner: PlaylistOwner {
            id: OWNER.to_string(),
        },
        tracks: PlaylistTracks {
            items: tracks
                .iter()
                .map(|(track_id, artists)| PlaylistItem {
                    track: Some(PlaylistTrack {
                        id: Some(track_id.to_string()),
                        name: format!("Track {}", track_id),
                        external_urls: HashMap::from([(
                            "spotify".to_string(),
                            format!("https://open.spotify.com/track/{}", track_id),
                        )]),
                        artists: artists
                            .split(',')
                            .filter(|a| !a.is_empty())
                            .map(|a| TrackArtist {
                                id: Some(a.to_string()),
                                name: format!("Artist {}", a),
                            })
                            .collect(),
                    }),
                })
                .collect(),
        },
    }
}

pub fn credentials() -> ClientCredentials {
    ClientCredentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
    }
}

pub fn source() -> PlaylistSource {
    PlaylistSource {
        owner_id: OWNER.to_string(),
        playlist_id: PLAYLIST.to_string(),
    }
}

pub fn aggregator(fake: Arc<FakeSpotify>, batch_size: usize) -> PlaylistAggregator {
    let api: Arc<dyn SpotifyApi> = fake;
    let tokens = Arc::new(TokenManager::new(Arc::clone(&api), credentials()));
    PlaylistAggregator::new(tokens, api, source(), batch_size)
}
