use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;

/// Access credential issued by the client-credentials grant.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
}

/// Full artist object as returned by the artists endpoint.
///
/// Only the fields this crate reads are typed; everything else Spotify sends
/// (followers, images, popularity, ...) is kept in `extra` and serialized back
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub owner: PlaylistOwner,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// One playlist track reduced to what the bands list needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub title: String,
    pub source_track_id: String,
    pub external_urls: HashMap<String, String>,
    pub primary_artist_id: String,
}

/// A playlist track with its primary artist attached.
///
/// Serializes with the field names the service has always exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandToSee {
    #[serde(rename = "trackTitle")]
    pub track_title: String,
    #[serde(rename = "sourceTrackID")]
    pub source_track_id: String,
    pub external_urls: HashMap<String, String>,
    #[serde(skip)]
    pub primary_artist_id: String,
    pub artist: Option<Artist>,
}

impl From<TrackRecord> for BandToSee {
    fn from(record: TrackRecord) -> Self {
        BandToSee {
            track_title: record.title,
            source_track_id: record.source_track_id,
            external_urls: record.external_urls,
            primary_artist_id: record.primary_artist_id,
            artist: None,
        }
    }
}

#[derive(Tabled)]
pub struct BandTableRow {
    pub track: String,
    pub artist: String,
    pub genres: String,
    pub url: String,
}
