use std::{collections::HashMap, sync::Arc};

use crate::{
    config::PlaylistSource,
    error::{BandsError, Result},
    management::{ArtistBatchFetcher, TokenManager},
    spotify::SpotifyApi,
    success,
    types::{Artist, BandToSee, PlaylistResponse, TrackRecord},
    warning,
};

/// Positions in the bands list that each artist id appears at.
///
/// Artist ids keep the order in which they were first seen, so the ids sent
/// to Spotify follow playlist order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtistIndex {
    order: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
}

impl ArtistIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, artist_id: &str, position: usize) {
        match self.positions.get_mut(artist_id) {
            Some(positions) => positions.push(position),
            None => {
                self.order.push(artist_id.to_string());
                self.positions.insert(artist_id.to_string(), vec![position]);
            }
        }
    }

    /// Unique artist ids in first-seen order.
    pub fn artist_ids(&self) -> &[String] {
        &self.order
    }

    pub fn positions(&self, artist_id: &str) -> Option<&[usize]> {
        self.positions.get(artist_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.order
            .iter()
            .filter_map(|id| self.positions(id).map(|p| (id.as_str(), p)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Builds the bands-to-see list from the configured playlist.
pub struct PlaylistAggregator {
    tokens: Arc<TokenManager>,
    api: Arc<dyn SpotifyApi>,
    fetcher: ArtistBatchFetcher,
    source: PlaylistSource,
    batch_size: usize,
}

impl PlaylistAggregator {
    pub fn new(
        tokens: Arc<TokenManager>,
        api: Arc<dyn SpotifyApi>,
        source: PlaylistSource,
        batch_size: usize,
    ) -> Self {
        PlaylistAggregator {
            tokens,
            fetcher: ArtistBatchFetcher::new(Arc::clone(&api)),
            api,
            source,
            batch_size,
        }
    }

    /// Returns one entry per playlist track, in playlist order, each with
    /// its primary artist attached.
    ///
    /// Either every entry carries an artist or the whole call fails; partial
    /// lists are never returned.
    pub async fn get_bands_to_see(&self) -> Result<Vec<BandToSee>> {
        let token = self.tokens.ensure_valid().await.map_err(|e| {
            warning!("Unable to get bands to see as failed to authenticate with Spotify");
            e
        })?;

        let playlist = self
            .api
            .get_playlist(&token, &self.source.owner_id, &self.source.playlist_id)
            .await
            .map_err(|e| {
                warning!("Failed to fetch playlist {}: {}", self.source.playlist_id, e);
                match e {
                    BandsError::PlaylistFetch(_) => e,
                    other => BandsError::PlaylistFetch(other.to_string()),
                }
            })?;

        let (mut bands, index) = index_playlist(&playlist)?;
        if bands.is_empty() {
            return Ok(bands);
        }

        let artists = self
            .fetcher
            .fetch_artists(&token, index.artist_ids(), self.batch_size)
            .await
            .map_err(|e| {
                warning!("Unable to get artist data for tracks");
                e
            })?;

        attach_artists(&mut bands, &index, &artists)?;

        success!("Resolved {} bands from {} artists", bands.len(), index.len());
        Ok(bands)
    }
}

/// Turns playlist tracks into band records and indexes them by primary
/// artist.
///
/// Only the first listed artist of a track is used. Entries without a track,
/// a track id, or an artist id make the playlist unusable, since dropping
/// them would break the one-entry-per-track guarantee.
pub fn index_playlist(playlist: &PlaylistResponse) -> Result<(Vec<BandToSee>, ArtistIndex)> {
    let mut bands = Vec::with_capacity(playlist.tracks.items.len());
    let mut index = ArtistIndex::new();

    for (position, item) in playlist.tracks.items.iter().enumerate() {
        let track = item.track.as_ref().ok_or_else(|| {
            BandsError::PlaylistFetch(format!("Playlist entry {} has no track", position))
        })?;

        let source_track_id = track.id.clone().ok_or_else(|| {
            BandsError::PlaylistFetch(format!("Track '{}' has no id", track.name))
        })?;

        let primary_artist_id = track
            .artists
            .first()
            .and_then(|a| a.id.clone())
            .ok_or_else(|| {
                BandsError::PlaylistFetch(format!("Track '{}' has no artist id", track.name))
            })?;

        index.record(&primary_artist_id, position);
        bands.push(BandToSee::from(TrackRecord {
            title: track.name.clone(),
            source_track_id,
            external_urls: track.external_urls.clone(),
            primary_artist_id,
        }));
    }

    Ok((bands, index))
}

/// Copies each resolved artist onto every band that references it.
pub fn attach_artists(
    bands: &mut [BandToSee],
    index: &ArtistIndex,
    artists: &HashMap<String, Artist>,
) -> Result<()> {
    for (artist_id, positions) in index.iter() {
        let artist = artists.get(artist_id).ok_or_else(|| {
            BandsError::ArtistFetch(format!("No artist returned for id {}", artist_id))
        })?;

        for &position in positions {
            let band = bands.get_mut(position).ok_or_else(|| {
                BandsError::ArtistFetch(format!("Band position {} out of range", position))
            })?;
            band.artist = Some(artist.clone());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaylistItem, PlaylistOwner, PlaylistTrack, PlaylistTracks, TrackArtist};

    fn track(id: &str, artists: &[&str]) -> PlaylistItem {
        PlaylistItem {
            track: Some(PlaylistTrack {
                id: Some(id.to_string()),
                name: format!("Song {}", id),
                external_urls: HashMap::new(),
                artists: artists
                    .iter()
                    .map(|a| TrackArtist {
                        id: Some(a.to_string()),
                        name: a.to_string(),
                    })
                    .collect(),
            }),
        }
    }

    fn playlist(items: Vec<PlaylistItem>) -> PlaylistResponse {
        PlaylistResponse {
            id: "pl".to_string(),
            name: "Bands".to_string(),
            owner: PlaylistOwner {
                id: "owner".to_string(),
            },
            tracks: PlaylistTracks { items },
        }
    }

    #[test]
    fn index_groups_positions_by_first_artist() {
        let p = playlist(vec![
            track("t1", &["A", "X"]),
            track("t2", &["A"]),
            track("t3", &["B", "A"]),
        ]);

        let (bands, index) = index_playlist(&p).unwrap();

        assert_eq!(bands.len(), 3);
        assert_eq!(index.artist_ids(), &["A".to_string(), "B".to_string()]);
        assert_eq!(index.positions("A"), Some(&[0usize, 1][..]));
        assert_eq!(index.positions("B"), Some(&[2usize][..]));
        assert_eq!(index.positions("X"), None);
        assert!(bands.iter().all(|b| b.artist.is_none()));
    }

    #[test]
    fn track_without_artist_fails_the_playlist() {
        let p = playlist(vec![track("t1", &["A"]), track("t2", &[])]);
        assert!(matches!(
            index_playlist(&p),
            Err(BandsError::PlaylistFetch(_))
        ));
    }

    #[test]
    fn removed_track_fails_the_playlist() {
        let p = playlist(vec![PlaylistItem { track: None }]);
        assert!(matches!(
            index_playlist(&p),
            Err(BandsError::PlaylistFetch(_))
        ));
    }

    #[test]
    fn attach_fails_when_an_artist_is_missing() {
        let p = playlist(vec![track("t1", &["A"])]);
        let (mut bands, index) = index_playlist(&p).unwrap();

        let result = attach_artists(&mut bands, &index, &HashMap::new());

        assert!(matches!(result, Err(BandsError::ArtistFetch(_))));
    }
}
