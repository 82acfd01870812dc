use crate::{
    error::{BandsError, Result},
    spotify::SpotifyClient,
    types::PlaylistResponse,
};

impl SpotifyClient {
    /// Retrieves a playlist and the first page of its tracks.
    ///
    /// Spotify addresses playlists by id alone; `owner_id` is checked against
    /// the owner in the response so a misconfigured id does not silently
    /// serve somebody else's playlist.
    pub async fn fetch_playlist(
        &self,
        token: &str,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<PlaylistResponse> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}",
            uri = &self.api_url,
            playlist_id = playlist_id
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BandsError::PlaylistFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| BandsError::PlaylistFetch(e.to_string()))?;

        let playlist = response
            .json::<PlaylistResponse>()
            .await
            .map_err(|e| BandsError::PlaylistFetch(format!("Malformed playlist response: {}", e)))?;

        if playlist.owner.id != owner_id {
            return Err(BandsError::PlaylistFetch(format!(
                "Playlist {} is owned by {}, expected {}",
                playlist_id, playlist.owner.id, owner_id
            )));
        }

        Ok(playlist)
    }
}
