use crate::{
    error::{BandsError, Result},
    spotify::SpotifyClient,
    types::{Artist, SeveralArtistsResponse},
};

impl SpotifyClient {
    /// Retrieves full artist objects for up to 50 ids in one request.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `ids` - Spotify artist ids, sent comma separated
    ///
    /// # Returns
    ///
    /// One entry per requested id, in request order. Spotify answers `null`
    /// for ids it does not know, which shows up here as `None`.
    pub async fn fetch_several_artists(
        &self,
        token: &str,
        ids: &[String],
    ) -> Result<Vec<Option<Artist>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let api_url = format!("{uri}/artists", uri = &self.api_url);

        let response = self
            .http
            .get(&api_url)
            .query(&[("ids", ids.join(","))])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BandsError::ArtistFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| BandsError::ArtistFetch(e.to_string()))?;

        let res = response
            .json::<SeveralArtistsResponse>()
            .await
            .map_err(|e| BandsError::ArtistFetch(format!("Malformed artists response: {}", e)))?;

        Ok(res.artists)
    }
}
