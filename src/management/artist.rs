use std::{collections::HashMap, sync::Arc};

use futures::future::try_join_all;

use crate::{
    error::{BandsError, Result},
    info,
    spotify::SpotifyApi,
    types::Artist,
    utils, warning,
};

/// Resolves artist ids to full artist objects in fixed-size batches.
pub struct ArtistBatchFetcher {
    api: Arc<dyn SpotifyApi>,
}

impl ArtistBatchFetcher {
    pub fn new(api: Arc<dyn SpotifyApi>) -> Self {
        ArtistBatchFetcher { api }
    }

    /// Fetches every artist in `ids`, `batch_size` ids per request.
    ///
    /// All batch requests are started together and awaited together. The
    /// result maps each requested id to its artist.
    ///
    /// # Errors
    ///
    /// [`BandsError::ArtistFetch`] if `batch_size` is zero, if any batch
    /// fails, or if Spotify does not return an artist for one of the ids.
    /// Nothing from the successful batches is returned in that case.
    pub async fn fetch_artists(
        &self,
        token: &str,
        ids: &[String],
        batch_size: usize,
    ) -> Result<HashMap<String, Artist>> {
        if batch_size == 0 {
            return Err(BandsError::ArtistFetch(
                "batch size must be positive".to_string(),
            ));
        }

        let batches = utils::partition_batches(ids, batch_size);
        info!(
            "Requesting {} artists in {} batches",
            ids.len(),
            batches.len()
        );

        let responses = try_join_all(batches.iter().map(|batch| self.fetch_batch(token, batch)))
            .await
            .map_err(|e| {
                warning!("One or more of the artist requests failed: {}", e);
                e
            })?;

        let mut artists: HashMap<String, Artist> = HashMap::with_capacity(ids.len());
        for batch in responses {
            artists.extend(batch);
        }

        if let Some(missing) = ids.iter().find(|id| !artists.contains_key(*id)) {
            return Err(BandsError::ArtistFetch(format!(
                "No artist returned for id {}",
                missing
            )));
        }

        Ok(artists)
    }

    async fn fetch_batch(&self, token: &str, batch: &[String]) -> Result<HashMap<String, Artist>> {
        let found = self
            .api
            .get_artists_by_ids(token, batch)
            .await
            .map_err(|e| match e {
                BandsError::ArtistFetch(_) => e,
                other => BandsError::ArtistFetch(other.to_string()),
            })?;

        if found.len() != batch.len() {
            return Err(BandsError::ArtistFetch(format!(
                "Expected {} artists in batch, got {}",
                batch.len(),
                found.len()
            )));
        }

        // Keyed by the requested id: relinked artists come back under a
        // different canonical id.
        Ok(batch
            .iter()
            .cloned()
            .zip(found)
            .filter_map(|(id, artist)| artist.map(|artist| (id, artist)))
            .collect())
    }
}
