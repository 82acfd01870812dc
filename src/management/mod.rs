mod artist;
mod auth;
mod playlist;

pub use artist::ArtistBatchFetcher;
pub use auth::TokenManager;
pub use playlist::ArtistIndex;
pub use playlist::PlaylistAggregator;
pub use playlist::attach_artists;
pub use playlist::index_playlist;
