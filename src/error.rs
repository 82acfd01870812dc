use thiserror::Error;

/// Errors produced while assembling the bands-to-see list.
///
/// Each variant names the stage that failed. The HTTP layer maps all of them
/// to the same generic 500 response, so the message is only meant for logs.
#[derive(Error, Debug)]
pub enum BandsError {
    /// The client-credentials grant failed or returned an unusable token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The source playlist could not be retrieved or was malformed.
    #[error("Playlist fetch failed: {0}")]
    PlaylistFetch(String),

    /// One or more artist batch requests failed.
    #[error("Artist fetch failed: {0}")]
    ArtistFetch(String),

    /// Missing or malformed configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BandsError>;
