use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, Utc};

use crate::types::{BandTableRow, BandToSee};

/// Seconds shaved off every token lifetime to absorb clock skew and the
/// latency of requests already in flight.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 30;

pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

/// Instant after which a token granted at `now` must no longer be used.
///
/// Lifetimes shorter than the margin expire immediately.
pub fn token_expiry(now: DateTime<Utc>, expires_in_secs: u64, margin_secs: u64) -> DateTime<Utc> {
    let usable = i64::try_from(expires_in_secs.saturating_sub(margin_secs)).unwrap_or(i64::MAX);
    Duration::try_seconds(usable)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Splits `ids` into contiguous batches of at most `batch_size`, keeping order.
///
/// A `batch_size` of zero yields no batches.
pub fn partition_batches(ids: &[String], batch_size: usize) -> Vec<Vec<String>> {
    if batch_size == 0 {
        return Vec::new();
    }
    ids.chunks(batch_size).map(|chunk| chunk.to_vec()).collect()
}

pub fn band_table_rows(bands: &[BandToSee]) -> Vec<BandTableRow> {
    bands
        .iter()
        .map(|b| BandTableRow {
            track: b.track_title.clone(),
            artist: b
                .artist
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            genres: b
                .artist
                .as_ref()
                .map(|a| a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","))
                .unwrap_or_default(),
            url: b.external_urls.get("spotify").cloned().unwrap_or_default(),
        })
        .collect()
}
