use std::collections::HashMap;

use bandstosee::types::{Artist, BandToSee};
use bandstosee::utils::*;
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Map;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("id{}", i)).collect()
}

#[test]
fn test_basic_auth_header() {
    let header = basic_auth_header("client", "secret");

    assert!(header.starts_with("Basic "));
    let decoded = STANDARD.decode(&header["Basic ".len()..]).unwrap();
    assert_eq!(decoded, b"client:secret");
}

#[test]
fn test_token_expiry_subtracts_margin_in_seconds() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let expires = token_expiry(now, 3600, TOKEN_EXPIRY_MARGIN_SECS);

    assert_eq!(expires, now + Duration::seconds(3570));
}

#[test]
fn test_token_expiry_short_lifetime_expires_now() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(token_expiry(now, 10, 30), now);
    assert_eq!(token_expiry(now, 30, 30), now);
}

#[test]
fn test_token_expiry_saturates_on_huge_lifetime() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(token_expiry(now, u64::MAX, 30), DateTime::<Utc>::MAX_UTC);
}

#[test]
fn test_partition_batches_counts() {
    for (k, b) in [(0usize, 2usize), (1, 2), (2, 2), (3, 2), (7, 3), (10, 50)] {
        let batches = partition_batches(&ids(k), b);
        assert_eq!(batches.len(), k.div_ceil(b), "k={} b={}", k, b);
        assert!(batches.iter().all(|batch| !batch.is_empty() && batch.len() <= b));
    }
}

#[test]
fn test_partition_batches_preserves_order() {
    let input = ids(5);

    let flattened: Vec<String> = partition_batches(&input, 2).into_iter().flatten().collect();

    assert_eq!(flattened, input);
}

#[test]
fn test_partition_batches_zero_size() {
    assert!(partition_batches(&ids(3), 0).is_empty());
}

#[test]
fn test_band_table_rows() {
    let band = BandToSee {
        track_title: "Song".to_string(),
        source_track_id: "t1".to_string(),
        external_urls: HashMap::from([(
            "spotify".to_string(),
            "https://open.spotify.com/track/t1".to_string(),
        )]),
        primary_artist_id: "a1".to_string(),
        artist: Some(Artist {
            id: "a1".to_string(),
            name: "Mogwai".to_string(),
            genres: vec![
                "post-rock".to_string(),
                "scottish rock".to_string(),
                "instrumental".to_string(),
                "drone".to_string(),
            ],
            extra: Map::new(),
        }),
    };

    let rows = band_table_rows(&[band]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].track, "Song");
    assert_eq!(rows[0].artist, "Mogwai");
    assert_eq!(rows[0].genres, "post-rock,scottish rock,instrumental");
    assert_eq!(rows[0].url, "https://open.spotify.com/track/t1");
}
