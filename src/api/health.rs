use axum::response::Json;
use serde_json::{Value, json};

/// Liveness check. Does not touch Spotify.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
