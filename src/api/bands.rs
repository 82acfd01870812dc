use std::sync::Arc;

use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{info, management::PlaylistAggregator, success, warning};

pub const FAILURE_MESSAGE: &str = "It would appear that this failed.";

pub async fn bands(Extension(aggregator): Extension<Arc<PlaylistAggregator>>) -> Response {
    info!("GET request received at /userdata");

    match aggregator.get_bands_to_see().await {
        Ok(bands) => {
            success!("Retrieved artists successfully");
            Json(bands).into_response()
        }
        Err(e) => {
            warning!("Failed to get the artists: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "Err": FAILURE_MESSAGE })),
            )
                .into_response()
        }
    }
}
