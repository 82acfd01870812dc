use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{Res, api, info, management::PlaylistAggregator};

pub fn router(aggregator: Arc<PlaylistAggregator>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/userdata", get(api::bands).layer(Extension(aggregator)))
}

pub async fn start_api_server(aggregator: Arc<PlaylistAggregator>, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(aggregator)).await?;
    Ok(())
}
