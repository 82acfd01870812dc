use crate::{cli::build_aggregator, config::Settings, error, info, server, success, warning};

pub async fn serve(settings: Settings) {
    let (tokens, aggregator) = match build_aggregator(&settings) {
        Ok(built) => built,
        Err(e) => error!("Cannot set up Spotify client. Err: {}", e),
    };

    // Get a token up front so the first request does not pay for it.
    match tokens.ensure_valid().await {
        Ok(_) => success!("Authenticated with Spotify"),
        Err(e) => warning!(
            "Initial authentication failed, will retry on first request. Err: {}",
            e
        ),
    }

    info!(
        "Serving playlist {} owned by {}",
        settings.playlist.playlist_id, settings.playlist.owner_id
    );

    if let Err(e) = server::start_api_server(aggregator, &settings.server_addr).await {
        error!("Server stopped. Err: {}", e);
    }
}
