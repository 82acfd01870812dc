use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{cli::build_aggregator, config::Settings, error, success, utils, warning};

pub async fn bands(settings: Settings, json: bool) {
    let (_, aggregator) = match build_aggregator(&settings) {
        Ok(built) => built,
        Err(e) => error!("Cannot set up Spotify client. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching bands to see...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = aggregator.get_bands_to_see().await;
    pb.finish_and_clear();

    let bands = match result {
        Ok(bands) => bands,
        Err(e) => error!("Failed to get the bands to see. Err: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&bands) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize bands. Err: {}", e),
        }
        return;
    }

    if bands.is_empty() {
        warning!("The source playlist has no tracks");
        return;
    }

    let table = Table::new(utils::band_table_rows(&bands));
    println!("{}", table);
    success!("{} bands to see", bands.len());
}
