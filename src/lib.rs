//! Bands To See
//!
//! Reads a curated Spotify playlist of bands, resolves the primary artist of
//! every track to a full artist object, and serves the combined list over
//! HTTP.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (`/userdata`, `/health`)
//! - `cli` - Command implementations for the binary
//! - `config` - Environment loading and [`config::Settings`]
//! - `error` - The [`error::BandsError`] type
//! - `management` - Token lifecycle, artist batching and playlist aggregation
//! - `server` - axum router and listener
//! - `spotify` - The [`spotify::SpotifyApi`] trait and its HTTP client
//! - `types` - Wire and domain data structures
//! - `utils` - Small pure helpers
//!
//! # Example
//!
//! ```
//! use bandstosee::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> bandstosee::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     cli::serve(settings).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::BandsError;

/// A convenient Result type alias for binary-level glue code.
///
/// Library operations return [`error::Result`]; this boxed form is used where
/// errors of different kinds (I/O, address parsing, [`BandsError`]) meet.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line with a blue `o` marker.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("GET request received at /userdata");
/// info!("Requesting {} artists in {} batches", ids, batches);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line with a red `!` and exits with status 1.
///
/// Only for unrecoverable setup failures in the binary. Request handling
/// never calls this; it logs with [`warning!`] and returns an error instead.
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line with a yellow `!`.
///
/// Used for failures that end one request or one attempt but not the
/// process, such as a failed token grant or artist batch.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
