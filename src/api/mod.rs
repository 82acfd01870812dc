//! # API Module
//!
//! HTTP endpoints served by the bands-to-see service.
//!
//! ## Endpoints
//!
//! - [`bands`] - `GET /userdata`. Runs one aggregation and returns the bands
//!   list as JSON. Any failure becomes a 500 with `{"Err": "..."}`; callers
//!   are not told which stage failed.
//! - [`health`] - `GET /health`. Status and crate version for monitoring.
//!
//! Handlers get the shared [`crate::management::PlaylistAggregator`] through
//! an axum `Extension` layer set up in [`crate::server`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use bandstosee::api::{bands, health};
//!
//! let app = Router::new()
//!     .route("/userdata", get(bands).layer(Extension(aggregator)))
//!     .route("/health", get(health));
//! ```

mod bands;
mod health;

pub use bands::FAILURE_MESSAGE;
pub use bands::bands;
pub use health::health;
