//! # API Module
//!
//! HTTP endpoints served by the moodic relay.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the user agent to the Spotify authorization page.
//! - [`callback`] - Completes the authorization-code flow by exchanging the
//!   code for an access token and handing it back to the client, either as
//!   JSON or as a redirect to the frontend.
//!
//! ### Mood proxy
//!
//! - [`recommend`] - Translates a mood selection into Spotify queries and
//!   returns simplified track or playlist records.
//!
//! ### Monitoring
//!
//! - [`index`] - Liveness string.
//! - [`health`] - Status and version as JSON.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::{get, post}};
//! use moodic::api;
//!
//! let app = Router::new()
//!     .route("/login", get(api::login))
//!     .route("/callback", get(api::callback))
//!     .route("/recommend", post(api::recommend))
//!     .layer(Extension(state));
//! ```
//!
//! Handlers never panic on bad input or upstream failures; they answer with
//! an [`crate::error::ApiError`] rendered as JSON.

mod callback;
mod health;
mod login;
mod recommend;

pub use callback::callback;
pub use health::{health, index};
pub use login::login;
pub use recommend::recommend;
