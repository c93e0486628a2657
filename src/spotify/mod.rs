//! # Spotify Integration Module
//!
//! Thin client for the two Spotify services the relay talks to:
//!
//! ```text
//! Relay handlers (api, recommend)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization URL, code exchange, profile)
//!     ├── Search (tracks, playlists)
//!     └── Recommendations (genre seeds, audio-feature bounds)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! All calls share one pooled [`reqwest::Client`] with a per-request
//! timeout. Nothing retries: a non-success status is surfaced to the caller
//! as [`ApiError::Upstream`] with the upstream body attached, and transport
//! failures (including timeouts) as [`ApiError::Transport`].

pub mod auth;
pub mod recommendations;
pub mod search;

use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, error::ApiError, utils, warning};

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
}

impl SpotifyClient {
    /// Builds the shared HTTP client with the configured upstream timeout.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Issues an authenticated GET against the Web API and returns the JSON
    /// body.
    pub async fn get_json<Q>(&self, url: &str, token: &str, query: &Q) -> Result<Value, ApiError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warning!("Spotify API {} responded with {}", url, status);
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                details: utils::body_to_value(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Upstream {
            status: status.as_u16(),
            details: Value::String(format!("invalid JSON from Spotify: {e}")),
        })
    }
}
