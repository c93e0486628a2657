//! Configuration management for the moodic relay.
//!
//! Configuration values come from environment variables, optionally seeded
//! from `.env` files. The values are read once at process start into a
//! [`Config`] which is handed to the router; nothing reads the environment
//! while requests are served.
//!
//! The lookup follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_RESULT_LIMIT: usize = 20;
/// Largest page size the Spotify search and recommendation endpoints accept.
pub const MAX_RESULT_LIMIT: usize = 50;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// How `/callback` hands the access token back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallbackMode {
    /// JSON body with the upstream token response and user profile.
    #[default]
    Json,
    /// `302` to the frontend URL with `?token=` appended.
    Redirect,
}

impl FromStr for CallbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(CallbackMode::Json),
            "redirect" => Ok(CallbackMode::Redirect),
            other => Err(format!(
                "unknown callback mode '{other}', expected json or redirect"
            )),
        }
    }
}

/// The mood proxy policy used by `/recommend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendMode {
    /// Free-text track search, one query per mood.
    #[default]
    Search,
    /// Genre seeds plus audio-feature bounds against `/recommendations`.
    Recommendations,
    /// Free-text playlist search, one query per mood.
    Playlists,
}

impl FromStr for RecommendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" | "tracks" => Ok(RecommendMode::Search),
            "recommendations" | "seeds" => Ok(RecommendMode::Recommendations),
            "playlists" | "playlist" => Ok(RecommendMode::Playlists),
            other => Err(format!(
                "unknown recommend mode '{other}', expected search, recommendations or playlists"
            )),
        }
    }
}

impl fmt::Display for RecommendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendMode::Search => "search",
            RecommendMode::Recommendations => "recommendations",
            RecommendMode::Playlists => "playlists",
        };
        f.write_str(name)
    }
}

/// Process-wide configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub frontend_url: Option<String>,
    pub callback_mode: CallbackMode,
    pub recommend_mode: RecommendMode,
    pub filter_unplayable: bool,
    pub result_limit: usize,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Creates a configuration with the given credentials and defaults for
    /// everything else.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            frontend_url: None,
            callback_mode: CallbackMode::default(),
            recommend_mode: RecommendMode::default(),
            filter_unplayable: true,
            result_limit: DEFAULT_RESULT_LIMIT,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for absent credentials and
    /// [`ConfigError::Invalid`] for values that do not parse or contradict
    /// each other (redirect callbacks without a frontend URL).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            required("SPOTIFY_API_REDIRECT_URI")?,
        );

        if let Some(scope) = optional("SPOTIFY_API_AUTH_SCOPE") {
            config.scope = scope;
        }
        if let Some(url) = optional("SPOTIFY_API_AUTH_URL") {
            config.auth_url = url;
        }
        if let Some(url) = optional("SPOTIFY_API_TOKEN_URL") {
            config.token_url = url;
        }
        if let Some(url) = optional("SPOTIFY_API_URL") {
            config.api_url = url;
        }
        if let Some(addr) = optional("SERVER_ADDRESS") {
            config.server_addr = addr;
        }
        config.frontend_url = optional("MOODIC_FRONTEND_URL");

        if let Some(mode) = parsed::<CallbackMode>("MOODIC_CALLBACK_MODE")? {
            config.callback_mode = mode;
        }
        if let Some(mode) = parsed::<RecommendMode>("MOODIC_RECOMMEND_MODE")? {
            config.recommend_mode = mode;
        }
        if let Some(filter) = parsed::<bool>("MOODIC_FILTER_UNPLAYABLE")? {
            config.filter_unplayable = filter;
        }
        if let Some(limit) = parsed::<usize>("MOODIC_RESULT_LIMIT")? {
            config.result_limit = limit;
        }
        if let Some(secs) = parsed::<u64>("MOODIC_UPSTREAM_TIMEOUT_SECS")? {
            config.upstream_timeout = Duration::from_secs(secs);
        }

        config.validate()
    }

    /// Checks cross-field constraints and clamps the result limit.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.result_limit = self.result_limit.clamp(1, MAX_RESULT_LIMIT);

        for (name, value) in [
            ("SPOTIFY_API_AUTH_URL", &self.auth_url),
            ("SPOTIFY_API_TOKEN_URL", &self.token_url),
            ("SPOTIFY_API_URL", &self.api_url),
        ] {
            if let Err(e) = Url::parse(value) {
                return Err(ConfigError::Invalid {
                    name,
                    value: value.clone(),
                    reason: e.to_string(),
                });
            }
        }

        match (&self.frontend_url, self.callback_mode) {
            (Some(url), _) => {
                if let Err(e) = Url::parse(url) {
                    return Err(ConfigError::Invalid {
                        name: "MOODIC_FRONTEND_URL",
                        value: url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            (None, CallbackMode::Redirect) => {
                return Err(ConfigError::Invalid {
                    name: "MOODIC_CALLBACK_MODE",
                    value: "redirect".to_string(),
                    reason: "MOODIC_FRONTEND_URL must be set for redirect callbacks".to_string(),
                });
            }
            (None, CallbackMode::Json) => {}
        }

        Ok(self)
    }

    /// Joins a Web API path onto the configured API base URL.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.api_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }
}

/// Loads environment variables from `.env` files.
///
/// Reads `./.env` first and then `moodic/.env` in the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/moodic/.env`
/// - macOS: `~/Library/Application Support/moodic/.env`
/// - Windows: `%LOCALAPPDATA%/moodic/.env`
///
/// Both files are optional. Variables already present in the environment
/// are never overwritten.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodic/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional(name)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::Invalid {
                name,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
