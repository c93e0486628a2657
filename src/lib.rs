//! Moodic Relay Library
//!
//! This library provides a small backend relay between a mood-picking frontend
//! and the Spotify Web API. It logs users in with the OAuth 2.0
//! authorization-code flow, keeps the client secret server-side, and
//! translates mood labels into Spotify search, recommendation or playlist
//! queries.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served by the relay
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded from environment variables
//! - `error` - Error types and their HTTP representation
//! - `mood` - Mood and language vocabularies and query translation
//! - `recommend` - Mood proxy orchestrating translation, upstream calls and shaping
//! - `server` - Router construction and the listening server
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Response shaping helpers
//!
//! # Example
//!
//! ```
//! use moodic::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> moodic::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mood;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line glue where any error is reported and the
/// process exits. Library operations that reach HTTP clients return
/// [`error::ApiError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup and CLI errors. Request handlers report
/// failures through [`error::ApiError`] and must never call this.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as upstream failures or skipped items.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
