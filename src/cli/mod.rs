//! # CLI Module
//!
//! Command-line entry points of the `moodic` binary. Each command delegates
//! to the library layers and handles user-facing output:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Relay Layer (server, recommend, mood)
//!     ↓
//! Spotify Integration (spotify)
//! ```
//!
//! - [`serve`] - Runs the relay, optionally opening `/login` in the browser
//! - [`moods`] - Prints the mood vocabulary
//! - [`translate`] - Shows how a mood selection translates, offline
//! - [`recommend`] - Runs the mood proxy once and prints the results
//!
//! Fatal problems are reported with the `error!` macro, which exits.

mod moods;
mod recommend;
mod serve;

pub use moods::moods;
pub use moods::translate;
pub use recommend::recommend;
pub use serve::serve;
