//! Spotify to Lavalink resolver library
//!
//! Turns Spotify track, album and playlist links into Lavalink
//! `/loadtracks`-shaped responses, so a player can treat a Spotify link like a
//! native search. Each Spotify track is searched on an audio node by artist
//! and title; the first candidate wins and is cached per node.
//!
//! # Modules
//!
//! - `cache` - Per-node cache of resolved tracks with per-key locking
//! - `cli` - Command-line interface implementations
//! - `client` - Multi-node entry point for hosts
//! - `config` - Configuration from environment variables and `.env`
//! - `entity` - Spotify URL / URI parsing
//! - `error` - Error type for the lower-level building blocks
//! - `http` - Transport abstraction and the `reqwest` implementation
//! - `node` - Node connection settings and `/loadtracks` search
//! - `resolver` - The resolution pipeline
//! - `spotify` - Spotify Web API catalog access and token providers
//! - `types` - Spotify and Lavalink data structures
//! - `utils` - Small formatting helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sporlink::{client::Client, config, spotify::auth::ClientCredentials};
//!
//! #[tokio::main]
//! async fn main() -> sporlink::Res<()> {
//!     config::load_env().await?;
//!     let tokens = ClientCredentials::new(
//!         config::spotify_client_id()?,
//!         config::spotify_client_secret()?,
//!         config::spotify_token_url(),
//!     );
//!     let mut client = Client::new(Arc::new(tokens), config::resolver_options()?);
//!     client.add_node(config::node_options()?);
//!
//!     let result = client.load("spotify:album:1DFixLWuPkv3KT3TnV35m3").await?;
//!     println!("{} tracks", result.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod node;
pub mod resolver;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// A convenient Result type alias for top-level plumbing.
///
/// Boxes any error behind `dyn Error + Send + Sync`, which lets binaries and
/// hosts mix this crate's [`Error`] with their own with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Resolving {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary; library code never calls it.
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
/// # Example
///
/// ```
/// warning!("No matches for {}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
