//! Configuration management for sporlink.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The hierarchy is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults (where applicable)
//!
//! Accessors report a missing or malformed value as [`Error::Config`] naming
//! the variable.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    error::{Error, Result},
    node::NodeOptions,
    resolver::ResolverOptions,
    spotify,
};

/// Path of the optional `.env` file.
///
/// - Linux: `~/.local/share/sporlink/.env`
/// - macOS: `~/Library/Application Support/sporlink/.env`
/// - Windows: `%LOCALAPPDATA%/sporlink/.env`
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlink/.env");
    path
}

/// Loads environment variables from the `.env` file in the local data
/// directory, creating the directory if needed.
///
/// A missing file is fine: the variables may already be set in the process
/// environment. Variables that are already set are not overridden.
///
/// # Errors
///
/// Returns [`Error::Config`] if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T> {
    match optional(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        None => Ok(default),
    }
}

fn flag(name: &str) -> Result<bool> {
    match optional(name).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(Error::Config(format!("{} must be a boolean, got {}", name, v))),
    }
}

/// `SPOTIFY_CLIENT_ID`, the application's client ID.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_CLIENT_ID")
}

/// `SPOTIFY_CLIENT_SECRET`, used for the client-credentials grant.
///
/// Keep it out of logs and version control.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_api_url() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| spotify::DEFAULT_API_URL.to_string())
}

/// `SPOTIFY_TOKEN_URL`, defaulting to `https://accounts.spotify.com/api/token`.
pub fn spotify_token_url() -> String {
    optional("SPOTIFY_TOKEN_URL").unwrap_or_else(|| spotify::DEFAULT_TOKEN_URL.to_string())
}

/// Node connection settings.
///
/// | Variable            | Default            |
/// |---------------------|--------------------|
/// | `LAVALINK_NAME`     | `main`             |
/// | `LAVALINK_HOST`     | `localhost`        |
/// | `LAVALINK_PORT`     | `2333`             |
/// | `LAVALINK_PASSWORD` | required           |
/// | `LAVALINK_SECURE`   | `false`            |
pub fn node_options() -> Result<NodeOptions> {
    Ok(NodeOptions {
        name: optional("LAVALINK_NAME").unwrap_or_else(|| "main".to_string()),
        host: optional("LAVALINK_HOST").unwrap_or_else(|| "localhost".to_string()),
        port: parsed("LAVALINK_PORT", 2333)?,
        password: required("LAVALINK_PASSWORD")?,
        secure: flag("LAVALINK_SECURE")?,
    })
}

/// Resolver behaviour.
///
/// | Variable                 | Default     |
/// |--------------------------|-------------|
/// | `PLAYLIST_LOAD_LIMIT`    | `0` (all)   |
/// | `USE_SPOTIFY_METADATA`   | `false`     |
/// | `AUDIO_ONLY_RESULTS`     | `false`     |
/// | `SEARCH_PREFIX`          | `ytsearch:` |
/// | `REQUEST_TIMEOUT_SECS`   | `10`        |
/// | `MAX_CONCURRENT_QUERIES` | `16`        |
pub fn resolver_options() -> Result<ResolverOptions> {
    let defaults = ResolverOptions::default();

    Ok(ResolverOptions {
        playlist_load_limit: parsed("PLAYLIST_LOAD_LIMIT", defaults.playlist_load_limit)?,
        use_spotify_metadata: flag("USE_SPOTIFY_METADATA")?,
        audio_only_results: flag("AUDIO_ONLY_RESULTS")?,
        search_prefix: optional("SEARCH_PREFIX").unwrap_or(defaults.search_prefix),
        request_timeout: Duration::from_secs(parsed(
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?),
        max_concurrent_queries: parsed(
            "MAX_CONCURRENT_QUERIES",
            defaults.max_concurrent_queries,
        )?,
    })
}
