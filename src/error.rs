//! Error type shared by the resolution pipeline.
//!
//! None of these errors cross the public resolution calls: the resolver logs
//! them and degrades to a `NO_MATCHES` result, a partial track list or a
//! dropped track. They do surface from the lower-level building blocks
//! (transport, token providers, URL parsing, configuration).

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { status: StatusCode, url: String },

    #[error("Request to {0} timed out")]
    Timeout(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Not a Spotify track, album or playlist URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No node has been added to the client")]
    NoNodes,
}

