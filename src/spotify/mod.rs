//! # Spotify Web API access
//!
//! Read-only access to the catalog endpoints the resolver needs:
//!
//! - `GET /tracks/{id}` - [`SpotifyApi::track`]
//! - `GET /albums/{id}` - [`SpotifyApi::album`]
//! - `GET /playlists/{id}` - [`SpotifyApi::playlist`]
//! - the opaque `next` URL of a playlist listing - [`SpotifyApi::playlist_page`]
//!
//! Every request carries `Authorization: Bearer {token}` where the token
//! comes from a [`auth::TokenProvider`]. Requests go through the shared
//! [`crate::http::Fetch`] transport. Obtaining the token and each request
//! attempt are both bounded by the configured request timeout.

pub mod auth;

mod albums;
mod playlists;
mod tracks;

use std::{sync::Arc, time::Duration};

use serde::de::DeserializeOwned;

use crate::{
    error::Result,
    http::{self, Fetch},
};
use auth::TokenProvider;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Clone)]
pub struct SpotifyApi {
    fetcher: Arc<dyn Fetch>,
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
    timeout: Duration,
}

impl SpotifyApi {
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        tokens: Arc<dyn TokenProvider>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            tokens,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let token = http::within(self.timeout, url, self.tokens.current_token()).await?;
        let authorization = format!("Bearer {}", token);
        let json = self
            .fetcher
            .get_json(url, &authorization, self.timeout)
            .await?;
        Ok(serde_json::from_value(json)?)
    }
}
