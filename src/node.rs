use std::{sync::Arc, time::Duration};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    entity::EntityRef,
    error::{Error, Result},
    http::Fetch,
    resolver::{Resolver, ResolverOptions},
    spotify::SpotifyApi,
    types::LoadResult,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeOptions {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub password: String,
    #[serde(default)]
    pub secure: bool,
}

impl NodeOptions {
    pub fn base_url(&self) -> String {
        format!(
            "http{}://{}:{}",
            if self.secure { "s" } else { "" },
            self.host,
            self.port
        )
    }
}

/// Search access to a single audio node.
#[derive(Clone)]
pub struct NodeConnection {
    options: NodeOptions,
    fetcher: Arc<dyn Fetch>,
    timeout: Duration,
}

impl NodeConnection {
    pub fn new(options: NodeOptions, fetcher: Arc<dyn Fetch>, timeout: Duration) -> Self {
        Self {
            options,
            fetcher,
            timeout,
        }
    }

    pub fn options(&self) -> &NodeOptions {
        &self.options
    }

    /// `GET /loadtracks?identifier=...` on the node, authenticated with the
    /// node password.
    pub async fn load_tracks(&self, identifier: &str) -> Result<LoadResult> {
        let url = Url::parse_with_params(
            &format!("{}/loadtracks", self.options.base_url()),
            &[("identifier", identifier)],
        )
        .map_err(|e| Error::Config(format!("invalid node address: {}", e)))?;

        let json = self
            .fetcher
            .get_json(url.as_str(), &self.options.password, self.timeout)
            .await?;

        Ok(serde_json::from_value(json)?)
    }
}

/// A node together with the resolver that translates Spotify links into
/// searches against it. Each node keeps its own track cache.
pub struct Node {
    resolver: Resolver,
}

impl Node {
    pub fn new(
        options: NodeOptions,
        spotify: SpotifyApi,
        fetcher: Arc<dyn Fetch>,
        resolver_options: ResolverOptions,
    ) -> Self {
        let connection = NodeConnection::new(options, fetcher, resolver_options.request_timeout);
        Self {
            resolver: Resolver::new(spotify, connection, resolver_options),
        }
    }

    pub fn name(&self) -> &str {
        &self.options().name
    }

    pub fn options(&self) -> &NodeOptions {
        self.resolver.node().options()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Loads a Spotify URL into a Lavalink-style response. Links that are not
    /// a Spotify track, album or playlist yield `LOAD_FAILED`.
    pub async fn load(&self, url: &str) -> LoadResult {
        match EntityRef::parse(url) {
            Ok(entity) => self.resolver.resolve(&entity).await,
            Err(e) => {
                warn!(url, "cannot load: {}", e);
                LoadResult::load_failed(e.to_string())
            }
        }
    }

    /// Raw node search, bypassing Spotify entirely.
    pub async fn load_tracks(&self, identifier: &str) -> Result<LoadResult> {
        self.resolver.node().load_tracks(identifier).await
    }
}
