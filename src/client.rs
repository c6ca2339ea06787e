use std::sync::Arc;

use crate::{
    entity,
    error::{Error, Result},
    http::{Fetch, HttpFetcher},
    node::{Node, NodeOptions},
    resolver::ResolverOptions,
    spotify::{self, SpotifyApi, auth::TokenProvider},
    types::LoadResult,
};

/// Entry point for hosts: shared Spotify access and options, plus the nodes
/// Spotify links are resolved against.
///
/// ```rust,ignore
/// let tokens = Arc::new(ClientCredentials::new(id, secret, DEFAULT_TOKEN_URL));
/// let mut client = Client::new(tokens, ResolverOptions::default());
/// client.add_node(NodeOptions { name: "main".into(), host: "localhost".into(), port: 2333, password: "youshallnotpass".into(), secure: false });
///
/// let result = client.load("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC").await?;
/// ```
pub struct Client {
    spotify: SpotifyApi,
    fetcher: Arc<dyn Fetch>,
    options: ResolverOptions,
    nodes: Vec<Node>,
}

impl Client {
    pub fn new(tokens: Arc<dyn TokenProvider>, options: ResolverOptions) -> Self {
        Self::with_fetcher(
            tokens,
            Arc::new(HttpFetcher::default()),
            spotify::DEFAULT_API_URL,
            options,
        )
    }

    pub fn with_fetcher(
        tokens: Arc<dyn TokenProvider>,
        fetcher: Arc<dyn Fetch>,
        spotify_api_url: &str,
        options: ResolverOptions,
    ) -> Self {
        let spotify = SpotifyApi::new(
            Arc::clone(&fetcher),
            tokens,
            spotify_api_url,
            options.request_timeout,
        );

        Self {
            spotify,
            fetcher,
            options,
            nodes: Vec::new(),
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Registers a node. A node with the same name replaces the earlier one,
    /// dropping its cache.
    pub fn add_node(&mut self, options: NodeOptions) -> &mut Self {
        let node = Node::new(
            options,
            self.spotify.clone(),
            Arc::clone(&self.fetcher),
            self.options.clone(),
        );

        match self.nodes.iter().position(|n| n.name() == node.name()) {
            Some(i) => self.nodes[i] = node,
            None => self.nodes.push(node),
        }
        self
    }

    pub fn add_nodes(&mut self, options: Vec<NodeOptions>) -> &mut Self {
        for node in options {
            self.add_node(node);
        }
        self
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// First registered node. Nodes are not health-checked or balanced.
    pub fn ideal_node(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn is_valid_url(&self, url: &str) -> bool {
        entity::is_valid_url(url)
    }

    /// Loads `url` through [`Client::ideal_node`]. The only error is having no
    /// node at all; every resolution problem is reported inside the result.
    pub async fn load(&self, url: &str) -> Result<LoadResult> {
        let node = self.ideal_node().ok_or(Error::NoNodes)?;
        Ok(node.load(url).await)
    }
}
