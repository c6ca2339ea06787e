#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::{Value, json};

use sporlink::{
    error::{Error, Result},
    http::{self, Fetch},
    node::{NodeConnection, NodeOptions},
    resolver::{Resolver, ResolverOptions},
    spotify::{SpotifyApi, auth::StaticToken},
};

pub const SPOTIFY: &str = "https://spotify.test/v1";
pub const NODE_PASSWORD: &str = "youshallnotpass";
pub const TOKEN: &str = "test-token";

/// In-memory stand-in for the HTTP transport. Spotify requests are answered by
/// full URL, node searches by their decoded `identifier` parameter.
#[derive(Default)]
pub struct FakeFetcher {
    spotify: Mutex<HashMap<String, Value>>,
    searches: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn spotify(&self, path: &str, body: Value) {
        self.spotify
            .lock()
            .unwrap()
            .insert(format!("{}/{}", SPOTIFY, path), body);
    }

    pub fn search(&self, identifier: &str, tracks: Vec<Value>) {
        self.searches
            .lock()
            .unwrap()
            .insert(identifier.to_string(), tracks);
    }

    /// Makes the request for `key` (Spotify path or search identifier) fail.
    pub fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub fn delay(&self, key: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(key.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, key: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == key).count()
    }

    fn key_for(url: &str) -> (String, bool) {
        if let Some(path) = url.strip_prefix(&format!("{}/", SPOTIFY)) {
            return (path.to_string(), false);
        }

        let identifier = Url::parse(url)
            .ok()
            .and_then(|u| {
                u.query_pairs()
                    .find(|(k, _)| k == "identifier")
                    .map(|(_, v)| v.into_owned())
            })
            .unwrap_or_default();
        (identifier, true)
    }
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn get_json(&self, url: &str, authorization: &str, timeout: Duration) -> Result<Value> {
        http::within(timeout, url, self.respond(url, authorization)).await
    }
}

impl FakeFetcher {
    async fn respond(&self, url: &str, authorization: &str) -> Result<Value> {
        let (key, is_search) = Self::key_for(url);
        self.calls.lock().unwrap().push(key.clone());

        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self.failing.lock().unwrap().contains(&key);
        if failing {
            return Err(Error::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                url: url.to_string(),
            });
        }

        if is_search {
            assert_eq!(authorization, NODE_PASSWORD);
            let tracks = self
                .searches
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .unwrap_or_default();
            let load_type = if tracks.is_empty() {
                "NO_MATCHES"
            } else {
                "SEARCH_RESULT"
            };
            return Ok(json!({ "loadType": load_type, "playlistInfo": {}, "tracks": tracks }));
        }

        assert_eq!(authorization, format!("Bearer {}", TOKEN));
        self.spotify
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status {
                status: StatusCode::NOT_FOUND,
                url: url.to_string(),
            })
    }
}

pub fn node_options() -> NodeOptions {
    NodeOptions {
        name: "main".to_string(),
        host: "node.test".to_string(),
        port: 2333,
        password: NODE_PASSWORD.to_string(),
        secure: false,
    }
}

pub fn resolver(fetcher: &Arc<FakeFetcher>, options: ResolverOptions) -> Resolver {
    let spotify = SpotifyApi::new(
        fetcher.clone(),
        Arc::new(StaticToken(TOKEN.to_string())),
        SPOTIFY,
        options.request_timeout,
    );
    let node = NodeConnection::new(node_options(), fetcher.clone(), options.request_timeout);
    Resolver::new(spotify, node, options)
}

pub fn spotify_track(id: &str, name: &str, artists: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": artists
            .iter()
            .map(|a| json!({ "id": format!("{}-id", a.to_lowercase()), "name": a }))
            .collect::<Vec<_>>(),
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
    })
}

pub fn node_track(identifier: &str, title: &str, author: &str) -> Value {
    json!({
        "track": format!("QAAA{}", identifier),
        "info": {
            "identifier": identifier,
            "isSeekable": true,
            "author": author,
            "length": 215000,
            "isStream": false,
            "position": 0,
            "title": title,
            "uri": format!("https://www.youtube.com/watch?v={}", identifier),
        }
    })
}

pub fn playlist_item(track: Value) -> Value {
    json!({ "track": track })
}

pub fn page(items: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "items": items,
        "next": next.map(|n| format!("{}/{}", SPOTIFY, n)),
    })
}
