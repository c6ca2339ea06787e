//! Translation of Spotify entities into node search results.
//!
//! A track is resolved by searching the node for
//! `"{artists} - {title}"` and keeping the first candidate. There is no
//! similarity check on that candidate, so an unusual title can resolve to an
//! unrelated upload. Albums and playlists resolve every track concurrently
//! and keep Spotify order; tracks without a match are left out.
//!
//! Resolution never fails from the caller's point of view: Spotify errors give
//! `NO_MATCHES`, a failed playlist page truncates the listing, and a failed
//! node search drops that one track.

use std::time::Duration;

use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::{
    cache::TrackCache,
    entity::{EntityKind, EntityRef},
    node::NodeConnection,
    spotify::SpotifyApi,
    types::{LoadResult, Paging, PlaylistItem, SpotifyTrack, Track},
    utils,
};

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Maximum number of playlist pages to read, the first one included.
    /// `0` follows every page.
    pub playlist_load_limit: u32,
    /// Replace the node's title, author and uri with Spotify's.
    pub use_spotify_metadata: bool,
    /// Append `[Audio]` to searches to favour audio-only uploads.
    pub audio_only_results: bool,
    /// Search source prefix understood by the node, e.g. `ytsearch:`.
    pub search_prefix: String,
    pub request_timeout: Duration,
    /// Upper bound on node searches running at once for one collection.
    pub max_concurrent_queries: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            playlist_load_limit: 0,
            use_spotify_metadata: false,
            audio_only_results: false,
            search_prefix: "ytsearch:".to_string(),
            request_timeout: Duration::from_secs(10),
            max_concurrent_queries: 16,
        }
    }
}

pub struct Resolver {
    spotify: SpotifyApi,
    node: NodeConnection,
    options: ResolverOptions,
    cache: TrackCache,
}

impl Resolver {
    pub fn new(spotify: SpotifyApi, node: NodeConnection, options: ResolverOptions) -> Self {
        Self {
            spotify,
            node,
            options,
            cache: TrackCache::new(),
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn cache(&self) -> &TrackCache {
        &self.cache
    }

    pub fn node(&self) -> &NodeConnection {
        &self.node
    }

    pub async fn resolve(&self, entity: &EntityRef) -> LoadResult {
        match entity.kind {
            EntityKind::Track => self.resolve_track(&entity.id).await,
            EntityKind::Album => self.resolve_album(&entity.id).await,
            EntityKind::Playlist => self.resolve_playlist(&entity.id).await,
        }
    }

    pub async fn resolve_track(&self, id: &str) -> LoadResult {
        let track = match self.spotify.track(id).await {
            Ok(track) => track,
            Err(e) => {
                warn!(id, "failed to fetch Spotify track: {}", e);
                return LoadResult::no_matches();
            }
        };

        LoadResult::track(self.resolve_one(&track).await)
    }

    pub async fn resolve_album(&self, id: &str) -> LoadResult {
        let album = match self.spotify.album(id).await {
            Ok(album) => album,
            Err(e) => {
                warn!(id, "failed to fetch Spotify album: {}", e);
                return LoadResult::no_matches();
            }
        };

        let tracks = self.resolve_all(&album.tracks.items).await;
        LoadResult::playlist(album.name, tracks)
    }

    pub async fn resolve_playlist(&self, id: &str) -> LoadResult {
        let playlist = match self.spotify.playlist(id).await {
            Ok(playlist) => playlist,
            Err(e) => {
                warn!(id, "failed to fetch Spotify playlist: {}", e);
                return LoadResult::no_matches();
            }
        };

        let items = self.playlist_items(playlist.tracks).await;
        let spotify_tracks: Vec<SpotifyTrack> = items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(SpotifyTrack::is_track)
            .collect();

        let tracks = self.resolve_all(&spotify_tracks).await;
        LoadResult::playlist(playlist.name, tracks)
    }

    /// Walks the playlist listing starting from the embedded first page. A
    /// page that fails to load ends the walk with what was collected so far.
    async fn playlist_items(&self, first: Paging<PlaylistItem>) -> Vec<PlaylistItem> {
        let limit = self.options.playlist_load_limit;
        let mut items = first.items;
        let mut next = first.next;
        let mut pages: u32 = 1;

        while let Some(url) = next.take() {
            if limit != 0 && pages >= limit {
                debug!(pages, limit, "playlist load limit reached");
                break;
            }

            match self.spotify.playlist_page(&url).await {
                Ok(page) => {
                    items.extend(page.items);
                    next = page.next;
                    pages += 1;
                }
                Err(e) => {
                    warn!(url = %url, pages, "failed to fetch playlist page: {}", e);
                    break;
                }
            }
        }

        items
    }

    async fn resolve_all(&self, tracks: &[SpotifyTrack]) -> Vec<Track> {
        // buffered() yields in input order regardless of completion order
        stream::iter(tracks)
            .map(|track| self.resolve_one(track))
            .buffered(self.options.max_concurrent_queries.max(1))
            .filter_map(|resolved| async move { resolved })
            .collect()
            .await
    }

    async fn resolve_one(&self, track: &SpotifyTrack) -> Option<Track> {
        match &track.id {
            Some(id) => {
                self.cache
                    .get_or_resolve(id, || self.query_node(track))
                    .await
            }
            None => self.query_node(track).await,
        }
    }

    async fn query_node(&self, track: &SpotifyTrack) -> Option<Track> {
        let identifier = self.search_identifier(track);

        let result = match self.node.load_tracks(&identifier).await {
            Ok(result) => result,
            Err(e) => {
                warn!(identifier = %identifier, "node search failed: {}", e);
                return None;
            }
        };

        let Some(mut candidate) = result.tracks.into_iter().next() else {
            debug!(identifier = %identifier, "node returned no candidates");
            return None;
        };

        if self.options.use_spotify_metadata {
            candidate.info.title = track.name.clone();
            candidate.info.author = utils::join_artists(&track.artists);
            if let Some(url) = &track.external_urls.spotify {
                candidate.info.uri = url.clone();
            }
        }

        Some(candidate)
    }

    /// Node search identifier for a Spotify track:
    /// `{prefix}{artists} - {title}`, plus ` [Audio]` when audio-only results
    /// are requested.
    pub fn search_identifier(&self, track: &SpotifyTrack) -> String {
        let mut identifier = format!(
            "{}{} - {}",
            self.options.search_prefix,
            utils::join_artists(&track.artists),
            track.name
        );
        if self.options.audio_only_results {
            identifier.push_str(" [Audio]");
        }
        identifier
    }
}
