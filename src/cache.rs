//! In-memory cache of resolved tracks keyed by Spotify track ID.
//!
//! Entries live as long as the cache; there is no eviction or TTL. Reads hand
//! out clones, so a caller editing its copy never touches the stored value.
//!
//! [`TrackCache::get_or_resolve`] collapses concurrent lookups per key: while
//! one caller is resolving a track, other callers asking for the same ID wait
//! for that result instead of querying the node a second time.

use std::future::Future;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::types::Track;

#[derive(Clone)]
pub struct TrackCache {
    entries: MokaCache<String, Track>,
}

impl Default for TrackCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackCache {
    /// Unbounded cache: no capacity and no time to live.
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    pub async fn get(&self, id: &str) -> Option<Track> {
        self.entries.get(id).await
    }

    pub async fn put(&self, id: impl Into<String>, track: Track) {
        self.entries.insert(id.into(), track).await;
    }

    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count() as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }

    /// Returns the cached track for `id`, or runs `resolve` and caches what it
    /// finds. A `None` from `resolve` is not cached. A caller dropped while
    /// resolving hands the work to the next waiter.
    pub async fn get_or_resolve<F, Fut>(&self, id: &str, resolve: F) -> Option<Track>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<Track>>,
    {
        if let Some(hit) = self.get(id).await {
            debug!(id, "track cache hit");
            return Some(hit);
        }

        self.entries
            .optionally_get_with(id.to_string(), resolve())
            .await
    }
}
