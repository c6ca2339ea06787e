use super::SpotifyApi;
use crate::{
    error::Result,
    types::{Paging, PlaylistItem, SpotifyPlaylist},
};

impl SpotifyApi {
    /// Fetches a playlist together with the first page of its items.
    pub async fn playlist(&self, id: &str) -> Result<SpotifyPlaylist> {
        self.get(&self.endpoint(&format!("playlists/{}", id))).await
    }

    /// Fetches a follow-up page using the `next` URL of the previous one.
    pub async fn playlist_page(&self, next_url: &str) -> Result<Paging<PlaylistItem>> {
        self.get(next_url).await
    }
}
