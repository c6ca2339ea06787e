use super::SpotifyApi;
use crate::{error::Result, types::SpotifyAlbum};

impl SpotifyApi {
    /// Fetches an album with its embedded track listing. Only the embedded
    /// page is used; album listings are not followed past it.
    pub async fn album(&self, id: &str) -> Result<SpotifyAlbum> {
        self.get(&self.endpoint(&format!("albums/{}", id))).await
    }
}
