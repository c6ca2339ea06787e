use super::SpotifyApi;
use crate::{error::Result, types::SpotifyTrack};

impl SpotifyApi {
    pub async fn track(&self, id: &str) -> Result<SpotifyTrack> {
        self.get(&self.endpoint(&format!("tracks/{}", id))).await
    }
}
