use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpotifyArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Track object as returned by `/tracks/{id}` and embedded in album and
/// playlist listings. Local files inside playlists carry a `null` id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    /// `"track"` for music, `"episode"` for podcast entries in playlists.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SpotifyTrack {
    pub fn is_track(&self) -> bool {
        self.kind.as_deref().is_none_or(|kind| kind == "track")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub tracks: Paging<SpotifyTrack>,
}

/// Entry of a playlist listing. `track` is `None` for removed or unavailable
/// items and for entries that do not read as a track object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default, deserialize_with = "lenient_track")]
    pub track: Option<SpotifyTrack>,
}

fn lenient_track<'de, D>(deserializer: D) -> Result<Option<SpotifyTrack>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Paging<PlaylistItem>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadType {
    TrackLoaded,
    PlaylistLoaded,
    SearchResult,
    NoMatches,
    LoadFailed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_track: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadException {
    pub message: String,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub identifier: String,
    pub is_seekable: bool,
    pub author: String,
    pub length: u64,
    pub is_stream: bool,
    pub position: u64,
    pub title: String,
    pub uri: String,
}

/// A node search candidate: the opaque encoded payload the player needs plus
/// its descriptive info.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub track: String,
    pub info: TrackInfo,
}

/// Body of a node `/loadtracks` response, and the value every resolution
/// returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub load_type: LoadType,
    #[serde(default)]
    pub playlist_info: PlaylistInfo,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<LoadException>,
}

impl LoadResult {
    pub fn no_matches() -> Self {
        Self {
            load_type: LoadType::NoMatches,
            playlist_info: PlaylistInfo::default(),
            tracks: Vec::new(),
            exception: None,
        }
    }

    pub fn load_failed(message: impl Into<String>) -> Self {
        Self {
            load_type: LoadType::LoadFailed,
            playlist_info: PlaylistInfo::default(),
            tracks: Vec::new(),
            exception: Some(LoadException {
                message: message.into(),
                severity: "COMMON".to_string(),
            }),
        }
    }

    pub fn track(track: Option<Track>) -> Self {
        match track {
            Some(t) => Self {
                load_type: LoadType::TrackLoaded,
                playlist_info: PlaylistInfo::default(),
                tracks: vec![t],
                exception: None,
            },
            None => Self::no_matches(),
        }
    }

    pub fn playlist(name: String, tracks: Vec<Track>) -> Self {
        Self {
            load_type: LoadType::PlaylistLoaded,
            playlist_info: PlaylistInfo {
                name: Some(name),
                selected_track: None,
            },
            tracks,
            exception: None,
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub author: String,
    pub length: String,
    pub uri: String,
}
