//! Parsing of Spotify links into entity references.
//!
//! Accepted forms:
//!
//! ```text
//! https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC
//! https://open.spotify.com/intl-de/album/1DFixLWuPkv3KT3TnV35m3?si=abc
//! https://open.spotify.com/user/someone/playlist/37i9dQZF1DXcBWIGoYBM5M
//! spotify:playlist:37i9dQZF1DXcBWIGoYBM5M
//! ```

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static SPOTIFY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://open\.spotify\.com/(?:intl-[A-Za-z-]+/)?(?:user/[^/]+/)?|spotify:)(track|album|playlist)[/:]([A-Za-z0-9]+)(?:[/?#].*)?$",
    )
    .expect("Spotify URL pattern must compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Track,
    Album,
    Playlist,
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "track" => Ok(Self::Track),
            "album" => Ok(Self::Album),
            "playlist" => Ok(Self::Playlist),
            other => Err(Error::InvalidUrl(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Playlist => "playlist",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let caps = SPOTIFY_PATTERN
            .captures(url.trim())
            .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        Ok(Self {
            kind: caps[1].parse()?,
            id: caps[2].to_string(),
        })
    }
}

impl FromStr for EntityRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spotify:{}:{}", self.kind, self.id)
    }
}

pub fn is_valid_url(url: &str) -> bool {
    SPOTIFY_PATTERN.is_match(url.trim())
}
