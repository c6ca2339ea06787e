use crate::types::{SpotifyArtist, Track, TrackTableRow};

pub fn join_artists(artists: &[SpotifyArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a track length in milliseconds as `m:ss`, or `h:mm:ss` past an hour.
/// Streams report `u64::MAX` on some nodes and are shown as `LIVE`.
pub fn format_length(length_ms: u64) -> String {
    if length_ms == u64::MAX {
        return "LIVE".to_string();
    }

    let total_secs = length_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            title: t.info.title.clone(),
            author: t.info.author.clone(),
            length: if t.info.is_stream {
                "LIVE".to_string()
            } else {
                format_length(t.info.length)
            },
            uri: t.info.uri.clone(),
        })
        .collect()
}
