use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info, success,
    types::{LoadResult, LoadType},
    utils, warning,
};

pub async fn load(url: String, node_name: Option<String>, json: bool) {
    let client = match super::client_from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot set up client. Err: {}", e),
    };

    let node = match &node_name {
        Some(name) => match client.node(name) {
            Some(n) => n,
            None => error!("No node named {} is configured", name),
        },
        None => match client.ideal_node() {
            Some(n) => n,
            None => error!("No node is configured"),
        },
    };

    if !client.is_valid_url(&url) {
        warning!(
            "{} does not look like a Spotify track, album or playlist link",
            url
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Resolving on node {}...", node.name()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = node.load(&url).await;
    pb.finish_and_clear();

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize result. Err: {}", e),
        }
        return;
    }

    report(&url, &result);
}

fn report(url: &str, result: &LoadResult) {
    match result.load_type {
        LoadType::TrackLoaded => success!("Track loaded"),
        LoadType::PlaylistLoaded => success!(
            "Loaded {} tracks from {}",
            result.tracks.len(),
            result.playlist_info.name.as_deref().unwrap_or("playlist")
        ),
        LoadType::SearchResult => info!("{} search results", result.tracks.len()),
        LoadType::NoMatches => {
            warning!("No matches for {}", url);
            return;
        }
        LoadType::LoadFailed => {
            let message = result
                .exception
                .as_ref()
                .map(|e| e.message.as_str())
                .unwrap_or("unknown error");
            warning!("Failed to load {}: {}", url, message);
            return;
        }
    }

    if !result.tracks.is_empty() {
        println!("{}", Table::new(utils::track_table_rows(&result.tracks)));
    }
}
