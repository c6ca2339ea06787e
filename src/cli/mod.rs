//! # CLI Module
//!
//! Command implementations behind the `sporlink` binary. Each command reads
//! its settings through [`crate::config`], talks to the library, and reports
//! with the console macros (`info!`, `success!`, `warning!`, `error!`).
//!
//! ## Commands
//!
//! - [`load`] - Resolve a Spotify link against a node and print the result
//! - [`parse`] - Show how a Spotify link is understood, without any request
//!
//! ## Usage
//!
//! ```bash
//! sporlink load https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC
//! sporlink load spotify:playlist:37i9dQZF1DXcBWIGoYBM5M --json
//! sporlink load https://open.spotify.com/album/1DFixLWuPkv3KT3TnV35m3 --node eu
//! sporlink parse spotify:album:1DFixLWuPkv3KT3TnV35m3
//! ```

mod load;
mod parse;

pub use load::load;
pub use parse::parse;

use std::sync::Arc;

use crate::{
    client::Client, config, error::Result, http::HttpFetcher,
    spotify::auth::ClientCredentials,
};

fn client_from_env() -> Result<Client> {
    let options = config::resolver_options()?;
    let http = reqwest::Client::builder()
        .timeout(options.request_timeout)
        .build()?;

    let tokens = ClientCredentials::new(
        config::spotify_client_id()?,
        config::spotify_client_secret()?,
        config::spotify_token_url(),
    )
    .with_client(http.clone());

    let mut client = Client::with_fetcher(
        Arc::new(tokens),
        Arc::new(HttpFetcher::new(http)),
        &config::spotify_api_url(),
        options,
    );
    client.add_node(config::node_options()?);

    Ok(client)
}
