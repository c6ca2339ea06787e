use std::sync::Arc;

use mockito::Matcher;
use sporlink::{
    client::Client,
    error::Error,
    http::HttpFetcher,
    node::NodeOptions,
    resolver::ResolverOptions,
    spotify::auth::StaticToken,
    types::LoadType,
};

fn node_options(name: &str, server: &mockito::ServerGuard) -> NodeOptions {
    let address = server.host_with_port();
    let (host, port) = address.rsplit_once(':').unwrap();
    NodeOptions {
        name: name.to_string(),
        host: host.to_string(),
        port: port.parse().unwrap(),
        password: "youshallnotpass".to_string(),
        secure: false,
    }
}

fn client(server: &mockito::ServerGuard, options: ResolverOptions) -> Client {
    Client::with_fetcher(
        Arc::new(StaticToken("abc".to_string())),
        Arc::new(HttpFetcher::default()),
        &format!("{}/v1", server.url()),
        options,
    )
}

#[tokio::test]
async fn test_load_without_nodes() {
    let server = mockito::Server::new_async().await;
    let client = client(&server, ResolverOptions::default());

    let err = client
        .load("https://open.spotify.com/track/t1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoNodes));
}

#[tokio::test]
async fn test_load_track_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let spotify = server
        .mock("GET", "/v1/tracks/4uLU6hMCjMI75M1A2tKUQC")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": "4uLU6hMCjMI75M1A2tKUQC",
                "name": "Never Gonna Give You Up",
                "artists": [{ "id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley" }],
                "external_urls": { "spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC" }
            }"#,
        )
        .expect(1)
        .create_async()
        .await;
    let node = server
        .mock("GET", "/loadtracks")
        .match_query(Matcher::UrlEncoded(
            "identifier".into(),
            "ytsearch:Rick Astley - Never Gonna Give You Up".into(),
        ))
        .match_header("authorization", "youshallnotpass")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "loadType": "SEARCH_RESULT",
                "playlistInfo": {},
                "tracks": [{
                    "track": "QAAAoQIAPFJpY2sgQXN0bGV5",
                    "info": {
                        "identifier": "dQw4w9WgXcQ",
                        "isSeekable": true,
                        "author": "RickAstleyVEVO",
                        "length": 212000,
                        "isStream": false,
                        "position": 0,
                        "title": "Rick Astley - Never Gonna Give You Up (Official Music Video)",
                        "uri": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
                    }
                }]
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let options = ResolverOptions {
        use_spotify_metadata: true,
        ..ResolverOptions::default()
    };
    let mut client = client(&server, options);
    client.add_node(node_options("main", &server));

    let result = client
        .load("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=xyz")
        .await
        .unwrap();

    assert_eq!(result.load_type, LoadType::TrackLoaded);
    let info = &result.tracks[0].info;
    assert_eq!(info.identifier, "dQw4w9WgXcQ");
    assert_eq!(info.title, "Never Gonna Give You Up");
    assert_eq!(info.author, "Rick Astley");
    assert_eq!(info.uri, "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC");

    spotify.assert_async().await;
    node.assert_async().await;
}

#[tokio::test]
async fn test_load_invalid_url_is_load_failed() {
    let server = mockito::Server::new_async().await;
    let mut client = client(&server, ResolverOptions::default());
    client.add_node(node_options("main", &server));

    let result = client
        .load("https://open.spotify.com/artist/0gxyHStUsqpMadRV0Di1Qt")
        .await
        .unwrap();

    assert_eq!(result.load_type, LoadType::LoadFailed);
    assert!(result.tracks.is_empty());
    assert_eq!(result.exception.unwrap().severity, "COMMON");
}

#[tokio::test]
async fn test_nodes_by_name() {
    let server = mockito::Server::new_async().await;
    let mut client = client(&server, ResolverOptions::default());
    client
        .add_node(node_options("eu", &server))
        .add_node(node_options("us", &server));

    assert_eq!(client.nodes().len(), 2);
    assert_eq!(client.ideal_node().unwrap().name(), "eu");
    assert!(client.node("us").is_some());
    assert!(client.node("asia").is_none());

    // same name replaces
    let mut replacement = node_options("us", &server);
    replacement.password = "other".to_string();
    client.add_node(replacement);
    assert_eq!(client.nodes().len(), 2);
    assert_eq!(client.node("us").unwrap().options().password, "other");
}

#[tokio::test]
async fn test_is_valid_url() {
    let server = mockito::Server::new_async().await;
    let client = client(&server, ResolverOptions::default());

    assert!(client.is_valid_url("spotify:track:4uLU6hMCjMI75M1A2tKUQC"));
    assert!(!client.is_valid_url("https://soundcloud.com/artist/track"));
}
