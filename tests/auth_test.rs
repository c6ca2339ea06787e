use base64::{Engine, engine::general_purpose::STANDARD};
use mockito::Matcher;
use sporlink::{
    error::Error,
    spotify::auth::{ClientCredentials, StaticToken, TokenProvider},
};

fn basic_auth(id: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", id, secret)))
}

#[tokio::test]
async fn test_static_token() {
    let provider = StaticToken("abc".to_string());
    assert_eq!(provider.current_token().await.unwrap(), "abc");
}

#[tokio::test]
async fn test_client_credentials_reuses_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .match_header("authorization", basic_auth("client", "secret").as_str())
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"BQD-token","token_type":"Bearer","expires_in":3600}"#)
        .expect(1)
        .create_async()
        .await;

    let provider = ClientCredentials::new(
        "client",
        "secret",
        format!("{}/api/token", server.url()),
    );

    assert_eq!(provider.current_token().await.unwrap(), "BQD-token");
    assert_eq!(provider.current_token().await.unwrap(), "BQD-token");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_credentials_refreshes_short_lived_token() {
    let mut server = mockito::Server::new_async().await;
    // shorter than the refresh buffer, so every call asks again
    let mock = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"short","token_type":"Bearer","expires_in":60}"#)
        .expect(2)
        .create_async()
        .await;

    let provider = ClientCredentials::new(
        "client",
        "secret",
        format!("{}/api/token", server.url()),
    );

    provider.current_token().await.unwrap();
    provider.current_token().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_credentials_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_client"}"#)
        .create_async()
        .await;

    let provider = ClientCredentials::new(
        "client",
        "wrong",
        format!("{}/api/token", server.url()),
    );

    let err = provider.current_token().await.unwrap_err();
    assert!(matches!(err, Error::Token(ref msg) if msg.contains("invalid_client")));
}
