use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

/// Seconds before expiry at which a cached token is considered stale.
const EXPIRY_BUFFER_SECS: u64 = 240;

/// Source of the bearer token sent with every Spotify Web API request.
///
/// Implementations own refresh and expiry; callers just ask for the token
/// each time they build a request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn current_token(&self) -> Result<String>;
}

/// A token obtained elsewhere and used as-is.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn current_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_in: u64,
    obtained_at: u64,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_BUFFER_SECS >= self.obtained_at + self.expires_in
    }
}

/// Client-credentials grant against the Spotify accounts service.
///
/// The token is fetched on first use and refreshed once it is within four
/// minutes of expiring. Concurrent callers share one refresh.
pub struct ClientCredentials {
    client: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl ClientCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: token_url.into(),
            token: Mutex::new(None),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let credentials = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Token(format!(
                "token request failed with {}: {}",
                status, body
            )));
        }

        let json = response.json::<TokenResponse>().await?;
        if json.access_token.is_empty() {
            return Err(Error::Token("token response without access_token".into()));
        }

        Ok(CachedToken {
            access_token: json.access_token,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentials {
    async fn current_token(&self) -> Result<String> {
        let mut lock = self.token.lock().await;

        if let Some(token) = lock.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
        }

        debug!("requesting Spotify access token");
        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *lock = Some(fresh);

        Ok(access_token)
    }
}
