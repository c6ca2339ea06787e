//! Transport used for every GET the pipeline issues.
//!
//! The resolver only needs "GET this URL with this `Authorization` header and
//! give me JSON". [`Fetch`] captures that, so tests and hosts can swap the
//! transport; [`HttpFetcher`] is the `reqwest` implementation.
//!
//! The timeout passed to [`Fetch::get_json`] bounds each attempt. Waiting out
//! a `Retry-After` between attempts does not count against it.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Longest `Retry-After` we are willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;

const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(2);

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_json(&self, url: &str, authorization: &str, timeout: Duration) -> Result<Value>;
}

/// Runs `fut` under `timeout`. An elapsed timer is reported as
/// [`Error::Timeout`] so callers handle it like any other failed request.
pub async fn within<T, F>(timeout: Duration, url: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(url.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

enum Reply {
    Json(Value),
    Status {
        status: StatusCode,
        retry_after: Option<u64>,
    },
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_retries: 2,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn attempt(&self, url: &str, authorization: &str) -> Result<Reply> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Reply::Json(response.json::<Value>().await?));
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        Ok(Reply::Status {
            status,
            retry_after,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_json(&self, url: &str, authorization: &str, timeout: Duration) -> Result<Value> {
        let mut attempt = 0;

        loop {
            let (status, retry_after) =
                match within(timeout, url, self.attempt(url, authorization)).await? {
                    Reply::Json(json) => return Ok(json),
                    Reply::Status {
                        status,
                        retry_after,
                    } => (status, retry_after),
                };

            if attempt < self.max_retries {
                attempt += 1;

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = retry_after.unwrap_or(1);

                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        debug!(url, retry_after, "rate limited, retrying");
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warn!(url, retry_after, "rate limit window too long, giving up");
                } else if status == StatusCode::BAD_GATEWAY {
                    debug!(url, "bad gateway, retrying");
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue;
                }
            }

            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }
    }
}
