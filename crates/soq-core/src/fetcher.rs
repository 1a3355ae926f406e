use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client shared by the search and answer providers
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new fetcher with a custom request timeout (primarily for tests)
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("soq/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// GET `url` and decode a JSON body.
    ///
    /// Failures are labeled with `provider`: unreachable hosts, non-2xx
    /// statuses and undecodable payloads all become [`Error::Upstream`];
    /// a request that exceeds the timeout becomes [`Error::Timeout`].
    pub async fn get_json<T: DeserializeOwned>(&self, provider: &'static str, url: Url) -> Result<T> {
        debug!("GET {}", redact(&url));

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                return Err(Error::Timeout(format!("{provider} did not respond in time")));
            },
            Err(err) => {
                debug!("request to {provider} failed: {err}");
                return Err(Error::upstream_unreachable(provider));
            },
        };

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream_status(provider, status));
        }

        let bytes = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                Error::Timeout(format!("{provider} did not respond in time"))
            } else {
                Error::upstream_unreachable(provider)
            }
        })?;
        info!("fetched {} bytes from {provider}", bytes.len());

        serde_json::from_slice(&bytes).map_err(|err| Error::Upstream {
            provider,
            message: format!("unexpected response from {provider}: {err}"),
        })
    }
}

/// Drop the `key` query parameter so API keys never reach the logs.
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != "key")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(kept);
    shown.to_string()
}
