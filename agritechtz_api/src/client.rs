//! HTTP client for the crop price CSV export.

use std::future::Future;

use url::Url;

use crate::{
    config::ClientConfig,
    query::{Query, QueryParams},
    Error,
};

const USER_AGENT: &str = concat!("agritechtz/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a crop price query with a raw CSV body.
///
/// [`Client`] is the HTTP implementation; tests substitute their own.
pub trait CropPriceSource {
    /// Performs one fetch with the given filter parameters.
    fn fetch(&self, params: &QueryParams) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

/// HTTP client for the crop price export.
///
/// Each fetch builds a fresh `reqwest::Client` with the configured timeout and
/// issues a single GET; nothing is kept between calls.
#[derive(Clone, Debug, Default)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Creates a client pointing at the production export with a 30-second timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_config(ClientConfig::with_base_url(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn get_url(&self, query: &impl Query) -> Result<Url, Error> {
        let endpoint = self.config.endpoint();
        let url = Url::parse(&endpoint).map_err(|e| {
            tracing::error!("Invalid URL constructed from {}: {}", endpoint, e);
            Error::fetch(format!("invalid endpoint URL '{}'", endpoint), e)
        })?;
        Ok(query.add_to_url(&url))
    }
}

impl CropPriceSource for Client {
    async fn fetch(&self, params: &QueryParams) -> Result<Vec<u8>, Error> {
        let url = self.get_url(params)?;
        tracing::debug!(%url, "fetching crop prices");

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::fetch("could not build HTTP client", e)
            })?;
        let resp = client
            .get(url)
            .header("accept", "text/csv, text/plain;q=0.9, */*;q=0.8")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get crop prices: {}", e);
                Error::fetch(describe_transport_error(&e), e)
            })?;

        let status = resp.status();
        let status_error = resp.error_for_status_ref().err();
        let body = resp.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::fetch("could not read response body", e)
        })?;

        if let Some(e) = status_error {
            let snippet = truncate_body(&String::from_utf8_lossy(&body));
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::FetchFailed {
                reason: format!("server answered {}", status),
                status: Some(status.as_u16()),
                source: Some(e.into()),
            });
        }

        tracing::debug!(bytes = body.len(), "received crop price export");
        Ok(body.to_vec())
    }
}

fn describe_transport_error(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "could not connect to server"
    } else {
        "request failed"
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_encoded_params() {
        let client = Client::with_base_url("https://example.com");
        let params = QueryParams::from([
            ("crop_prices__in", "maize,rice".to_string()),
            ("ordering", "+ts".to_string()),
        ]);
        let url = client.get_url(&params).unwrap();
        assert_eq!(url.path(), "/api/crop-prices/export/");
        assert_eq!(url.query(), Some("crop_prices__in=maize%2Crice&ordering=%2Bts"));
    }

    #[test]
    fn bad_base_url_is_a_fetch_failure() {
        let client = Client::with_base_url("not a url");
        let err = client.get_url(&QueryParams::new()).unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let snippet = truncate_body(&body);
        assert!(snippet.ends_with("...[truncated]"));
        assert!(snippet.len() < body.len());
    }
}
