//! Endpoint configuration for the crop price [`Client`](crate::Client).

use std::time::Duration;

/// Production host serving the crop price export.
pub const DEFAULT_BASE_URL: &str = "https://agritech.co.tz";

/// Path of the CSV export, relative to the base URL.
pub const CROP_PRICES_PATH: &str = "/api/crop-prices/export/";

/// Request timeout applied to every fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how long the client fetches.
///
/// The defaults point at production. Tests and the CLI inject their own
/// values through [`Client::with_config`](crate::Client::with_config).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host, without the export path.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default timeout with a different host. Trailing slashes are dropped.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full export URL, without query parameters.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CROP_PRICES_PATH)
    }
}
