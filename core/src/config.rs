//! Runtime settings for the decoder.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";
pub const DEFAULT_ENDPOINT: &str = "DecodeVinValuesExtended";
pub const DEFAULT_FORMAT: &str = "json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MEMO_CAPACITY: u64 = 1000;

/// Endpoint, timeout, and memo settings.
///
/// Every key is optional when deserializing; missing keys take the defaults
/// above.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub base_url: String,
    pub endpoint: String,
    pub format: String,
    pub timeout_secs: u64,
    pub memo_capacity: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
        }
    }
}

impl DecoderConfig {
    /// Defaults with a different service root, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
