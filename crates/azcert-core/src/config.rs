//! Client configuration.
//!
//! Centralizes the constants shared by the data-access layer, the web app
//! and the CLI.

use std::time::Duration;

// =============================================================================
// Network Configuration
// =============================================================================

/// Base URL of the remote certificate REST API.
pub const API_BASE_URL: &str = "https://azinternational-eg.com/api";

/// REST endpoint paths, relative to [`API_BASE_URL`].
pub mod endpoints {
    pub const LIST: &str = "Services";
    pub const SEARCH_BY_NAME: &str = "Services/searchByName";
    pub const SEARCH_BY_SERIAL: &str = "Services/searchByS_N";
    pub const GET_BY_ID: &str = "Services/getById";
    pub const CREATE: &str = "Services/create";
    pub const UPDATE: &str = "Services/update";
    pub const DELETE: &str = "Services/delete";
    pub const UPLOAD_EXCEL: &str = "Services/UploadExcelFile";
    pub const SEND_EMAIL: &str = "Email/SendEmail";
}

/// Multipart field name carrying the uploaded spreadsheet.
pub const UPLOAD_FIELD_NAME: &str = "file";

// =============================================================================
// Cache Configuration
// =============================================================================

/// Lifetime of every cache entry.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache keys and key prefixes used by the read paths.
pub mod cache {
    /// Key for the unfiltered certificate list.
    pub const ALL_SERVICES_KEY: &str = "getAllServices";
    /// Prefix for name-search result keys (`searchByName:<query>`).
    pub const SEARCH_BY_NAME_PREFIX: &str = "searchByName";
    /// Prefix for serial-search result keys (`searchBySerial:<query>`).
    pub const SEARCH_BY_SERIAL_PREFIX: &str = "searchBySerial";
    /// Pattern matching every key a successful write makes stale.
    pub const WRITE_INVALIDATION_PATTERN: &str = "^(getAllServices|searchByName|searchBySerial)";
}

// =============================================================================
// Certificate Configuration
// =============================================================================

/// Prefix of display ids and placeholder serial numbers.
pub const CERT_PREFIX: &str = "CERT-";

/// Inclusive range of the random part of a placeholder serial number.
pub const PLACEHOLDER_SERIAL_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

/// Placeholder for missing display values.
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// ClientConfig
// =============================================================================

/// Runtime configuration of a [`ServiceClient`](crate::ServiceClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("https://example.com/api/");
        assert_eq!(config.base_url, "https://example.com/api");
        assert_eq!(
            config.url(endpoints::GET_BY_ID),
            "https://example.com/api/Services/getById"
        );
        assert_eq!(config.url("/Services"), "https://example.com/api/Services");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(ClientConfig::default().base_url, API_BASE_URL);
    }
}
