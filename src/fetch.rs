// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document retrieval boundary.
//!
//! The audit core never talks to the network directly; it goes through the
//! [`PageFetcher`] trait so tests can inject stub or failing fetchers. The
//! default implementation does a plain HTTP GET with a bounded timeout --
//! rendering the page in a real browser is a collaborator concern outside
//! this crate.

use crate::error::{AuditError, Result};
use std::time::Duration;
use tracing::info;
use url::Url;

/// Overall timeout applied to one page retrieval
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves the HTML of a remote page
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body for an already-normalized URL
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// HTTP fetcher with a bounded timeout
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout
    pub fn new() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Override the retrieval timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        info!(url = %url, "fetching page");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|source| AuditError::Retrieval {
                address: url.to_string(),
                source,
            })?;

        let response = client.get(url.clone()).send().map_err(|source| {
            if source.is_timeout() {
                AuditError::Timeout {
                    address: url.to_string(),
                }
            } else {
                AuditError::Retrieval {
                    address: url.to_string(),
                    source,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::HttpStatus {
                address: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| AuditError::Retrieval {
            address: url.to_string(),
            source,
        })
    }
}

/// Normalize a caller-supplied address: default the scheme to https when
/// none is given, then validate.
pub fn normalize_url(address: &str) -> Result<Url> {
    let trimmed = address.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    Url::parse(&candidate).map_err(|source| AuditError::InvalidUrl {
        address: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https_scheme() {
        let url = normalize_url("example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_keeps_explicit_scheme() {
        let url = normalize_url("http://example.com").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let url = normalize_url("  example.com  ").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        assert!(matches!(
            normalize_url("http://"),
            Err(AuditError::InvalidUrl { .. })
        ));
    }
}
