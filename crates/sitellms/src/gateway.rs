//! Fetch gateway for sitellms
//!
//! A single GET-passthrough surface used by every pipeline stage. The
//! gateway owns one `reqwest::Client`, enforces URL prefix allow/block
//! lists, rejects binary content, and surfaces every per-resource failure
//! as `None` so callers never have to unwind a scrape over one bad URL.

use crate::error::ScrapeError;
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};

/// Binary content type prefixes the gateway refuses to decode
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/x-tar",
    "application/x-rar",
    "application/x-7z",
    "application/vnd.ms-",
    "application/vnd.openxmlformats",
    "font/",
];

/// Connect + first-byte timeout
const FIRST_BYTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Body timeout (total)
const BODY_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring the fetch gateway
#[derive(Debug, Clone, Default)]
pub struct GatewayBuilder {
    /// Custom User-Agent
    user_agent: Option<String>,
    /// Allow list of URL prefixes
    allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    block_prefixes: Vec<String>,
}

impl GatewayBuilder {
    /// Create a new gateway builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add URL prefix to allow list
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.allow_prefixes.push(prefix.into());
        self
    }

    /// Add URL prefix to block list
    pub fn block_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.block_prefixes.push(prefix.into());
        self
    }

    /// Build the gateway
    pub fn build(self) -> Result<Gateway, ScrapeError> {
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html, application/xml, text/xml, */*;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(FIRST_BYTE_TIMEOUT)
            .build()
            .map_err(ScrapeError::ClientBuildError)?;

        Ok(Gateway {
            client,
            allow_prefixes: self.allow_prefixes,
            block_prefixes: self.block_prefixes,
        })
    }
}

/// Configured fetch gateway
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    allow_prefixes: Vec<String>,
    block_prefixes: Vec<String>,
}

impl Gateway {
    /// Create a gateway builder
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Create a gateway with default options
    pub fn new() -> Result<Self, ScrapeError> {
        GatewayBuilder::new().build()
    }

    /// True if the URL passes the allow/block prefix lists
    fn is_permitted(&self, url: &str) -> bool {
        if !self.allow_prefixes.is_empty()
            && !self.allow_prefixes.iter().any(|p| url.starts_with(p))
        {
            return false;
        }
        !self.block_prefixes.iter().any(|p| url.starts_with(p))
    }

    /// GET a URL and return its body as UTF-8 text
    ///
    /// Returns `None` for every per-resource failure: blocked or non-HTTP
    /// URL, transport error, non-2xx status, binary content type, or body
    /// timeout. Failures are logged, never raised.
    pub async fn fetch_text(&self, url: &str) -> Option<String> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            warn!(url, "Skipping non-HTTP URL");
            return None;
        }

        if !self.is_permitted(url) {
            warn!(url, "URL blocked by prefix list");
            return None;
        }

        let response = match self.client.get(url).timeout(FIRST_BYTE_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Non-success status");
            return None;
        }

        if let Some(content_type) = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
        {
            if is_binary_content_type(content_type) {
                warn!(url, content_type, "Skipping binary content");
                return None;
            }
        }

        let (body, truncated) = read_body_with_timeout(response, BODY_TIMEOUT).await;
        if truncated {
            warn!(url, "Body read timed out, discarding partial content");
            return None;
        }

        debug!(url, bytes = body.len(), "Fetched");
        Some(String::from_utf8_lossy(&body).to_string())
    }
}

/// Check if content type indicates binary content
fn is_binary_content_type(content_type: &str) -> bool {
    let ct_lower = content_type.to_lowercase();
    BINARY_PREFIXES
        .iter()
        .any(|prefix| ct_lower.starts_with(prefix))
}

/// Read response body with timeout, flagging truncation
async fn read_body_with_timeout(response: reqwest::Response, timeout: Duration) -> (Bytes, bool) {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let chunk_future = stream.next();
        let timeout_future = tokio::time::sleep_until(deadline);

        tokio::select! {
            chunk = chunk_future => {
                match chunk {
                    Some(Ok(bytes)) => {
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Error reading body chunk");
                        return (Bytes::from(body), true);
                    }
                    None => {
                        // Stream complete
                        return (Bytes::from(body), false);
                    }
                }
            }
            _ = timeout_future => {
                return (Bytes::from(body), true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_content_type() {
        assert!(is_binary_content_type("image/png"));
        assert!(is_binary_content_type("application/pdf"));
        assert!(is_binary_content_type("application/octet-stream"));
        assert!(is_binary_content_type("font/woff2"));

        assert!(!is_binary_content_type("text/html"));
        assert!(!is_binary_content_type("text/xml"));
        assert!(!is_binary_content_type("application/xml"));
        assert!(!is_binary_content_type("application/json"));
    }

    #[test]
    fn test_prefix_lists() {
        let gateway = Gateway::builder()
            .allow_prefix("https://example.com/")
            .block_prefix("https://example.com/private/")
            .build()
            .unwrap();

        assert!(gateway.is_permitted("https://example.com/about"));
        assert!(!gateway.is_permitted("https://example.com/private/x"));
        assert!(!gateway.is_permitted("https://other.com/"));
    }

    #[tokio::test]
    async fn test_fetch_non_http_url() {
        let gateway = Gateway::new().unwrap();
        assert!(gateway.fetch_text("ftp://example.com/file").await.is_none());
    }
}
