//! Upstream N2YO client: URL building, fetch, and credential redaction.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

pub const REDACTED: &str = "REDACTED";

/// Why an upstream request did not produce passthrough JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamFailure {
    /// Upstream HTTP status, when the upstream answered at all.
    pub status: Option<u16>,
    pub details: String,
}

impl UpstreamFailure {
    fn network(details: impl Into<String>) -> Self {
        Self {
            status: None,
            details: details.into(),
        }
    }

    fn http(status: u16, details: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            details: details.into(),
        }
    }
}

impl std::fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "upstream returned {status}: {}", self.details),
            None => write!(f, "upstream unreachable: {}", self.details),
        }
    }
}

impl std::error::Error for UpstreamFailure {}

#[derive(Clone)]
pub struct N2yoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl N2yoClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Upstream path order is id/lat/lon; our own route takes lon first.
    pub fn positions_url(&self, norad_id: u32, lat: f64, lon: f64, alt: f64, count: u32) -> String {
        format!(
            "{}/positions/{norad_id}/{lat}/{lon}/{alt}/{count}/?apiKey={}",
            self.base_url, self.api_key
        )
    }

    pub fn above_url(
        &self,
        lat: f64,
        lon: f64,
        alt: f64,
        radius_deg: f64,
        category_id: u32,
    ) -> String {
        format!(
            "{}/above/{lat}/{lon}/{alt}/{radius_deg}/{category_id}/?apiKey={}",
            self.base_url, self.api_key
        )
    }

    /// Strip the API key out of anything destined for a log line.
    pub fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            return text.to_string();
        }
        text.replace(&self.api_key, REDACTED)
    }

    /// Fetch a URL and hand back the upstream JSON untouched.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamFailure> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamFailure::network(self.redact(&e.to_string())))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamFailure::http(status.as_u16(), self.redact(&body)));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| UpstreamFailure::network(self.redact(&e.to_string())))
    }
}

/// Error payload returned to the caller in place of upstream JSON.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

/// Map an upstream failure to the response we return to the caller.
///
/// Upstream HTTP errors keep their originating status; everything else is a
/// 500. The payload never carries credentials.
pub fn failure_response(failure: &UpstreamFailure) -> (StatusCode, ErrorBody) {
    let status = failure
        .status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        ErrorBody {
            error: "Failed to fetch satellite data".to_string(),
            details: failure.details.clone(),
        },
    )
}
