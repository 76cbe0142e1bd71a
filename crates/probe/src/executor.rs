//! Probe executor — one HTTP call behind a transport seam, classified
//! through a fixed priority ladder. No outcome is ever raised to the caller
//! as an error; everything lands in the result's classification.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::envelope;
use crate::result::ProbeResult;

/// Every prober request, classifying or raw, is capped at this timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Latency above this is a "slow" warning.
pub const SLOW_MS: u64 = 2000;
/// Latency above this is a "very slow" warning.
pub const VERY_SLOW_MS: u64 = 5000;

/// HTTP verbs the prober issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully-resolved outbound request.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

/// What came back over the wire, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub latency_ms: u64,
}

/// Transport-level failures. Always terminal for the probe, never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timeout (>10s)")]
    Timeout,
    #[error("Connection failed - is the server running?")]
    Connect,
    #[error("{0}")]
    Other(String),
}

/// The seam between probe logic and the wire. Production uses
/// [`HttpTransport`]; tests substitute scripted fakes so the gating and
/// classification paths are explicit, observable states.
pub trait Transport {
    fn send(&self, request: &ProbeRequest) -> Result<RawResponse, TransportError>;
}

/// Blocking reqwest transport with the fixed probe timeout and redirects
/// disabled (a 302 from the API must be observed, not followed).
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ProbeRequest) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(map_reqwest_error)?;
        let latency_ms = started.elapsed().as_millis() as u64;

        Ok(RawResponse {
            status,
            content_type,
            body,
            latency_ms,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect
    } else {
        TransportError::Other(err.to_string())
    }
}

/// Classify one probe outcome. Priority order:
/// transport failure, 401, 500, other >= 400, HTML body, 302, unparsable
/// JSON, then latency thresholds.
pub fn classify(
    endpoint: &str,
    method: HttpMethod,
    outcome: Result<RawResponse, TransportError>,
) -> ProbeResult {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return ProbeResult::fail(endpoint, method, None, None, err.to_string()),
    };

    let code = response.status;
    let latency = response.latency_ms;

    if code == 401 {
        return ProbeResult::fail(
            endpoint,
            method,
            Some(code),
            Some(latency),
            "Unauthorized - check JWT token",
        );
    }

    if code == 500 {
        let mut error = String::from("Internal Server Error");
        if let Some(message) = envelope::json_message(&response.body) {
            error.push_str(": ");
            error.push_str(&message);
        }
        return ProbeResult::fail(endpoint, method, Some(code), Some(latency), error);
    }

    if code >= 400 {
        let error = match envelope::error_message(&response.body) {
            Some(message) => format!("Backend error: {message}"),
            None => format!("HTTP {code}"),
        };
        return ProbeResult::fail(endpoint, method, Some(code), Some(latency), error);
    }

    if response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("text/html"))
    {
        return ProbeResult::fail(
            endpoint,
            method,
            Some(code),
            Some(latency),
            "HTML response received (expected JSON) - check CORS or server routing",
        );
    }

    if code == 302 {
        return ProbeResult::fail(
            endpoint,
            method,
            Some(code),
            Some(latency),
            "Redirect detected - API should return JSON, not redirect",
        );
    }

    if serde_json::from_str::<serde_json::Value>(&response.body).is_err() {
        return ProbeResult::fail(
            endpoint,
            method,
            Some(code),
            Some(latency),
            "Invalid JSON response",
        );
    }

    if latency > VERY_SLOW_MS {
        return ProbeResult::warning(endpoint, method, code, latency, "Very slow response (>5s)");
    }
    if latency > SLOW_MS {
        return ProbeResult::warning(endpoint, method, code, latency, "Slow response (>2s)");
    }

    ProbeResult::pass(endpoint, method, code, latency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ProbeStatus;

    fn json_response(status: u16, body: &str, latency_ms: u64) -> RawResponse {
        RawResponse {
            status,
            content_type: Some("application/json".into()),
            body: body.into(),
            latency_ms,
        }
    }

    #[test]
    fn test_transport_failures_classify_as_fail() {
        let timeout = classify("/guards", HttpMethod::Get, Err(TransportError::Timeout));
        assert_eq!(timeout.status, ProbeStatus::Fail);
        assert!(timeout.error.as_deref().unwrap().contains("timeout"));
        assert!(timeout.status_code.is_none());

        let refused = classify("/guards", HttpMethod::Get, Err(TransportError::Connect));
        assert_eq!(refused.status, ProbeStatus::Fail);
        assert!(refused.error.as_deref().unwrap().contains("Connection failed"));
    }

    #[test]
    fn test_401_fails_regardless_of_body() {
        let result = classify(
            "/auth/me",
            HttpMethod::Get,
            Ok(json_response(401, r#"{"ok":true}"#, 10)),
        );
        assert_eq!(result.status, ProbeStatus::Fail);
        assert!(result.error.as_deref().unwrap().contains("Unauthorized"));
    }

    #[test]
    fn test_500_surfaces_body_message() {
        let result = classify(
            "/sites",
            HttpMethod::Get,
            Ok(json_response(500, r#"{"message":"boom"}"#, 10)),
        );
        assert_eq!(result.status, ProbeStatus::Fail);
        assert_eq!(
            result.error.as_deref(),
            Some("Internal Server Error: boom")
        );
    }

    #[test]
    fn test_4xx_surfaces_error_envelope() {
        let enveloped = classify(
            "/clients",
            HttpMethod::Post,
            Ok(json_response(
                400,
                r#"{"success":false,"message":"name is required"}"#,
                10,
            )),
        );
        assert_eq!(
            enveloped.error.as_deref(),
            Some("Backend error: name is required")
        );

        let bare = classify(
            "/clients",
            HttpMethod::Post,
            Ok(json_response(404, "not json", 10)),
        );
        assert_eq!(bare.error.as_deref(), Some("HTTP 404"));
    }

    #[test]
    fn test_html_body_fails() {
        let result = classify(
            "/guards",
            HttpMethod::Get,
            Ok(RawResponse {
                status: 200,
                content_type: Some("text/html; charset=utf-8".into()),
                body: "<html></html>".into(),
                latency_ms: 10,
            }),
        );
        assert_eq!(result.status, ProbeStatus::Fail);
        assert!(result.error.as_deref().unwrap().contains("HTML"));
    }

    #[test]
    fn test_302_fails() {
        let result = classify(
            "/guards",
            HttpMethod::Get,
            Ok(json_response(302, "{}", 10)),
        );
        assert_eq!(result.status, ProbeStatus::Fail);
        assert!(result.error.as_deref().unwrap().contains("Redirect"));
    }

    #[test]
    fn test_unparsable_json_fails() {
        let result = classify(
            "/guards",
            HttpMethod::Get,
            Ok(json_response(200, "<<<", 10)),
        );
        assert_eq!(result.status, ProbeStatus::Fail);
        assert_eq!(result.error.as_deref(), Some("Invalid JSON response"));
    }

    #[test]
    fn test_latency_thresholds() {
        let very_slow = classify(
            "/guards",
            HttpMethod::Get,
            Ok(json_response(200, "{}", 5001)),
        );
        assert_eq!(very_slow.status, ProbeStatus::Warning);
        assert_eq!(very_slow.warning.as_deref(), Some("Very slow response (>5s)"));

        let slow = classify(
            "/guards",
            HttpMethod::Get,
            Ok(json_response(200, "{}", 2001)),
        );
        assert_eq!(slow.status, ProbeStatus::Warning);
        assert_eq!(slow.warning.as_deref(), Some("Slow response (>2s)"));

        let fast = classify(
            "/guards",
            HttpMethod::Get,
            Ok(json_response(200, "{}", 12)),
        );
        assert_eq!(fast.status, ProbeStatus::Pass);
    }
}
