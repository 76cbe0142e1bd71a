//! Probe outcomes and the append-only run log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::executor::HttpMethod;

/// Classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Pass,
    Fail,
    Warning,
}

impl ProbeStatus {
    pub fn icon(self) -> &'static str {
        match self {
            ProbeStatus::Pass => "PASS",
            ProbeStatus::Fail => "FAIL",
            ProbeStatus::Warning => "WARN",
        }
    }
}

/// One HTTP probe outcome. Immutable once constructed; appended to the run
/// log and consumed only by the summary/report renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub endpoint: String,
    pub method: HttpMethod,
    pub status: ProbeStatus,
    pub status_code: Option<u16>,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl ProbeResult {
    pub fn pass(endpoint: &str, method: HttpMethod, code: u16, latency_ms: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method,
            status: ProbeStatus::Pass,
            status_code: Some(code),
            latency_ms: Some(latency_ms),
            error: None,
            warning: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn warning(
        endpoint: &str,
        method: HttpMethod,
        code: u16,
        latency_ms: u64,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method,
            status: ProbeStatus::Warning,
            status_code: Some(code),
            latency_ms: Some(latency_ms),
            error: None,
            warning: Some(warning.into()),
            recorded_at: Utc::now(),
        }
    }

    pub fn fail(
        endpoint: &str,
        method: HttpMethod,
        code: Option<u16>,
        latency_ms: Option<u64>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method,
            status: ProbeStatus::Fail,
            status_code: code,
            latency_ms,
            error: Some(error.into()),
            warning: None,
            recorded_at: Utc::now(),
        }
    }
}

/// Emit the live console line for a probe as it completes.
pub fn log_result(result: &ProbeResult) {
    let code = result
        .status_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "---".into());
    let latency = result
        .latency_ms
        .map(|ms| format!("{ms}ms"))
        .unwrap_or_else(|| "-".into());

    match result.status {
        ProbeStatus::Pass => info!(
            "[PASS] {} {} - {} - {}",
            result.method, result.endpoint, code, latency
        ),
        ProbeStatus::Warning => warn!(
            "[WARN] {} {} - {} - {} ({})",
            result.method,
            result.endpoint,
            code,
            latency,
            result.warning.as_deref().unwrap_or("")
        ),
        ProbeStatus::Fail => error!(
            "[FAIL] {} {} - {} - {} ({})",
            result.method,
            result.endpoint,
            code,
            latency,
            result.error.as_deref().unwrap_or("")
        ),
    }
}

/// Ordered, append-only log of probe results for one run. Threaded
/// explicitly through every probe call; results are never mutated or
/// removed once recorded.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProbeLog {
    results: Vec<ProbeResult>,
}

impl ProbeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ProbeResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.count(ProbeStatus::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(ProbeStatus::Fail)
    }

    pub fn warnings(&self) -> usize {
        self.count(ProbeStatus::Warning)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, status: ProbeStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_tallies() {
        let mut log = ProbeLog::new();
        log.push(ProbeResult::pass("/guards", HttpMethod::Get, 200, 12));
        log.push(ProbeResult::warning(
            "/sites",
            HttpMethod::Get,
            200,
            2500,
            "Slow response (>2s)",
        ));
        log.push(ProbeResult::fail(
            "/clients",
            HttpMethod::Post,
            Some(500),
            Some(40),
            "Internal Server Error",
        ));

        assert_eq!(log.total(), 3);
        assert_eq!(log.passed(), 1);
        assert_eq!(log.warnings(), 1);
        assert_eq!(log.failed(), 1);
        assert!(log.has_failures());
    }

    #[test]
    fn test_empty_log_has_no_failures() {
        assert!(!ProbeLog::new().has_failures());
    }
}
