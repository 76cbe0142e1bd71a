//! Audit findings, severity buckets, and the append-only finding log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity bucket for one finding. `Success` records a passed check; the
/// deploy verdict looks only at `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Success,
}

/// One static-check outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub fix: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate counters for the final verdict and the JSON artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_issues: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub backend_files: usize,
    pub frontend_files: usize,
}

/// Append-only log of findings for one audit run, threaded explicitly
/// through every check call.
#[derive(Debug, Default)]
pub struct AuditLog {
    findings: Vec<AuditFinding>,
    pub backend_files: usize,
    pub frontend_files: usize,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        severity: Severity,
        category: &str,
        message: impl Into<String>,
        fix: Option<String>,
    ) {
        self.findings.push(AuditFinding {
            severity,
            category: category.to_string(),
            message: message.into(),
            fix,
            recorded_at: Utc::now(),
        });
    }

    pub fn critical(&mut self, category: &str, message: impl Into<String>, fix: impl Into<String>) {
        self.record(Severity::Critical, category, message, Some(fix.into()));
    }

    pub fn warning(&mut self, category: &str, message: impl Into<String>, fix: Option<String>) {
        self.record(Severity::Warning, category, message, fix);
    }

    pub fn info(&mut self, category: &str, message: impl Into<String>, fix: Option<String>) {
        self.record(Severity::Info, category, message, fix);
    }

    pub fn success(&mut self, category: &str, message: impl Into<String>) {
        self.record(Severity::Success, category, message, None);
    }

    pub fn findings(&self) -> &[AuditFinding] {
        &self.findings
    }

    pub fn in_bucket(&self, severity: Severity) -> impl Iterator<Item = &AuditFinding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.in_bucket(severity).count()
    }

    pub fn stats(&self) -> AuditStats {
        AuditStats {
            total_issues: self.findings.len(),
            critical_count: self.count(Severity::Critical),
            warning_count: self.count(Severity::Warning),
            backend_files: self.backend_files,
            frontend_files: self.frontend_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_buckets() {
        let mut log = AuditLog::new();
        log.critical("Environment", "missing var", "set it");
        log.warning("Database", "gap", None);
        log.info("Structure", "12 files", None);
        log.success("Security", "all present");
        log.backend_files = 42;

        let stats = log.stats();
        assert_eq!(stats.total_issues, 4);
        assert_eq!(stats.critical_count, 1);
        assert_eq!(stats.warning_count, 1);
        assert_eq!(stats.backend_files, 42);
        assert_eq!(log.count(Severity::Success), 1);
    }

    #[test]
    fn test_severity_serializes_snake_case() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, r#""critical""#);
    }
}
