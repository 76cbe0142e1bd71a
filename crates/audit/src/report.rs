//! Audit report rendering: the sectioned console report, the deploy
//! verdict, and the JSON artifact.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finding::{AuditFinding, AuditLog, AuditStats, Severity};

pub const JSON_REPORT_FILE: &str = "AUDIT_REPORT.json";

/// How many info findings the console report shows.
const INFO_PREVIEW: usize = 5;

/// Serializable view of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub timestamp: DateTime<Utc>,
    pub stats: AuditStats,
    pub issues: IssueBuckets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueBuckets {
    pub critical: Vec<AuditFinding>,
    pub warning: Vec<AuditFinding>,
    pub info: Vec<AuditFinding>,
    pub success: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn from_log(log: &AuditLog) -> Self {
        let bucket = |severity| log.in_bucket(severity).cloned().collect();
        Self {
            timestamp: Utc::now(),
            stats: log.stats(),
            issues: IssueBuckets {
                critical: bucket(Severity::Critical),
                warning: bucket(Severity::Warning),
                info: bucket(Severity::Info),
                success: bucket(Severity::Success),
            },
        }
    }

    /// The verdict looks only at criticals; warnings and info are surfaced
    /// but deliberately non-blocking.
    pub fn deploy_ready(&self) -> bool {
        self.stats.critical_count == 0
    }
}

/// Render the full console report.
pub fn render_console(report: &AuditReport, project_root: &Path) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    out.push_str(&format!("\n{rule}\n"));
    out.push_str("PROJECT AUDIT REPORT\n");
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "Generated: {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("Project Root: {}\n", project_root.display()));
    out.push_str(&format!("{rule}\n"));

    out.push_str("\nSTATISTICS:\n");
    out.push_str(&format!(
        "  Total Issues Found: {}\n",
        report.stats.total_issues
    ));
    out.push_str(&format!(
        "  Critical Issues: {}\n",
        report.stats.critical_count
    ));
    out.push_str(&format!("  Warnings: {}\n", report.stats.warning_count));
    out.push_str(&format!(
        "  Backend Files: {} Java files\n",
        report.stats.backend_files
    ));
    out.push_str(&format!(
        "  Frontend Files: {} JSX files\n",
        report.stats.frontend_files
    ));

    if !report.issues.critical.is_empty() {
        out.push_str("\nCRITICAL ISSUES (must fix before deployment):\n");
        render_numbered(&mut out, &report.issues.critical);
    }

    if !report.issues.warning.is_empty() {
        out.push_str("\nWARNINGS (should address):\n");
        render_numbered(&mut out, &report.issues.warning);
    }

    if !report.issues.info.is_empty() {
        out.push_str("\nINFORMATION:\n");
        for finding in report.issues.info.iter().take(INFO_PREVIEW) {
            out.push_str(&format!(
                "  - [{}] {}\n",
                finding.category, finding.message
            ));
        }
    }

    let passed = report.issues.success.len();
    if passed > 0 {
        out.push_str(&format!("\nPASSED CHECKS: {passed}\n"));
    }

    out.push_str(&format!("\n{rule}\n"));
    if report.deploy_ready() {
        out.push_str("STATUS: READY FOR DEPLOYMENT\n");
        out.push_str("  No critical issues found. Review warnings and proceed.\n");
    } else {
        out.push_str("STATUS: NOT READY FOR DEPLOYMENT\n");
        out.push_str(&format!(
            "  Fix {} critical issue(s) before deploying.\n",
            report.stats.critical_count
        ));
    }
    out.push_str(&format!("{rule}\n"));

    out
}

fn render_numbered(out: &mut String, findings: &[AuditFinding]) {
    for (i, finding) in findings.iter().enumerate() {
        out.push_str(&format!(
            "\n  {}. [{}] {}\n",
            i + 1,
            finding.category,
            finding.message
        ));
        if let Some(fix) = &finding.fix {
            out.push_str(&format!("     Fix: {fix}\n"));
        }
    }
}

/// Write the JSON artifact to its fixed file name in `dir`.
pub fn write_json(report: &AuditReport, dir: &Path) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.join(JSON_REPORT_FILE);
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> AuditLog {
        let mut log = AuditLog::new();
        log.critical("Environment", "Missing required environment variable: DATABASE_URL", "Set it");
        log.warning("Database", "Migration version gaps detected: [3]", None);
        log.info("Structure", "Backend: 10 Java files", None);
        log.success("Security", "SecurityConfig.java exists");
        log
    }

    #[test]
    fn test_verdict_depends_only_on_criticals() {
        let report = AuditReport::from_log(&sample_log());
        assert!(!report.deploy_ready());

        let mut clean = AuditLog::new();
        clean.warning("Database", "gap", None);
        clean.info("Structure", "note", None);
        let report = AuditReport::from_log(&clean);
        assert!(report.deploy_ready());
    }

    #[test]
    fn test_console_sections_and_status() {
        let report = AuditReport::from_log(&sample_log());
        let text = render_console(&report, Path::new("/tmp/project"));

        assert!(text.contains("CRITICAL ISSUES"));
        assert!(text.contains("1. [Environment]"));
        assert!(text.contains("Fix: Set it"));
        assert!(text.contains("WARNINGS"));
        assert!(text.contains("PASSED CHECKS: 1"));
        assert!(text.contains("NOT READY FOR DEPLOYMENT"));
    }

    #[test]
    fn test_info_preview_is_capped() {
        let mut log = AuditLog::new();
        for i in 0..8 {
            log.info("Structure", format!("note {i}"), None);
        }
        let report = AuditReport::from_log(&log);
        let text = render_console(&report, Path::new("."));

        assert!(text.contains("note 4"));
        assert!(!text.contains("note 5"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = AuditReport::from_log(&sample_log());
        let json = serde_json::to_string(&report).unwrap();
        let back: AuditReport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.stats, report.stats);
        assert_eq!(back.issues.critical.len(), 1);
        assert_eq!(back.issues.success.len(), 1);
    }
}
