//! Probe run reporting — the final tally, the text summary, and the
//! self-contained HTML report artifact.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::diagnose::diagnose;
use crate::result::{ProbeLog, ProbeResult, ProbeStatus};

pub const HTML_REPORT_FILE: &str = "qa_report.html";

/// Aggregate view of one probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    pub fn from_log(log: &ProbeLog) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            total: log.total(),
            passed: log.passed(),
            failed: log.failed(),
            warnings: log.warnings(),
            results: log.results().to_vec(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Render the console summary block.
pub fn render_summary(report: &ProbeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out.push_str("TEST SUMMARY\n");
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!("Total Tests:  {}\n", report.total));
    out.push_str(&format!("Passed:       {}\n", report.passed));
    out.push_str(&format!("Failed:       {}\n", report.failed));
    out.push_str(&format!("Warnings:     {}\n", report.warnings));
    out
}

/// Write the HTML report to its fixed file name in `dir`.
pub fn write_html(report: &ProbeReport, dir: &Path) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.join(HTML_REPORT_FILE);
    fs::write(&path, render_html(report))?;
    Ok(path)
}

/// Render the full static HTML document: stat cards plus the results table,
/// with a diagnosis row for every failure.
pub fn render_html(report: &ProbeReport) -> String {
    let mut rows = String::new();
    for result in &report.results {
        rows.push_str(&render_row(result));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Guardline QA Report</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: 'Segoe UI', Tahoma, sans-serif; background: #0a0f1e; color: #e0e0e0; padding: 20px; }}
  .container {{ max-width: 1200px; margin: 0 auto; background: rgba(255,255,255,0.05); border-radius: 16px; padding: 40px; }}
  h1 {{ color: #00c9ff; text-align: center; margin-bottom: 10px; }}
  .timestamp {{ text-align: center; color: #999; margin-bottom: 40px; font-size: 0.9em; }}
  .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 40px; }}
  .stat-card {{ background: rgba(255,255,255,0.08); padding: 20px; border-radius: 12px; text-align: center; }}
  .stat-card h3 {{ color: #999; font-size: 0.9em; text-transform: uppercase; margin-bottom: 10px; }}
  .stat-card .number {{ font-size: 2.5em; font-weight: bold; }}
  .pass {{ color: #4caf50; }}
  .fail {{ color: #f44336; }}
  .warning {{ color: #ff9800; }}
  table {{ width: 100%; border-collapse: collapse; background: rgba(255,255,255,0.03); }}
  th {{ background: rgba(0,201,255,0.2); padding: 15px; text-align: left; color: #00c9ff; border-bottom: 2px solid #00c9ff; }}
  td {{ padding: 12px 15px; border-bottom: 1px solid rgba(255,255,255,0.05); }}
  .status-badge {{ padding: 4px 12px; border-radius: 20px; font-size: 0.85em; font-weight: bold; text-transform: uppercase; }}
  .status-pass {{ background: rgba(76,175,80,0.2); color: #4caf50; border: 1px solid #4caf50; }}
  .status-fail {{ background: rgba(244,67,54,0.2); color: #f44336; border: 1px solid #f44336; }}
  .status-warning {{ background: rgba(255,152,0,0.2); color: #ff9800; border: 1px solid #ff9800; }}
  .error-msg {{ color: #f44336; font-size: 0.85em; margin-top: 4px; }}
  .warning-msg {{ color: #ff9800; font-size: 0.85em; margin-top: 4px; }}
  .diagnosis {{ background: rgba(255,255,255,0.05); padding: 8px 12px; border-radius: 6px; font-size: 0.85em; color: #aaa; margin-top: 4px; border-left: 3px solid #00c9ff; }}
  .method {{ display: inline-block; padding: 2px 8px; background: rgba(0,201,255,0.2); border-radius: 4px; font-weight: bold; color: #00c9ff; font-size: 0.85em; }}
  .rt-fast {{ color: #4caf50; font-weight: bold; }}
  .rt-medium {{ color: #ff9800; font-weight: bold; }}
  .rt-slow {{ color: #f44336; font-weight: bold; }}
</style>
</head>
<body>
<div class="container">
<h1>Guardline QA Audit Report</h1>
<div class="timestamp">Generated: {generated}</div>
<div class="summary">
  <div class="stat-card"><h3>Total Tests</h3><div class="number">{total}</div></div>
  <div class="stat-card"><h3>Passed</h3><div class="number pass">{passed}</div></div>
  <div class="stat-card"><h3>Failed</h3><div class="number fail">{failed}</div></div>
  <div class="stat-card"><h3>Warnings</h3><div class="number warning">{warnings}</div></div>
</div>
<table>
<thead><tr><th>Endpoint</th><th>Method</th><th>Status</th><th>Response Time</th><th>Details</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
</div>
</body>
</html>
"#,
        generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        warnings = report.warnings,
        rows = rows,
    )
}

fn render_row(result: &ProbeResult) -> String {
    let status_class = match result.status {
        ProbeStatus::Pass => "status-pass",
        ProbeStatus::Fail => "status-fail",
        ProbeStatus::Warning => "status-warning",
    };
    let status_label = match result.status {
        ProbeStatus::Pass => "pass",
        ProbeStatus::Fail => "fail",
        ProbeStatus::Warning => "warning",
    };

    let (rt_class, rt_display) = match result.latency_ms {
        Some(ms) if ms > 5000 => ("rt-slow", format!("{ms}ms")),
        Some(ms) if ms > 2000 => ("rt-medium", format!("{ms}ms")),
        Some(ms) => ("rt-fast", format!("{ms}ms")),
        None => ("rt-fast", "N/A".into()),
    };

    let mut details = String::new();
    if let Some(error) = &result.error {
        details.push_str(&format!(
            r#"<div class="error-msg">{}</div>"#,
            escape(error)
        ));
    }
    if let Some(warning) = &result.warning {
        details.push_str(&format!(
            r#"<div class="warning-msg">{}</div>"#,
            escape(warning)
        ));
    }
    if result.status == ProbeStatus::Fail {
        details.push_str(&format!(
            r#"<div class="diagnosis">{}</div>"#,
            escape(&diagnose(result))
        ));
    }

    format!(
        "<tr><td><code>{endpoint}</code></td><td><span class=\"method\">{method}</span></td>\
         <td><span class=\"status-badge {status_class}\">{status_label}</span></td>\
         <td><span class=\"{rt_class}\">{rt_display}</span></td><td>{details}</td></tr>\n",
        endpoint = escape(&result.endpoint),
        method = result.method,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
