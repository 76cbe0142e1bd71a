//! Guardline Project Audit — static deployment-readiness checks rooted at
//! the invocation directory. Takes no flags; configuration comes from the
//! environment. Reporting-only: findings never change the exit code.

use guardline_audit::report::{render_console, write_json};
use guardline_audit::{AuditConfig, AuditReport, Auditor};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_audit=info,guardline_audit=info".into()),
        )
        .with_target(false)
        .init();

    let project_root = std::env::current_dir()?;
    info!(root = %project_root.display(), "starting project audit");

    let auditor = Auditor::new(AuditConfig::new(&project_root));
    let log = auditor.run();
    let report = AuditReport::from_log(&log);

    print!("{}", render_console(&report, &project_root));

    let path = write_json(&report, &project_root)?;
    println!("\nDetailed report saved to: {}", path.display());

    Ok(())
}
