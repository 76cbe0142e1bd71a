//! Build-tool invocations with a hard wall-clock deadline. The child is
//! polled and killed on expiry; stderr is drained on a separate thread so a
//! chatty build cannot deadlock against a full pipe.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::finding::AuditLog;

pub const BUILD_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Outcome of one bounded build invocation.
#[derive(Debug)]
pub enum BuildOutcome {
    Success,
    Failed { stderr: String },
    TimedOut,
    ToolMissing,
    Error(String),
}

/// Run `program args` in `cwd`, bounded by `timeout`.
pub fn run_build(program: &str, args: &[&str], cwd: &Path, timeout: Duration) -> BuildOutcome {
    let spawned = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BuildOutcome::ToolMissing,
        Err(err) => return BuildOutcome::Error(err.to_string()),
    };

    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = String::new();
            let _ = pipe.read_to_string(&mut buffer);
            buffer
        })
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return BuildOutcome::TimedOut;
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return BuildOutcome::Error(err.to_string()),
        }
    };

    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if status.success() {
        BuildOutcome::Success
    } else {
        BuildOutcome::Failed { stderr }
    }
}

/// Backend build check: a Maven compile with tests skipped.
pub fn check_backend_build(log: &mut AuditLog, backend_root: &Path) {
    info!("checking backend compilation");

    if !backend_root.join("pom.xml").exists() {
        log.critical(
            "Backend",
            "pom.xml not found",
            "Maven project file is missing",
        );
        return;
    }

    match run_build(
        "mvn",
        &["compile", "-DskipTests", "-q"],
        backend_root,
        BUILD_TIMEOUT,
    ) {
        BuildOutcome::Success => log.success("Backend", "Backend compiles successfully"),
        BuildOutcome::Failed { stderr } => log.critical(
            "Backend",
            "Backend compilation failed",
            format!("Maven errors:\n{stderr}"),
        ),
        BuildOutcome::TimedOut => log.warning("Backend", "Compilation timeout (>2 min)", None),
        BuildOutcome::ToolMissing => log.critical(
            "Backend",
            "Maven (mvn) not found in PATH",
            "Install Maven: https://maven.apache.org/",
        ),
        BuildOutcome::Error(err) => log.warning(
            "Backend",
            format!("Could not run Maven build: {err}"),
            None,
        ),
    }
}

/// Frontend build check: npm project file, installed modules, and a build.
pub fn check_frontend_build(log: &mut AuditLog, project_root: &Path) {
    info!("checking frontend build");

    if !project_root.join("package.json").exists() {
        log.critical(
            "Frontend",
            "package.json not found",
            "Node.js project file is missing",
        );
        return;
    }

    if project_root.join("node_modules").exists() {
        log.success("Frontend", "node_modules exists");
    } else {
        log.warning(
            "Frontend",
            "node_modules not found",
            Some("Run: npm install".into()),
        );
    }

    match run_build("npm", &["run", "build"], project_root, BUILD_TIMEOUT) {
        BuildOutcome::Success => log.success("Frontend", "Frontend builds successfully"),
        BuildOutcome::Failed { stderr } => log.critical(
            "Frontend",
            "Frontend build failed",
            format!("Build errors:\n{stderr}"),
        ),
        BuildOutcome::TimedOut => log.warning("Frontend", "Build timeout (>2 min)", None),
        BuildOutcome::ToolMissing => log.critical(
            "Frontend",
            "npm not found in PATH",
            "Install Node.js: https://nodejs.org/",
        ),
        BuildOutcome::Error(err) => log.warning(
            "Frontend",
            format!("Could not run npm build: {err}"),
            None,
        ),
    }
}
