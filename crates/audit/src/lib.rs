//! Guardline Static Auditor
//!
//! Inspects the guard management repository, its environment, and its build
//! tooling for deployment blockers. Every check runs unconditionally and
//! appends findings into four severity buckets; the final verdict is
//! decided by the critical count alone.
//!
//! # Modules
//!
//! - [`finding`] — Findings, severity buckets, and the append-only log
//! - [`environment`] — Required/optional environment variable presence
//! - [`migrations`] — Versioned SQL migration sequence integrity
//! - [`toolchain`] — Backend and frontend build invocations with deadlines
//! - [`conventions`] — Controller annotation and entity-exposure heuristics
//! - [`security`] — Security package component presence
//! - [`database`] — Connection-string parsing and optional reachability
//! - [`structure`] — Source file census and expected package layout
//! - [`report`] — Console report, deploy verdict, and JSON artifact

pub mod conventions;
pub mod database;
pub mod environment;
pub mod finding;
pub mod migrations;
pub mod report;
pub mod security;
pub mod structure;
pub mod toolchain;
mod walk;

use std::path::{Path, PathBuf};

use environment::{EnvSource, SystemEnv};
use finding::AuditLog;

pub use finding::{AuditFinding, AuditStats, Severity};
pub use report::AuditReport;

/// Where the audited project lives. Backend and frontend roots are fixed
/// subtrees of the project root, matching the repository convention.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub project_root: PathBuf,
}

impl AuditConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn backend_root(&self) -> PathBuf {
        self.project_root.join("backend")
    }

    pub fn frontend_root(&self) -> PathBuf {
        self.project_root.join("src")
    }
}

/// The full audit: a flat driver invoking every independent check in order.
/// No check gates another; a failing check records findings and the run
/// continues.
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> AuditLog {
        self.run_with_env(&SystemEnv)
    }

    pub fn run_with_env(&self, env: &dyn EnvSource) -> AuditLog {
        let mut log = AuditLog::new();
        let backend = self.config.backend_root();
        let frontend = self.config.frontend_root();

        environment::check_environment(&mut log, env);
        migrations::check_migrations(&mut log, &backend);
        toolchain::check_backend_build(&mut log, &backend);
        toolchain::check_frontend_build(&mut log, &self.config.project_root);
        conventions::check_controllers(&mut log, &backend);
        conventions::check_entity_exposure(&mut log, &backend);
        security::check_security(&mut log, &backend);
        database::check_database(&mut log, env);
        structure::check_structure(&mut log, &backend, &frontend);

        log
    }

    pub fn project_root(&self) -> &Path {
        &self.config.project_root
    }
}
