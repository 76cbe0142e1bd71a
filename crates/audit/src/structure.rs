//! Structural inventory: source file census and expected package layout.

use std::path::Path;

use tracing::info;

use crate::conventions::BACKEND_SOURCE_SUBDIR;
use crate::finding::AuditLog;
use crate::walk::files_with_suffix;

/// Backend packages a conventional layered layout is expected to carry.
pub const EXPECTED_PACKAGES: &[&str] = &[
    "controller",
    "service",
    "repository",
    "entity",
    "dto",
    "config",
    "security",
    "exception",
];

pub fn check_structure(log: &mut AuditLog, backend_root: &Path, frontend_root: &Path) {
    info!("analyzing code structure");

    let backend_files = files_with_suffix(backend_root, ".java").len();
    let frontend_files = if frontend_root.is_dir() {
        files_with_suffix(frontend_root, ".jsx").len()
    } else {
        0
    };
    log.backend_files = backend_files;
    log.frontend_files = frontend_files;

    log.info("Structure", format!("Backend: {backend_files} Java files"), None);
    log.info(
        "Structure",
        format!("Frontend: {frontend_files} JSX files"),
        None,
    );

    let source_root = backend_root.join(BACKEND_SOURCE_SUBDIR);
    for &package in EXPECTED_PACKAGES {
        if source_root.join(package).is_dir() {
            log.success("Structure", format!("{package}/ package exists"));
        } else {
            log.warning(
                "Structure",
                format!("{package}/ package not found"),
                Some(format!("Create package for {package} layer")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_census_and_package_presence() {
        let dir = TempDir::new().unwrap();
        let backend = dir.path().join("backend");
        let frontend = dir.path().join("src");
        let source_root = backend.join(BACKEND_SOURCE_SUBDIR);
        for package in ["controller", "service"] {
            fs::create_dir_all(source_root.join(package)).unwrap();
        }
        fs::write(source_root.join("controller/A.java"), "").unwrap();
        fs::write(source_root.join("service/B.java"), "").unwrap();
        fs::create_dir_all(&frontend).unwrap();
        fs::write(frontend.join("App.jsx"), "").unwrap();

        let mut log = AuditLog::new();
        check_structure(&mut log, &backend, &frontend);

        assert_eq!(log.backend_files, 2);
        assert_eq!(log.frontend_files, 1);
        assert_eq!(log.count(Severity::Success), 2);
        assert_eq!(
            log.count(Severity::Warning),
            EXPECTED_PACKAGES.len() - 2
        );
    }

    #[test]
    fn test_missing_frontend_counts_zero() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::new();
        check_structure(&mut log, &dir.path().join("backend"), &dir.path().join("src"));

        assert_eq!(log.frontend_files, 0);
        assert_eq!(log.count(Severity::Warning), EXPECTED_PACKAGES.len());
    }
}
