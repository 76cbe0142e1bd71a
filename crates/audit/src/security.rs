//! Security component presence: the authentication/authorization package
//! and its expected files.

use std::path::Path;

use tracing::info;

use crate::conventions::BACKEND_SOURCE_SUBDIR;
use crate::finding::AuditLog;

pub const SECURITY_FILES: &[&str] = &[
    "SecurityConfig.java",
    "JwtAuthenticationFilter.java",
    "UserPrincipal.java",
];

pub fn check_security(log: &mut AuditLog, backend_root: &Path) {
    info!("checking security configuration");

    let security_dir = backend_root.join(BACKEND_SOURCE_SUBDIR).join("security");
    if !security_dir.is_dir() {
        log.critical(
            "Security",
            "Security package not found",
            "Create security configuration (JWT, CORS, etc.)",
        );
        return;
    }

    for &file in SECURITY_FILES {
        if security_dir.join(file).exists() {
            log.success("Security", format!("{file} exists"));
        } else {
            log.warning(
                "Security",
                format!("Missing security component: {file}"),
                Some(format!("Create {file} for authentication/authorization")),
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
    fn test_missing_package_is_critical() {
        let dir = TempDir::new().unwrap();
        let mut log = AuditLog::new();
        check_security(&mut log, dir.path());

        assert_eq!(log.count(Severity::Critical), 1);
    }

    #[test]
    fn test_each_missing_file_is_one_warning() {
        let dir = TempDir::new().unwrap();
        let security_dir = dir.path().join(BACKEND_SOURCE_SUBDIR).join("security");
        fs::create_dir_all(&security_dir).unwrap();
        fs::write(security_dir.join("SecurityConfig.java"), "").unwrap();

        let mut log = AuditLog::new();
        check_security(&mut log, dir.path());

        assert_eq!(log.count(Severity::Success), 1);
        assert_eq!(log.count(Severity::Warning), 2);
        assert_eq!(log.count(Severity::Critical), 0);
    }
}
